//! Navigation and page chrome helpers

use serde::Serialize;

use super::url_for;
use crate::config::{BackgroundConfig, SiteConfig};

/// Path of the slideshow page, which renders without the header
pub const SLIDESHOW_PATH: &str = "/touch-ai-grass";

/// Path of the slideshow WebSocket endpoint
pub const SLIDESHOW_SOCKET_PATH: &str = "/__slideshow";

/// A header navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    /// Link target with the site root applied
    pub href: String,
    pub active: bool,
}

const NAV: [(&str, &str); 3] = [("about", "/"), ("writing", "/writing"), ("works", "/works")];

/// Header links for a page, `None` when the page has no header.
///
/// `current_path` is the site-relative path, before the root is applied.
pub fn nav_links(config: &SiteConfig, current_path: &str) -> Option<Vec<NavLink>> {
    if current_path == SLIDESHOW_PATH {
        return None;
    }

    Some(
        NAV.iter()
            .map(|&(name, path)| NavLink {
                name,
                href: url_for(config, path),
                active: current_path == path,
            })
            .collect(),
    )
}

/// Background image file for a page
pub fn background_for<'a>(current_path: &str, background: &'a BackgroundConfig) -> &'a str {
    if current_path.starts_with("/writing/") {
        &background.writing
    } else {
        &background.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_marks_active_link() {
        let links = nav_links(&SiteConfig::default(), "/writing").unwrap();
        let active: Vec<_> = links.iter().filter(|l| l.active).map(|l| l.name).collect();
        assert_eq!(active, vec!["writing"]);
    }

    #[test]
    fn test_post_page_has_no_active_link() {
        let links = nav_links(&SiteConfig::default(), "/writing/lsm-tree").unwrap();
        assert!(links.iter().all(|l| !l.active));
    }

    #[test]
    fn test_slideshow_has_no_header() {
        assert!(nav_links(&SiteConfig::default(), SLIDESHOW_PATH).is_none());
    }

    #[test]
    fn test_nav_links_follow_site_root() {
        let config = SiteConfig {
            root: "/blog/".to_string(),
            ..SiteConfig::default()
        };
        let links = nav_links(&config, "/").unwrap();
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/blog/", "/blog/writing", "/blog/works"]);
        assert!(links[0].active);
    }

    #[test]
    fn test_background_for() {
        let background = BackgroundConfig::default();
        assert_eq!(background_for("/writing/lsm-tree", &background), "background.svg");
        assert_eq!(background_for("/writing", &background), "castle-with-river-hq.png");
        assert_eq!(background_for("/", &background), "castle-with-river-hq.png");
    }
}

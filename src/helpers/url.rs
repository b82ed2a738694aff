//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/writing") // -> "/blog/writing"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL of a post page, with the slug encoded as one path segment
///
/// # Examples
/// ```ignore
/// post_url(&config, "lsm tree") // -> "/writing/lsm%20tree"
/// ```
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("/writing/{}", encode_segment(slug)))
}

/// Encode a single path segment such as a file name
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// URL of a file inside a static asset directory
///
/// # Examples
/// ```ignore
/// asset_url("images/touch-ai-grass", "a b.jpg") // -> "/images/touch-ai-grass/a%20b.jpg"
/// ```
pub fn asset_url(dir_path: &str, file_name: &str) -> String {
    let dir = dir_path.trim_matches('/');
    if dir.is_empty() {
        format!("/{}", encode_segment(file_name))
    } else {
        format!("/{}/{}", dir, encode_segment(file_name))
    }
}

/// Whether a link target stays on this site
pub fn is_internal_link(href: &str) -> bool {
    (href.starts_with('/') && !href.starts_with("//")) || href.starts_with('#')
}

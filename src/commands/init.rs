//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::DATE_FORMAT;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: Folio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# About page, one paragraph per entry
bio:
  - Hi, I write software.
links:
  - name: GitHub
    href: https://github.com/

# Works page
works: []

# Surprise gallery
surprise:
  caption: ''
  images: []

# Directory
content_dir: posts
static_dir: public
public_dir: dist

# Slideshow, images live under static_dir
slideshow:
  image_dir: images/touch-ai-grass
  interval_secs: 10

background:
  default: castle-with-river-hq.png
  writing: background.svg

highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: {date}
description: The first post on this site
tags: [meta]
---

Welcome! Posts live in the `posts` directory as markdown files with a
metadata header. Create another one with:

```bash
$ folio new "My New Post"
```

Preview the site with `folio server`, or export it with `folio generate`.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!("{:?} already contains a {}", target_dir, CONFIG_FILE);
    }

    let defaults = SiteConfig::default();
    fs::create_dir_all(target_dir.join(&defaults.content_dir))?;
    fs::create_dir_all(
        target_dir
            .join(&defaults.static_dir)
            .join(&defaults.slideshow.image_dir),
    )?;

    fs::write(target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;

    let today = chrono::Local::now().date_naive();
    let sample_post = SAMPLE_POST.replace("{date}", &today.format(DATE_FORMAT).to_string());
    fs::write(
        target_dir.join(&defaults.content_dir).join("hello-world.md"),
        sample_post,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Folio");
        assert_eq!(folio.config.slideshow.interval_secs, 10);
        assert!(folio.static_dir.join("images/touch-ai-grass").is_dir());

        let slugs = folio.repository().list_slugs().unwrap();
        assert_eq!(slugs, vec!["hello-world".to_string()]);
        let doc = folio.repository().get_by_slug("hello-world").unwrap().unwrap();
        assert_eq!(doc.meta.tags, vec!["meta".to_string()]);
    }

    #[test]
    fn test_init_site_twice_fails() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}

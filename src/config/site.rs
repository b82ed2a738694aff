//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading `_config.yml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // About page
    pub bio: Vec<String>,
    pub links: Vec<LinkItem>,

    // Works page
    pub works: Vec<WorkItem>,

    // Surprise page
    pub surprise: SurpriseConfig,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Extensions
    pub slideshow: SlideshowConfig,
    pub background: BackgroundConfig,
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            bio: Vec::new(),
            links: Vec::new(),

            works: Vec::new(),

            surprise: SurpriseConfig::default(),

            content_dir: "posts".to_string(),
            static_dir: "public".to_string(),
            public_dir: "dist".to_string(),

            slideshow: SlideshowConfig::default(),
            background: BackgroundConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// A labelled link on the about page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkItem {
    pub name: String,
    pub href: String,
}

/// An entry on the works page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub title: String,
    pub href: String,
}

/// Image gallery shown on the surprise page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurpriseConfig {
    pub caption: String,
    pub images: Vec<GalleryImage>,
}

/// A single gallery image, path relative to the static directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Slideshow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Image directory, relative to `static_dir`
    pub image_dir: String,
    /// Seconds between automatic advances
    pub interval_secs: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            image_dir: "images/touch-ai-grass".to_string(),
            interval_secs: 10,
        }
    }
}

/// Page background images, relative to `static_dir/images`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub default: String,
    pub writing: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            default: "castle-with-river-hq.png".to_string(),
            writing: "background.svg".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.slideshow.interval_secs, 10);
        assert_eq!(config.slideshow.image_dir, "images/touch-ai-grass");
        assert_eq!(config.background.writing, "background.svg");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
links:
  - name: github
    href: https://github.com/example
works:
  - title: Replacing Elasticsearch
    href: http://archive.today/ZyzEk
slideshow:
  interval_secs: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.links[0].name, "github");
        assert_eq!(config.works.len(), 1);
        assert_eq!(config.slideshow.interval_secs, 5);
        // Untouched nested fields keep their defaults
        assert_eq!(config.slideshow.image_dir, "images/touch-ai-grass");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "links: [not, a, link]").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

//! folio: a personal portfolio and blog engine
//!
//! Markdown posts with a metadata header are read from a content directory
//! and rendered next to a few static pages and a shuffled image slideshow.
//! The site can be exported to static files or served directly.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod slideshow;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentRepository, FsStorage};
use slideshow::ImageList;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts
    pub content_dir: PathBuf,
    /// Static assets served as-is
    pub static_dir: PathBuf,
    /// Static export output
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        }
    }

    /// Repository over the content directory; reads storage on every call
    pub fn repository(&self) -> ContentRepository<FsStorage> {
        ContentRepository::open(&self.content_dir)
    }

    /// Markdown renderer configured for this site
    pub fn markdown(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }

    /// Images for the slideshow, listed fresh from the static directory
    pub fn slideshow_images(&self) -> ImageList {
        ImageList::load(&self.static_dir, &self.config.slideshow.image_dir)
    }

    /// Export the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Remove the export directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

//! Generator module - exports the site as static HTML files

mod pages;

pub use pages::Pages;

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::helpers::SLIDESHOW_PATH;
use crate::Folio;

/// Static site exporter
pub struct Generator {
    folio: Folio,
    pages: Pages,
}

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub pages: usize,
    pub assets: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            pages: Pages::new(folio)?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateStats> {
        let mut stats = GenerateStats::default();

        fs::create_dir_all(&self.folio.public_dir)?;

        stats.assets = self.copy_static_assets()?;

        self.write_page("/", &self.pages.about()?)?;
        self.write_page("/works", &self.pages.works()?)?;
        self.write_page("/writing", &self.pages.writing_index()?)?;
        self.write_page("/surprise", &self.pages.surprise()?)?;
        self.write_page(
            SLIDESHOW_PATH,
            &self.pages.slideshow(&self.folio.slideshow_images())?,
        )?;
        stats.pages += 5;

        // Every slug gets a page, hidden posts included
        for slug in self.folio.repository().list_slugs()? {
            match self.pages.post(&slug)? {
                Some(html) => {
                    self.write_page(&format!("/writing/{}", slug), &html)?;
                    stats.posts += 1;
                }
                None => tracing::warn!("Post {} disappeared during generation", slug),
            }
        }

        let not_found = self.pages.not_found("/404")?;
        write_file(&self.folio.public_dir.join("404.html"), &not_found)?;
        stats.pages += 1;

        Ok(stats)
    }

    /// Write a page as `<path>/index.html`
    fn write_page(&self, path: &str, html: &str) -> Result<()> {
        let relative = path.trim_matches('/');
        let dest = if relative.is_empty() {
            self.folio.public_dir.join("index.html")
        } else {
            self.folio.public_dir.join(relative).join("index.html")
        };
        tracing::debug!("Writing {:?}", dest);
        write_file(&dest, html)
    }

    /// Copy static assets (images, css) into the output directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content)?;
    Ok(())
}

//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::{file_names_for_slug, DATE_FORMAT};
use crate::Folio;

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    tags: Vec<String>,
    description: &'a str,
    hidden: bool,
}

/// Create a new post file, slugged from the title unless `slug` is given
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };

    let Some(file_names) = file_names_for_slug(&slug) else {
        anyhow::bail!("Invalid slug: {:?}", slug);
    };

    fs::create_dir_all(&folio.content_dir)?;

    // Refuse to shadow an existing post under any extension
    for name in &file_names {
        let existing = folio.content_dir.join(name);
        if existing.exists() {
            anyhow::bail!("File already exists: {:?}", existing);
        }
    }

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().date_naive().format(DATE_FORMAT).to_string(),
        tags: Vec::new(),
        description: "",
        hidden: false,
    };
    let header = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", header);

    let file_path = folio.content_dir.join(&file_names[0]);
    fs::write(&file_path, content)?;
    tracing::info!("Created post {}", slug);

    Ok(file_path)
}

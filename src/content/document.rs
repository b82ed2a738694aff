//! Document models

use chrono::NaiveDate;
use serde::Serialize;

/// Extensions recognised as content files, in lookup order
pub const EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Metadata of one content document, body excluded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// File name with its extension stripped
    pub slug: String,
    pub title: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub description: String,
    /// Hidden documents are left out of listings but still fetchable by slug
    pub hidden: bool,
}

/// A full content document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub meta: DocumentMetadata,
    /// Raw markdown, handed to the renderer untouched
    pub body: String,
}

impl Document {
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    /// ISO form of the document date
    pub fn iso_date(&self) -> String {
        self.meta.iso_date()
    }
}

impl DocumentMetadata {
    /// ISO form of the document date
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Derive the slug from a content file name, `None` for non-content files
pub fn slug_from_file_name(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !EXTENSIONS.contains(&ext) {
        return None;
    }
    Some(stem)
}

/// Candidate file names for a slug, `None` if the slug could escape the store
pub fn file_names_for_slug(slug: &str) -> Option<Vec<String>> {
    let unsafe_slug = slug.is_empty()
        || slug.starts_with('.')
        || slug.contains(['/', '\\'])
        || slug.contains("..");
    if unsafe_slug {
        return None;
    }
    Some(
        EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", slug, ext))
            .collect(),
    )
}

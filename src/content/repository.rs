//! Content repository - lists and fetches documents from a flat store

use std::collections::HashMap;

use super::document::{file_names_for_slug, slug_from_file_name};
use super::storage::{FsStorage, Storage};
use super::{ContentError, Document, DocumentMetadata, FrontMatter};

/// Read-only view over a directory of content documents.
///
/// Nothing is cached: every call reads the store again, so documents added
/// or removed on disk show up on the next query.
#[derive(Debug, Clone)]
pub struct ContentRepository<S = FsStorage> {
    storage: S,
}

impl ContentRepository<FsStorage> {
    /// Repository over a content directory on disk
    pub fn open<P: AsRef<std::path::Path>>(root: P) -> Self {
        Self::new(FsStorage::new(root))
    }
}

impl<S: Storage> ContentRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Metadata of every visible document, newest first.
    ///
    /// Documents sharing a date are ordered by slug.
    pub fn list_metadata(&self) -> Result<Vec<DocumentMetadata>, ContentError> {
        let mut documents = Vec::new();

        for (file_name, slug) in self.entries()? {
            let Some(document) = self.load(&file_name, &slug)? else {
                // Removed between listing and reading
                continue;
            };
            if document.meta.hidden {
                tracing::debug!("Skipping hidden document {}", slug);
                continue;
            }
            documents.push(document.meta);
        }

        documents.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(documents)
    }

    /// Slug of every document, hidden ones included, in enumeration order
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.entries()?.into_iter().map(|(_, slug)| slug).collect())
    }

    /// Fetch one document with its raw body, `Ok(None)` when the slug is unknown
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Document>, ContentError> {
        let Some(candidates) = file_names_for_slug(slug) else {
            tracing::debug!("Rejected slug {:?}", slug);
            return Ok(None);
        };

        let mut found: Option<(String, String)> = None;
        for file_name in candidates {
            let Some(content) = self.storage.read(&file_name)? else {
                continue;
            };
            if let Some((first, _)) = &found {
                return Err(duplicate_slug(slug, first, &file_name));
            }
            found = Some((file_name, content));
        }

        match found {
            Some((file_name, content)) => parse(&file_name, slug, &content).map(Some),
            None => Ok(None),
        }
    }

    /// Tag usage over visible documents, most used first, then by name
    pub fn list_tags(&self) -> Result<Vec<(String, usize)>, ContentError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for meta in self.list_metadata()? {
            for tag in meta.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<_> = counts.into_iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(tags)
    }

    /// Content files paired with their slugs, rejecting slugs claimed twice
    fn entries(&self) -> Result<Vec<(String, String)>, ContentError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::new();

        for file_name in self.storage.list()? {
            let Some(slug) = slug_from_file_name(&file_name) else {
                continue;
            };
            if let Some(first) = seen.get(slug) {
                return Err(duplicate_slug(slug, first, &file_name));
            }
            seen.insert(slug.to_string(), file_name.clone());
            entries.push((file_name.clone(), slug.to_string()));
        }

        Ok(entries)
    }

    fn load(&self, file_name: &str, slug: &str) -> Result<Option<Document>, ContentError> {
        let Some(content) = self.storage.read(file_name)? else {
            return Ok(None);
        };
        parse(file_name, slug, &content).map(Some)
    }
}

fn parse(file_name: &str, slug: &str, content: &str) -> Result<Document, ContentError> {
    tracing::debug!("Read document {}", file_name);

    let (fm, body) =
        FrontMatter::parse(content).map_err(|e| ContentError::malformed(slug, e.to_string()))?;
    let meta = fm.validate(slug)?;

    Ok(Document {
        meta,
        body: body.to_string(),
    })
}

fn duplicate_slug(slug: &str, first: &str, second: &str) -> ContentError {
    ContentError::malformed(
        slug,
        format!("slug is claimed by both {} and {}", first, second),
    )
}

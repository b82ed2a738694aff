//! Content repository errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the content repository.
///
/// A slug that does not resolve is not an error; see
/// [`ContentRepository::get_by_slug`](super::ContentRepository::get_by_slug).
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document '{slug}': {reason}")]
    MalformedDocument { slug: String, reason: String },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl ContentError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(slug: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }
}

//! Content module - documents, their storage, and markdown rendering

mod document;
mod error;
mod frontmatter;
mod markdown;
mod repository;
mod storage;

pub use document::{file_names_for_slug, slug_from_file_name, Document, DocumentMetadata};
pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError, DATE_FORMAT};
pub use markdown::MarkdownRenderer;
pub use repository::ContentRepository;
pub use storage::{FsStorage, MemoryStorage, Storage};

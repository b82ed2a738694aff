//! Flat file storage backends for content documents

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentError;

/// A flat, read-only store of named text files
pub trait Storage {
    /// File names in enumeration order
    fn list(&self) -> Result<Vec<String>, ContentError>;

    /// Read a file by name, `Ok(None)` when it does not exist
    fn read(&self, name: &str) -> Result<Option<String>, ContentError>;
}

/// Storage backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl Storage for FsStorage {
    fn list(&self) -> Result<Vec<String>, ContentError> {
        let metadata =
            fs::metadata(&self.root).map_err(|e| ContentError::storage(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ContentError::storage(
                &self.root,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| ContentError::storage(&self.root, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            } else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
            }
        }

        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Option<String>, ContentError> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ContentError::storage(path, e)),
        }
    }
}

/// In-memory storage, enumerated in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: IndexMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    /// Builder-style variant of [`MemoryStorage::insert`]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }
}

impl Storage for MemoryStorage {
    fn list(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> Result<Option<String>, ContentError> {
        Ok(self.files.get(name).cloned())
    }
}

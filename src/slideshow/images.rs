//! Image listing for the slideshow

use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

/// File names found in a slideshow image directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageList {
    /// File names in enumeration order
    pub images: Vec<String>,
    /// Directory path as served, relative to the site root
    pub dir_path: String,
}

impl ImageList {
    /// List `<static_dir>/<dir_path>`.
    ///
    /// A missing or unreadable directory gives an empty list.
    pub fn load<P: AsRef<Path>>(static_dir: P, dir_path: &str) -> Self {
        let dir_path = dir_path.trim_matches('/').to_string();
        let dir = static_dir.as_ref().join(&dir_path);

        if !dir.is_dir() {
            tracing::warn!("Slideshow image directory {:?} not found", dir);
            return Self {
                images: Vec::new(),
                dir_path,
            };
        }

        let mut images = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to list slideshow images in {:?}: {}", dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if !name.starts_with('.') => images.push(name.to_string()),
                _ => {}
            }
        }

        tracing::debug!("Found {} slideshow images in {:?}", images.len(), dir);
        Self { images, dir_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_lists_files() {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images/touch-ai-grass");
        fs::create_dir_all(images.join("nested")).unwrap();
        fs::write(images.join("a.jpg"), b"").unwrap();
        fs::write(images.join("b.png"), b"").unwrap();
        fs::write(images.join(".DS_Store"), b"").unwrap();

        let mut list = ImageList::load(dir.path(), "/images/touch-ai-grass/");
        list.images.sort();
        assert_eq!(list.images, vec!["a.jpg", "b.png"]);
        assert_eq!(list.dir_path, "images/touch-ai-grass");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let list = ImageList::load(dir.path(), "images/touch-ai-grass");
        assert!(list.images.is_empty());
        assert_eq!(list.dir_path, "images/touch-ai-grass");
    }
}

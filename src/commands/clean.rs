//! Clean the export directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the export directory
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_output_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("dist/writing")).unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();

        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        run(&folio).unwrap();
        assert!(!dir.path().join("dist").exists());
        assert!(dir.path().join("posts").exists());

        // Nothing to clean is fine
        run(&folio).unwrap();
    }
}

//! Show a single document

use anyhow::Result;

use crate::helpers::display_date;
use crate::Folio;

/// Print one document's metadata. Returns `false` when the slug is unknown.
pub fn run(folio: &Folio, slug: &str) -> Result<bool> {
    let Some(doc) = folio.repository().get_by_slug(slug)? else {
        println!("{}: not found", slug);
        return Ok(false);
    };

    println!("title:       {}", doc.meta.title);
    println!("slug:        {}", doc.meta.slug);
    println!("date:        {} ({})", doc.iso_date(), display_date(&doc.meta.date));
    println!("description: {}", doc.meta.description);
    if !doc.meta.tags.is_empty() {
        println!("tags:        {}", doc.meta.tags.join(", "));
    }
    if doc.meta.hidden {
        println!("hidden:      true");
    }
    println!("body:        {} bytes", doc.body.len());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_show_found_and_missing() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        std::fs::create_dir_all(&posts).unwrap();
        std::fs::write(
            posts.join("a.md"),
            "---\ntitle: A\ndate: 2024-01-02\ndescription: d\n---\nbody\n",
        )
        .unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());

        assert!(run(&folio, "a").unwrap());
        assert!(!run(&folio, "b").unwrap());
    }
}

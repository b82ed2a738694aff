//! List site content

use anyhow::Result;

use crate::content::DATE_FORMAT;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let repository = folio.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repository.list_metadata()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format(DATE_FORMAT),
                    post.title,
                    post.slug
                );
            }
        }
        "slug" | "slugs" => {
            let slugs = repository.list_slugs()?;
            println!("Slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        "tag" | "tags" => {
            let tags = repository.list_tags()?;
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, slug, tag", content_type);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_list_rejects_unknown_type() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("posts")).unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());

        assert!(run(&folio, "post").is_ok());
        assert!(run(&folio, "category").is_err());
    }

    #[test]
    fn test_list_missing_content_dir_errors() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        assert!(run(&folio, "slug").is_err());
    }
}

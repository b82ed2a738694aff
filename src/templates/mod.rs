//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::DocumentMetadata;
use crate::helpers::format_display_date;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // URLs and pre-rendered HTML pass through untouched; free text is
        // escaped explicitly in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("about.html", include_str!("site/about.html")),
            ("works.html", include_str!("site/works.html")),
            ("writing.html", include_str!("site/writing.html")),
            ("post.html", include_str!("site/post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("surprise.html", include_str!("site/surprise.html")),
            ("slideshow.html", include_str!("site/slideshow.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: ISO date to long form
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    format_display_date(&s)
        .map(tera::Value::String)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            root: format!("{}/", config.root.trim_end_matches('/')),
        }
    }
}

/// A post in a listing, with its page URL resolved
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub url: String,
    #[serde(flatten)]
    pub meta: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkData {
    pub name: String,
    pub href: String,
    pub external: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_display_date_filter() {
        let value = tera::Value::String("2024-01-05".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("January 5, 2024".to_string()));

        let bad = tera::Value::String("soon".to_string());
        assert!(display_date_filter(&bad, &HashMap::new()).is_err());
    }
}

//! Front-matter parsing and validation

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::document::DocumentMetadata;
use super::ContentError;

/// Date format accepted in the `date` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while splitting and decoding a metadata header
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated {0} front-matter")]
    Unterminated(&'static str),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Raw metadata header of a content file, before validation.
///
/// Every field is optional here so that a missing field can be reported by
/// name from [`FrontMatter::validate`] rather than as an opaque decode error.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No header at all; validation reports the missing fields
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        // An empty header closes immediately
        if let Some(remaining) = rest.strip_prefix("---") {
            return Ok((FrontMatter::default(), remaining.trim_start_matches(['\n', '\r'])));
        }

        let end_pos = rest
            .find("\n---")
            .ok_or(FrontMatterError::Unterminated("YAML"))?;
        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter wrapped in ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest
                .find(";;;")
                .ok_or(FrontMatterError::Unterminated("JSON"))?;
            let json_content = rest[..end_pos].trim();
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

            // The wrapped form may omit the outer braces
            let fm: FrontMatter = if json_content.starts_with('{') {
                serde_json::from_str(json_content)?
            } else {
                serde_json::from_str(&format!("{{{}}}", json_content))?
            };
            return Ok((fm, remaining));
        }

        // Bare JSON object at the start, find the matching closing brace
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos = end_pos.ok_or(FrontMatterError::Unterminated("JSON"))?;
        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
        Ok((fm, remaining))
    }

    /// Check required fields and build typed metadata for `slug`
    pub fn validate(self, slug: &str) -> Result<DocumentMetadata, ContentError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            Some(_) => return Err(ContentError::malformed(slug, "field `title` is empty")),
            None => return Err(ContentError::malformed(slug, "missing field `title`")),
        };

        let raw_date = self
            .date
            .ok_or_else(|| ContentError::malformed(slug, "missing field `date`"))?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT).map_err(|_| {
            ContentError::malformed(slug, format!("field `date` is not YYYY-MM-DD: {}", raw_date))
        })?;

        let description = self
            .description
            .ok_or_else(|| ContentError::malformed(slug, "missing field `description`"))?;

        Ok(DocumentMetadata {
            slug: slug.to_string(),
            title,
            date,
            tags: self.tags,
            description,
            hidden: self.hidden.unwrap_or(false),
        })
    }
}

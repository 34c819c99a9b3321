//! Front-matter parsing
//!
//! A post file starts with a delimited metadata header followed by the
//! markdown body. Both header conventions the original template's parser
//! accepted are supported: YAML between `---` fences, and JSON either
//! between `;;;` fences or as a bare leading object. Parsing is strict -
//! a post without a well-formed header fails the build.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::BuildDataError;

/// Front-matter data from a post file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,

    /// Additional custom fields, preserved but not interpreted
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a post's raw contents.
    ///
    /// Returns the metadata and the remaining body. Presence of the
    /// individual fields is the caller's concern; presence of the header
    /// block itself is enforced here.
    pub fn parse(raw: &str) -> Result<(Self, &str), BuildDataError> {
        let content = raw.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or a leading object)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Err(BuildDataError::MissingHeader)
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), BuildDataError> {
        let rest = &content[3..]; // Skip opening ---

        let end = rest
            .find("\n---")
            .ok_or(BuildDataError::UnterminatedHeader)?;
        let header = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        // An empty header block is well-formed; the fields are just absent
        if header.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(header)?;
        Ok((fm, body))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), BuildDataError> {
        if let Some(rest) = content.strip_prefix(";;;") {
            let end = rest
                .find(";;;")
                .ok_or(BuildDataError::UnterminatedHeader)?;
            let fm: FrontMatter = serde_json::from_str(&rest[..end])?;
            let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, body));
        }

        // Bare JSON object: find the matching closing brace
        let mut depth = 0;
        let mut end = 0;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end == 0 {
            return Err(BuildDataError::UnterminatedHeader);
        }

        let fm: FrontMatter = serde_json::from_str(&content[..end])?;
        let body = content[end..].trim_start_matches(['\n', '\r']);
        Ok((fm, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Two Forms of Pre-rendering
date: "2020-01-01"
---

Next.js has two forms of pre-rendering.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Two Forms of Pre-rendering".to_string()));
        assert_eq!(fm.date, Some("2020-01-01".to_string()));
        assert!(body.starts_with("Next.js has two forms"));
    }

    #[test]
    fn test_unquoted_date_stays_a_string() {
        let content = "---\ntitle: Hello\ndate: 2020-01-02\n---\nBody.\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date, Some("2020-01-02".to_string()));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "date": "2021-03-04"}

This is content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.date, Some("2021-03-04".to_string()));
        assert!(body.contains("This is content."));
    }

    #[test]
    fn test_parse_fenced_json_frontmatter() {
        let content = ";;;{\"title\": \"Fenced\", \"date\": \"2021-03-05\"};;;\nBody.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Fenced".to_string()));
        assert_eq!(body, "Body.\n");
    }

    #[test]
    fn test_extra_fields_preserved() {
        let content = "---\ntitle: T\ndate: 2020-01-01\nauthor: jane\n---\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.extra.get("author").and_then(|v| v.as_str()),
            Some("jane")
        );
    }

    #[test]
    fn test_missing_header_is_error() {
        let err = FrontMatter::parse("Just body content, no header.\n").unwrap_err();
        assert!(matches!(err, BuildDataError::MissingHeader));
    }

    #[test]
    fn test_unterminated_header_is_error() {
        let err = FrontMatter::parse("---\ntitle: Never closed\n").unwrap_err();
        assert!(matches!(err, BuildDataError::UnterminatedHeader));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, BuildDataError::Yaml(_)));
    }

    #[test]
    fn test_empty_header_has_no_fields() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody.\n").unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.date, None);
        assert_eq!(body, "Body.\n");
    }

    #[test]
    fn test_missing_date_parses_as_none() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Only a title\n---\n").unwrap();
        assert_eq!(fm.title, Some("Only a title".to_string()));
        assert_eq!(fm.date, None);
    }
}

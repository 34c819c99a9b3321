//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Writing
    pub new_post_name: String,
    pub highlight_theme: String,

    // Date display format for templates (Moment.js-style; "LL" is the
    // long form, e.g. "January 1, 2020")
    pub date_format: String,

    // Feed
    pub feed_limit: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".into(),
            description: String::new(),
            author: "Your Name".into(),
            language: "en".into(),
            url: "http://example.com".into(),
            root: "/".into(),
            posts_dir: "posts".into(),
            public_dir: "public".into(),
            static_dir: "static".into(),
            new_post_name: ":title.md".into(),
            highlight_theme: "base16-ocean.dark".into(),
            date_format: "LL".into(),
            feed_limit: 20,
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;

        // Templates join page paths straight onto the root
        if !config.root.ends_with('/') {
            config.root.push('/');
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.date_format, "LL");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Notes From a Small Blog
author: Test User
posts_dir: content/posts
feed_limit: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Notes From a Small Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.feed_limit, 5);
        // Unset keys keep their defaults
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_unknown_keys_go_to_extra() {
        let yaml = "title: T\ngithub_username: someone\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.extra.get("github_username").and_then(|v| v.as_str()),
            Some("someone")
        );
    }

    #[test]
    fn test_load_normalizes_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        std::fs::write(&path, "root: /blog\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.root, "/blog/");
    }
}

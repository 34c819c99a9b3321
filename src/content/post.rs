//! Post models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// The metadata for one post, as listed on the landing page.
///
/// This is the record handed to the index template as build-time props.
/// `date` stays the raw `YYYY-MM-DD` string from the front-matter: ISO
/// dates compare lexicographically in chronological order, so ordering
/// the list never needs a parsed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Source filename with the markdown extension stripped
    pub id: String,

    /// Post title from front-matter
    pub title: String,

    /// Publication date string (`YYYY-MM-DD`)
    pub date: String,
}

/// A fully loaded post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Source filename with the markdown extension stripped
    pub id: String,

    /// Post title from front-matter
    pub title: String,

    /// Publication date string (`YYYY-MM-DD`)
    pub date: String,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// Source file path
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Project the metadata triple that the landing page lists.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_projection() {
        let post = Post {
            id: "pre-rendering".to_string(),
            title: "Two Forms of Pre-rendering".to_string(),
            date: "2020-01-01".to_string(),
            raw: String::new(),
            content: String::new(),
            source: PathBuf::from("posts/pre-rendering.md"),
            extra: HashMap::new(),
        };

        let summary = post.summary();
        assert_eq!(summary.id, "pre-rendering");
        assert_eq!(summary.title, "Two Forms of Pre-rendering");
        assert_eq!(summary.date, "2020-01-01");
    }
}

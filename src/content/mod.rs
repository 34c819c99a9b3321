//! Content module - post models, front-matter parsing and loading

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the build-data step: reading and parsing post files.
///
/// Any of these is fatal to the build. A post that fails to load must
/// block publishing instead of silently dropping off the site, so there
/// is no partial-result path anywhere in the loader.
#[derive(Error, Debug)]
pub enum BuildDataError {
    #[error("cannot read posts directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A front-matter error annotated with the file it came from.
    #[error("invalid post {path:?}: {source}")]
    InvalidPost {
        path: PathBuf,
        #[source]
        source: Box<BuildDataError>,
    },

    #[error("missing front-matter header")]
    MissingHeader,

    #[error("unterminated front-matter header")]
    UnterminatedHeader,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing `{field}` in front-matter of {path:?}")]
    MissingField {
        path: PathBuf,
        field: &'static str,
    },
}

impl BuildDataError {
    /// Attach the source file to a parse error.
    pub(crate) fn in_post(self, path: &std::path::Path) -> Self {
        BuildDataError::InvalidPost {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

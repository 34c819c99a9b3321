//! mdpress: a minimal static blog generator
//!
//! Markdown posts with a front-matter header go in, a static site comes
//! out: a landing page listing every post newest-first, one page per
//! post and an Atom feed. All post data is read and rendered at build
//! time; the output is plain files.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::SiteConfig;
use content::PostLoader;

/// The blog instance: site configuration plus resolved directories.
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration, from `_config.yml` or defaults
    pub config: SiteConfig,
    /// Base directory of the site
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
    /// Output directory for the generated site
    pub public_dir: PathBuf,
    /// Directory of static assets copied verbatim
    pub static_dir: PathBuf,
}

impl Blog {
    /// Open the blog rooted at `base_dir`.
    ///
    /// Reads `_config.yml` when present, otherwise falls back to the
    /// default configuration.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
            static_dir,
        })
    }

    /// A loader for this site's posts directory.
    pub fn loader(&self) -> PostLoader {
        PostLoader::with_theme(&self.posts_dir, &self.config.highlight_theme)
    }

    /// Build the site into the public directory.
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Delete the public directory.
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post from the scaffold.
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::create_post(self, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_blog_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert_eq!(blog.config.title, "My Blog");
        assert_eq!(blog.posts_dir, dir.path().join("posts"));
        assert_eq!(blog.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_blog_reads_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Notes\nposts_dir: entries\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.config.title, "Notes");
        assert_eq!(blog.posts_dir, dir.path().join("entries"));
        assert_eq!(blog.static_dir, dir.path().join("static"));
    }
}

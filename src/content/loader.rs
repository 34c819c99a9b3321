//! Post loader - the build-data step behind the site
//!
//! [`PostLoader`] turns a directory of markdown files into the sorted
//! metadata list injected into the landing page, and into fully rendered
//! posts for the per-post pages.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{BuildDataError, FrontMatter, MarkdownRenderer, Post, PostSummary};

/// Loads posts from a directory of markdown files.
///
/// The directory is an explicit parameter; nothing here consults global
/// state, so callers can point a loader at any directory.
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostLoader {
    /// Create a loader for the given posts directory
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Create a loader that highlights code blocks with the given theme
    pub fn with_theme<P: Into<PathBuf>>(posts_dir: P, theme: &str) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer: MarkdownRenderer::with_theme(theme),
        }
    }

    /// Load the metadata of every post, sorted by date descending.
    ///
    /// This is the build-time props payload for the landing page: one
    /// `{id, title, date}` record per markdown file, newest first.
    /// Ordering is a plain string comparison on the date field, which on
    /// `YYYY-MM-DD` dates is chronological. Equal dates keep file-name
    /// order (the scan enumerates sorted and the sort is stable), so
    /// repeated runs over an unchanged directory produce identical output.
    ///
    /// Bodies are not rendered here; the landing page never needs them.
    pub fn load_summaries(&self) -> Result<Vec<PostSummary>, BuildDataError> {
        let mut posts = Vec::new();

        for path in self.markdown_files()? {
            let raw = read_post(&path)?;
            let (fm, _body) = FrontMatter::parse(&raw).map_err(|e| e.in_post(&path))?;

            posts.push(PostSummary {
                id: file_id(&path),
                title: require(fm.title, "title", &path)?,
                date: require(fm.date, "date", &path)?,
            });
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load every post in full, bodies rendered to HTML, in the same
    /// order as [`load_summaries`](Self::load_summaries).
    pub fn load_posts(&self) -> Result<Vec<Post>, BuildDataError> {
        let mut posts = Vec::new();

        for path in self.markdown_files()? {
            posts.push(self.load_post(&path)?);
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, BuildDataError> {
        let raw = read_post(path)?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|e| e.in_post(path))?;

        let content = self.renderer.render(body);

        Ok(Post {
            id: file_id(path),
            title: require(fm.title, "title", path)?,
            date: require(fm.date, "date", path)?,
            raw: body.to_string(),
            content,
            source: path.to_path_buf(),
            extra: fm.extra,
        })
    }

    /// The post ids as derived from the directory, in file-name order
    pub fn post_ids(&self) -> Result<Vec<String>, BuildDataError> {
        Ok(self
            .markdown_files()?
            .iter()
            .map(|path| file_id(path))
            .collect())
    }

    /// Enumerate the markdown files of the posts directory.
    ///
    /// Non-recursive: files in subdirectories are not posts. Enumeration
    /// is pinned to file-name order so output never depends on what the
    /// underlying filesystem happens to return.
    fn markdown_files(&self) -> Result<Vec<PathBuf>, BuildDataError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| BuildDataError::ReadDir {
                path: self.posts_dir.clone(),
                source,
            })?;

            if entry.file_type().is_file() && is_markdown_file(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }
}

fn read_post(path: &Path) -> Result<String, BuildDataError> {
    fs::read_to_string(path).map_err(|source| BuildDataError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Derive a post id from its filename (extension stripped)
fn file_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

fn require(
    field: Option<String>,
    name: &'static str,
    path: &Path,
) -> Result<String, BuildDataError> {
    field.ok_or_else(|| BuildDataError::MissingField {
        path: path.to_path_buf(),
        field: name,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str) {
        let content = format!(
            "---\ntitle: {}\ndate: {}\n---\n\nBody of {}.\n",
            title, date, title
        );
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_summaries_sorted_by_date_descending() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "oldest.md", "Oldest", "2019-05-01");
        write_post(dir.path(), "newest.md", "Newest", "2021-02-03");
        write_post(dir.path(), "middle.md", "Middle", "2020-07-15");

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].id, "newest");
        assert_eq!(posts[1].id, "middle");
        assert_eq!(posts[2].id, "oldest");
    }

    #[test]
    fn test_id_is_filename_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "pre-rendering.md", "Pre-rendering", "2020-01-01");

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        assert_eq!(posts[0].id, "pre-rendering");
    }

    #[test]
    fn test_empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        assert!(posts.is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = PostLoader::new(dir.path().join("no-such-dir"));

        let err = loader.load_summaries().unwrap_err();
        assert!(matches!(err, BuildDataError::ReadDir { .. }));
    }

    #[test]
    fn test_missing_date_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "good.md", "Good", "2020-01-01");
        fs::write(
            dir.path().join("bad.md"),
            "---\ntitle: No date here\n---\n\nBody.\n",
        )
        .unwrap();

        let err = PostLoader::new(dir.path()).load_summaries().unwrap_err();
        assert!(matches!(
            err,
            BuildDataError::MissingField { field: "date", .. }
        ));
    }

    #[test]
    fn test_missing_header_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("plain.md"), "# Just markdown\n").unwrap();

        let err = PostLoader::new(dir.path()).load_summaries().unwrap_err();
        assert!(matches!(err, BuildDataError::InvalidPost { .. }));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "one.md", "One", "2020-03-01");
        write_post(dir.path(), "two.md", "Two", "2020-04-01");

        let loader = PostLoader::new(dir.path());
        let first = loader.load_summaries().unwrap();
        let second = loader.load_summaries().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_dates_keep_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "banana.md", "Banana", "2020-01-01");
        write_post(dir.path(), "apple.md", "Apple", "2020-01-01");
        write_post(dir.path(), "cherry.md", "Cherry", "2020-01-01");

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_subdirectories_are_not_scanned() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "top.md", "Top", "2020-01-01");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_post(&dir.path().join("nested"), "inner.md", "Inner", "2020-01-02");

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "top");
    }

    #[test]
    fn test_non_markdown_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "post.md", "Post", "2020-01-01");
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();

        let posts = PostLoader::new(dir.path()).load_summaries().unwrap();

        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_load_posts_renders_bodies() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "hello.md", "Hello", "2020-01-01");

        let posts = PostLoader::new(dir.path()).load_posts().unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "hello");
        assert!(posts[0].raw.contains("Body of Hello."));
        assert!(posts[0].content.contains("<p>"));
    }

    #[test]
    fn test_post_ids_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "zebra.md", "Z", "2019-01-01");
        write_post(dir.path(), "aardvark.md", "A", "2020-01-01");

        let ids = PostLoader::new(dir.path()).post_ids().unwrap();

        assert_eq!(ids, ["aardvark", "zebra"]);
    }
}

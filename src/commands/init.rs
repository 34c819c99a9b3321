//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default site configuration written by `init`.
const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: Your Name
language: en

# URL
url: http://example.com
root: /

# Directory
posts_dir: posts
public_dir: public
static_dir: static

# Writing
new_post_name: :title.md
highlight_theme: base16-ocean.dark

# Date display format (LL renders "January 1, 2020")
date_format: LL

# Feed
feed_limit: 20
"#;

const POST_SCAFFOLD: &str = "---\ntitle: \"{{ title }}\"\ndate: \"{{ date }}\"\n---\n\n";

const PRE_RENDERING_POST: &str = r#"---
title: "Two Forms of Pre-rendering"
date: "2020-01-01"
---

Pre-rendering means generating the HTML for each page in advance,
instead of assembling it in the browser with client-side JavaScript.
There are two forms of it: **Static Generation** and **Server-side
Rendering**. The difference is in **when** the HTML for a page is
generated.

- **Static Generation** generates the HTML at **build time**. The
  pre-rendered HTML is then _reused_ on each request.
- **Server-side Rendering** generates the HTML on **each request**.

A static blog like this one uses Static Generation for everything:
every page you are reading was written to disk before the server ever
saw a request.
"#;

const SSG_SSR_POST: &str = r#"---
title: "When to Use Static Generation v.s. Server-side Rendering"
date: "2020-01-02"
---

We recommend using **Static Generation** whenever possible, because a
page built once can be served by a CDN with no work per request.

You can use Static Generation for many types of pages, including:

- Marketing pages
- Blog posts
- Documentation

Ask yourself: "Can I pre-render this page **ahead** of a user's
request?" If the answer is yes, choose Static Generation.

Static Generation is **not** a good idea when the page shows
frequently updated data, or content that changes on every request. In
that case you need Server-side Rendering, or can skip pre-rendering
and fill in the data with client-side JavaScript. This generator only
does the static kind, which is exactly what a blog wants.
"#;

/// Scaffold a new site in `target_dir`: default config, scaffold,
/// static directory and two starter posts.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(target_dir.join("_config.yml"), DEFAULT_CONFIG)?;
    fs::write(target_dir.join("scaffolds").join("post.md"), POST_SCAFFOLD)?;

    fs::write(
        target_dir.join("posts").join("pre-rendering.md"),
        PRE_RENDERING_POST,
    )?;
    fs::write(target_dir.join("posts").join("ssg-ssr.md"), SSG_SSR_POST)?;

    tracing::info!("Initialized site at {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blog;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_site_skeleton() {
        let dir = tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("scaffolds/post.md").exists());
        assert!(dir.path().join("posts/pre-rendering.md").exists());
        assert!(dir.path().join("posts/ssg-ssr.md").exists());
        assert!(dir.path().join("static").is_dir());
    }

    #[test]
    fn test_starter_posts_load_newest_first() {
        let dir = tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        let posts = blog.loader().load_summaries().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "ssg-ssr");
        assert_eq!(posts[0].date, "2020-01-02");
        assert_eq!(posts[1].id, "pre-rendering");
        assert_eq!(
            posts[1].title,
            "Two Forms of Pre-rendering"
        );
    }

    #[test]
    fn test_initialized_site_builds() {
        let dir = tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        blog.build().unwrap();

        assert!(blog.public_dir.join("index.html").exists());
        assert!(blog.public_dir.join("posts/ssg-ssr/index.html").exists());
        assert!(blog.public_dir.join("atom.xml").exists());
    }
}

//! Site generator
//!
//! Renders the loaded posts into the public directory: a landing page
//! listing every post newest-first, one page per post under
//! `posts/<id>/`, the stylesheet, copied static assets and an Atom
//! feed.

use anyhow::{Context as _, Result};
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{Post, PostSummary};
use crate::helpers;
use crate::templates::{PostData, TemplateRenderer};
use crate::Blog;

pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site.
    ///
    /// `summaries` drive the landing page and the feed ordering, `posts`
    /// the per-post pages; both arrive from the loader sorted newest
    /// first.
    pub fn generate(&self, summaries: &[PostSummary], posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir).with_context(|| {
            format!("failed to create output directory {:?}", self.blog.public_dir)
        })?;

        self.write_stylesheet()?;
        self.copy_static_assets()?;
        self.generate_index(summaries)?;
        self.generate_post_pages(posts)?;
        self.generate_feed(posts)?;

        Ok(())
    }

    /// Context shared by every page.
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.blog.config);
        context.insert("current_year", &chrono::Utc::now().format("%Y").to_string());
        context
    }

    /// Render the landing page from the post metadata list.
    fn generate_index(&self, summaries: &[PostSummary]) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", summaries);

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.blog.public_dir.join("index.html");
        fs::write(&output_path, html)
            .with_context(|| format!("failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Render one page per post under `posts/<id>/index.html`.
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            let data = PostData {
                id: post.id.clone(),
                title: post.title.clone(),
                date: post.date.clone(),
                content: post.content.clone(),
            };

            let mut context = self.base_context();
            context.insert("post", &data);

            let html = self.renderer.render("post.html", &context)?;

            let output_path = self
                .blog
                .public_dir
                .join("posts")
                .join(&post.id)
                .join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)
                .with_context(|| format!("failed to write {:?}", output_path))?;
            tracing::debug!("Generated: {:?}", output_path);
        }

        Ok(())
    }

    /// Write the embedded stylesheet to `css/style.css`.
    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.blog.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), TemplateRenderer::stylesheet())?;

        Ok(())
    }

    /// Copy the static directory into the public directory verbatim.
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("failed to copy {:?} to {:?}", path, dest))?;
        }

        Ok(())
    }

    /// Generate the Atom feed at `atom.xml`.
    fn generate_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.blog.config;
        let site_url = helpers::full_url_for(config, "");
        let updated = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            helpers::full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", site_url));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}</id>\n", site_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts.iter().take(config.feed_limit) {
            let link = helpers::full_url_for(config, &format!("posts/{}/", post.id));
            // Dates that are not ISO calendar dates go out as-is
            let published =
                helpers::iso_to_rfc3339(&post.date).unwrap_or_else(|| post.date.clone());

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!("    <published>{}</published>\n", published));
            feed.push_str(&format!("    <updated>{}</updated>\n", published));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                post.content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.blog.public_dir.join("atom.xml");
        fs::write(&output_path, feed)
            .with_context(|| format!("failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }
}

/// Escape text for XML element content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

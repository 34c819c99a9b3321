//! Built-in blog templates
//!
//! The whole theme is embedded in the binary with `include_str!`, so a
//! generated site never needs a theme directory on disk. Rendering goes
//! through [`tera`] with a small set of custom filters.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Per-post context handed to `post.html`.
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub date: String,
    pub content: String,
}

/// Template renderer over the embedded theme.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load the embedded templates and register filters.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are already rendered HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render one of the embedded templates with the given context.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// The embedded stylesheet, written into the generated site.
    pub fn stylesheet() -> &'static str {
        include_str!("blog/style.css")
    }
}

/// Tera filter: format a `YYYY-MM-DD` date string for display.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    Ok(tera::Value::String(helpers::format_date_string(
        &date, &format,
    )))
}

//! Create a new post from the scaffold

use anyhow::{bail, Result};
use std::fs;

use crate::Blog;

const DEFAULT_SCAFFOLD: &str = "---\ntitle: \"{{ title }}\"\ndate: \"{{ date }}\"\n---\n\n";

/// Create a new post file named after `new_post_name` from the config,
/// filling the scaffold template. Refuses to overwrite an existing
/// post.
pub fn create_post(blog: &Blog, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.posts_dir)?;

    let slug = slug::slugify(title);
    let filename = blog
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = blog.posts_dir.join(&filename);
    if file_path.exists() {
        bail!("post already exists: {:?}", file_path);
    }

    let scaffold_path = blog.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d").to_string());

    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    println!("Created: {}", file_path.display());

    Ok(())
}

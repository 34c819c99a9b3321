//! List posts

use anyhow::Result;

use crate::Blog;

/// Print the post metadata list, newest first. This is the same view
/// the landing page is built from.
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.loader().load_summaries()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {}  {}  [{}]", post.date, post.title, post.id);
    }

    Ok(())
}

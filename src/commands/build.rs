//! Build the static site

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Run one build: load all post data, then render the site.
///
/// Any load or render failure aborts the whole build with an error;
/// a partial site is never written over a good one post by post.
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let loader = blog.loader();
    let summaries = loader.load_summaries()?;
    let posts = loader.load_posts()?;

    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(blog)?;
    generator.generate(&summaries, &posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Watch the posts directory, static assets and `_config.yml`,
/// rebuilding on every change. Build failures are logged and watching
/// continues.
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&blog.posts_dir, RecursiveMode::Recursive)?;

    if blog.static_dir.exists() {
        watcher.watch(&blog.static_dir, RecursiveMode::Recursive)?;
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Editors fire bursts of events for one save
                if last_rebuild.elapsed() < Duration::from_millis(500) {
                    continue;
                }
                tracing::info!("Change detected, rebuilding...");
                if let Err(err) = run(blog) {
                    tracing::error!("Build failed: {:#}", err);
                }
                last_rebuild = Instant::now();
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

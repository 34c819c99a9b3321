//! URL helper functions

use crate::config::SiteConfig;

/// Generate a site-relative URL under the configured root
///
/// # Examples
/// ```ignore
/// url_for(&config, "css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let mut url = config.root.trim_end_matches('/').to_string();
    url.push('/');
    url.push_str(path.trim_start_matches('/'));
    url
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "atom.xml") // -> "https://example.com/blog/atom.xml"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

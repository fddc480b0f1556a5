//! Output path layout.

use std::path::{Path, PathBuf};

use crate::config::ClientOptions;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;
use crate::media::Post;

/// Render a dirname/filename pattern for a post.
///
/// Supported tokens: `{profile}`, `{shortcode}`, `{date_utc:%Y}` and
/// `{year}` (both expand to the post's publish year).
pub fn render_pattern(pattern: &str, post: &Post) -> String {
    pattern
        .replace("{profile}", &post.profile)
        .replace("{shortcode}", &post.shortcode)
        .replace("{date_utc:%Y}", &post.year().to_string())
        .replace("{year}", &post.year().to_string())
}

/// Resolve the file stem (path without extension) for a post's media files.
///
/// With the default patterns this is `<base>/<profile>/<year>/<shortcode>`.
pub fn post_stem(base: &Path, options: &ClientOptions, post: &Post) -> PathBuf {
    let relative = format!(
        "{}/{}",
        render_pattern(&options.dirname_pattern, post),
        render_pattern(&options.filename_pattern, post)
    );

    let mut path = base.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty()) {
        if options.sanitize_paths {
            path.push(sanitize_path_component(component));
        } else {
            path.push(component);
        }
    }

    path
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

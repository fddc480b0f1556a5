//! Filesystem module.
//!
//! Provides:
//! - Output path layout from the configured patterns
//! - Title sanitation and post-download renaming

pub mod naming;
pub mod paths;

pub use naming::{rename_with_title, sanitize_path_component, sanitize_title};
pub use paths::{ensure_dir, post_stem, render_pattern};

//! Instagram web API module.
//!
//! This module provides:
//! - The `MediaClient` seam the download workflow is written against
//! - An HTTP client for the Instagram private web API
//! - API response types

pub mod client;
pub mod types;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::media::Post;

pub use client::InstagramApi;

/// Client seam for the remote media service.
///
/// The production implementation talks to Instagram's private web API;
/// tests substitute a fake so the workflow runs without network access.
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Username of the authenticated session, or `None` when the session
    /// cookies are missing or no longer valid.
    async fn logged_in_user(&self) -> Result<Option<String>>;

    /// Fetch metadata for one post by shortcode.
    async fn fetch_post(&self, shortcode: &str) -> Result<Post>;

    /// Stream one media file to `dest`, returning the bytes written.
    async fn fetch_file(&self, url: &str, dest: &Path) -> Result<u64>;
}

//! insta-dl - download single Instagram posts and reels.
//!
//! This library backs the `insta-dl` binary: it imports an authenticated
//! session from a browser's cookie store, fetches one post by URL, saves
//! its media under `<base>/<profile>/<year>/`, and records the download in
//! a per-profile journal so repeat invocations are no-ops.
//!
//! The two genuinely external concerns sit behind traits so the workflow
//! is testable without network or browser access:
//! [`session::CookieSource`] for browser cookie stores and
//! [`api::MediaClient`] for the remote service.

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod journal;
pub mod media;
pub mod output;
pub mod session;
pub mod urls;

// Re-exports for convenience
pub use api::{InstagramApi, MediaClient};
pub use config::{ClientOptions, OverrideValue};
pub use download::{download_post, DownloadRequest, Outcome};
pub use error::{Error, Result};
pub use journal::{Journal, JournalEntry};
pub use media::Post;
pub use session::{Browser, SessionStore};

//! Error types for the insta-dl application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Argument errors
    #[error("{0}")]
    Usage(String),

    // Session errors
    #[error("Session error: {0}")]
    Session(String),

    #[error("Cookie extraction failed: {0}")]
    CookieExtraction(String),

    // Input errors
    #[error("could not extract shortcode from: {0}")]
    InvalidUrl(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes. Usage errors raised by clap itself exit with clap's own code.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE_ERROR: i32 = 1;
    pub const SESSION_ERROR: i32 = 2;
    pub const INPUT_ERROR: i32 = 3;
    pub const API_ERROR: i32 = 4;
    pub const DOWNLOAD_ERROR: i32 = 5;
    pub const UNEXPECTED_ERROR: i32 = 6;
}

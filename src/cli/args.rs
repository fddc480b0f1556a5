//! Command-line argument definitions using clap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use directories::BaseDirs;

use crate::config::overrides::{coerce, OverrideValue};
use crate::error::{Error, Result};

/// Default maximum length for caption-derived titles.
const DEFAULT_MAX_TITLE_LEN: usize = 70;

const USAGE_HINT: &str = "Usage: insta-dl [-o DIR] <url> [max-title-length] [key=value ...]";

/// Instagram single-post downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "insta-dl",
    version,
    about = "Download a single Instagram post or reel",
    long_about = "Download one Instagram post or reel using a session imported from a browser.\n\n\
                  Run `insta-dl init [browser]` once to import the session, then pass a post URL.\n\
                  Extra key=value tokens override the download client's defaults, e.g.\n\
                  save_metadata=true or download_videos=false.",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output directory. Flag takes precedence over the INSTA_DL_DIR
    /// environment variable (also read from a .env file); default is the
    /// current directory.
    #[arg(short = 'o', long = "output", value_name = "DIR", env = "INSTA_DL_DIR")]
    pub output: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// Post URL, optional max title length, and key=value overrides.
    #[arg(value_name = "URL [MAX-TITLE-LENGTH] [KEY=VALUE]...")]
    pub tokens: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an Instagram session from a browser's cookie store.
    Init {
        /// Browser to read cookies from (arc, brave, chrome, chromium,
        /// edge, firefox, librewolf, opera, opera_gx, safari, vivaldi).
        #[arg(default_value = "firefox")]
        browser: String,
    },
}

/// Parsed download invocation: positional args plus typed overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadArgs {
    pub url: String,
    pub max_title_len: usize,
    pub overrides: Vec<(String, OverrideValue)>,
}

impl Args {
    /// Split the free tokens into the download positionals and overrides.
    pub fn download_args(&self) -> Result<DownloadArgs> {
        split_tokens(&self.tokens)
    }

    /// Resolve the output base directory: `-o`/env value if given (clap
    /// already applies flag-over-env precedence), else the current
    /// directory; `~` expanded and the result made absolute.
    pub fn resolved_output_dir(&self) -> Result<PathBuf> {
        let configured = self
            .output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty() && *p != Path::new("."));

        let dir = match configured {
            Some(dir) => expand_tilde(dir),
            None => std::env::current_dir()?,
        };

        if dir.is_absolute() {
            Ok(dir)
        } else {
            Ok(std::env::current_dir()?.join(dir))
        }
    }
}

/// Separate `key=value` overrides from positional tokens and validate the
/// positional count (URL, optionally a max title length).
pub fn split_tokens(tokens: &[String]) -> Result<DownloadArgs> {
    let mut positional: Vec<&str> = Vec::new();
    let mut overrides: Vec<(String, OverrideValue)> = Vec::new();

    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if !token.starts_with("http") => {
                overrides.push((key.to_string(), coerce(value)));
            }
            _ => positional.push(token),
        }
    }

    let (url, max_title_len) = match positional.as_slice() {
        [url] => (url.to_string(), DEFAULT_MAX_TITLE_LEN),
        [url, len] => {
            let len = len.parse::<usize>().map_err(|_| {
                Error::Usage(format!(
                    "max-title-length must be an integer, got: {}\n{}",
                    len, USAGE_HINT
                ))
            })?;
            (url.to_string(), len)
        }
        _ => {
            return Err(Error::Usage(format!(
                "expected one URL and an optional max-title-length\n{}",
                USAGE_HINT
            )))
        }
    };

    Ok(DownloadArgs {
        url,
        max_title_len,
        overrides,
    })
}

fn expand_tilde(path: &Path) -> PathBuf {
    let Some(rest) = path.to_str().and_then(|s| s.strip_prefix('~')) else {
        return path.to_path_buf();
    };

    match BaseDirs::new() {
        Some(dirs) => {
            let home = dirs.home_dir();
            home.join(rest.trim_start_matches('/'))
        }
        None => path.to_path_buf(),
    }
}

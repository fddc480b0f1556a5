//! Append-only per-profile download journal.
//!
//! Each profile directory carries a `downloads.jsonl` with one JSON record
//! per successfully downloaded post. The journal is the only duplicate
//! detection this tool does; entries are never updated or deleted.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::media::Post;

/// Journal filename inside each profile directory.
pub const JOURNAL_FILE: &str = "downloads.jsonl";

/// One journal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub shortcode: String,
    pub url: String,
    pub title: String,
    pub caption: Option<String>,
    pub profile: String,
    pub date_posted: DateTime<Utc>,
    pub typename: String,
    pub likes: Option<u64>,
    pub video_view_count: Option<u64>,
    pub video_duration: Option<f64>,
    pub downloaded_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Build a record for a just-downloaded post.
    pub fn for_post(post: &Post, url: &str, title: &str) -> Self {
        Self {
            shortcode: post.shortcode.clone(),
            url: url.to_string(),
            title: title.to_string(),
            caption: post.caption.clone(),
            profile: post.profile.clone(),
            date_posted: post.taken_at,
            typename: post.kind.typename().to_string(),
            likes: post.like_count,
            video_view_count: post.video_view_count,
            video_duration: post.video_duration,
            downloaded_at: Utc::now(),
        }
    }
}

/// Journal repository rooted at the output base directory.
#[derive(Debug, Clone)]
pub struct Journal {
    base_dir: PathBuf,
}

impl Journal {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn journal_path(&self, profile: &str) -> PathBuf {
        self.base_dir.join(profile).join(JOURNAL_FILE)
    }

    /// Shortcodes already recorded for a profile. A missing journal file
    /// means an empty set, not an error.
    pub fn logged_shortcodes(&self, profile: &str) -> Result<HashSet<String>> {
        Self::shortcodes_in(&self.journal_path(profile))
    }

    /// Whether a shortcode is recorded in any profile journal under the
    /// base directory.
    ///
    /// The scan lets the duplicate check run before the post (and with it
    /// the owning profile name) has been fetched, so a repeat invocation
    /// does no network work at all.
    pub fn contains(&self, shortcode: &str) -> Result<bool> {
        if !self.base_dir.exists() {
            return Ok(false);
        }

        for entry in std::fs::read_dir(&self.base_dir)? {
            let path = entry?.path().join(JOURNAL_FILE);
            if path.is_file() && Self::shortcodes_in(&path)?.contains(shortcode) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Append one record to the profile's journal, creating it on demand.
    pub fn append(&self, profile: &str, entry: &JournalEntry) -> Result<()> {
        let path = self.journal_path(profile);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    fn shortcodes_in(path: &Path) -> Result<HashSet<String>> {
        if !path.exists() {
            return Ok(HashSet::new());
        }

        let mut codes = HashSet::new();
        for line in std::fs::read_to_string(path)?.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: JournalEntry = serde_json::from_str(line)?;
            codes.insert(entry.shortcode);
        }

        Ok(codes)
    }
}

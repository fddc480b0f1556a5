//! On-disk session persistence.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::cookies::SessionCookie;

/// Filename prefix for saved sessions.
const SESSION_PREFIX: &str = "session-";

/// A persisted authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub cookies: Vec<SessionCookie>,
}

/// Repository for session files in the per-user config directory.
///
/// One file per saved credential, named `session-<username>`. Sessions are
/// overwritten wholesale when recreated, never mutated in place.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at the platform config directory.
    pub fn from_project_dirs() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "insta-dl")
            .ok_or_else(|| Error::Session("could not determine config directory".to_string()))?;
        Ok(Self::at(dirs.config_dir().to_path_buf()))
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn session_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{}{}", SESSION_PREFIX, username))
    }

    /// Persist a session keyed by its username.
    pub fn save(&self, session: &Session) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(self.session_path(&session.username), content)?;

        Ok(())
    }

    /// Load the first saved session found, in sorted filename order.
    ///
    /// At most one session is expected; if several exist the first match
    /// wins. Returns `None` when no session file is present.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let mut names: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(SESSION_PREFIX))
            .collect();
        names.sort();

        let Some(name) = names.into_iter().next() else {
            return Ok(None);
        };

        let content = std::fs::read_to_string(self.dir.join(&name))?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }
}

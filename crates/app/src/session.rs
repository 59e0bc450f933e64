//! Session
//!
//! Login and display state of the point-of-sale terminal, persisted as a
//! small JSON file and passed explicitly to whatever needs it.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Business name shown when none has been configured.
pub const DEFAULT_BUSINESS_NAME: &str = "Mi Negocio";

/// API base URL used when none has been configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Session file errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file could not be read or written.
    #[error("session file error: {0}")]
    Io(#[from] io::Error),

    /// The file does not hold a valid session.
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Terminal session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Backend API base URL.
    pub api_url: String,

    /// Bearer token from the last login.
    pub token: Option<String>,

    /// Logged-in user name.
    pub user: Option<String>,

    /// Business name printed on summaries.
    pub business_name: String,

    /// Logo shown by graphical front ends.
    pub logo_url: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user: None,
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            logo_url: None,
        }
    }
}

impl Session {
    /// Loads the session at `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(error.into()),
        }
    }

    /// Loads the session at `path`, falling back to the defaults when the
    /// file cannot be read or parsed. Used by commands that work offline or
    /// that rewrite the file.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        Self::load(path).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "ignoring unreadable session file");

            Self::default()
        })
    }

    /// Writes the session to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;

        Ok(())
    }

    /// Whether a token is held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Logs out: drops token and user, keeps terminal settings.
    pub fn clear_credentials(&mut self) {
        self.token = None;
        self.user = None;
    }
}

//! Bearer Token Sources
//!
//! The executor asks its [`TokenSource`] for a token on every call and
//! never caches the answer, so a login or logout takes effect on the very
//! next request. A missing or blank token means no `Authorization` header
//! at all.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read-only view of wherever the bearer token lives
pub trait TokenSource: Send + Sync {
    /// The current token, if any
    fn token(&self) -> Option<String>;
}

/// Drop blank tokens so they can never become `Bearer ` headers
pub(crate) fn normalize(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

/// Never authenticated
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, mostly for scripts and tests
#[derive(Debug, Clone)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        normalize(self.0.clone())
    }
}

/// In-memory token slot shared between the application and the client
///
/// Clones share the same slot: the login flow calls [`SharedToken::set`],
/// the client only reads.
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    slot: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = token;
    }

    pub fn clear(&self) {
        self.set(None);
    }
}

impl TokenSource for SharedToken {
    fn token(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        normalize(slot.clone())
    }
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        normalize(self())
    }
}

/// Errors writing the persistent token store
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("token store encoding error: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("no configuration directory available")]
    NoConfigDir,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Token persisted in a small TOML file under the user's config directory
///
/// The file is read on every [`TokenSource::token`] call. A missing or
/// unreadable file reads as "no token".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/docchat/session.toml`
    pub fn default_location() -> Result<Self, TokenStoreError> {
        let dir = dirs::config_dir().ok_or(TokenStoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("docchat").join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&SessionFile {
            token: Some(token.to_string()),
        })?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenSource for FileTokenStore {
    fn token(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<SessionFile>(&contents) {
            Ok(file) => normalize(file.token),
            Err(e) => {
                tracing::warn!("Ignoring unreadable token store {:?}: {}", self.path, e);
                None
            }
        }
    }
}

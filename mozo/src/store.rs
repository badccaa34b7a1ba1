//! Access-token and session persistence.
//!
//! Both stores are plain key-value slots behind a trait so callers can plug
//! in platform storage. [`MemoryStore`] keeps everything in-process;
//! [`FileStore`] writes the token and current user to a JSON file. Caches
//! such as the exchange rate live on [`crate::session::SessionContext`] and
//! are never persisted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{MozoError, Result};
use crate::types::User;

/// Storage for the opaque access token.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;

    /// Store a new token; `None` clears it.
    fn save_token(&self, token: Option<String>) -> Result<()>;
}

/// Storage for the currently authenticated user.
pub trait SessionStore: Send + Sync {
    fn load_current_user(&self) -> Option<User>;

    fn save_current_user(&self, user: User) -> Result<()>;

    fn clear_current_user(&self) -> Result<()>;
}

/// In-process token and session storage.
#[derive(Debug)]
pub struct MemoryStore {
    token: watch::Sender<Option<String>>,
    user: watch::Sender<Option<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            token: watch::channel(None).0,
            user: watch::channel(None).0,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryStore {
    fn access_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: Option<String>) -> Result<()> {
        self.token.send_replace(token);
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn load_current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    fn save_current_user(&self, user: User) -> Result<()> {
        self.user.send_replace(Some(user));
        Ok(())
    }

    fn clear_current_user(&self) -> Result<()> {
        self.user.send_replace(None);
        Ok(())
    }
}

/// On-disk layout of [`FileStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    current_user: Option<User>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Token and session storage backed by a single JSON file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename. In-memory state only changes once the write succeeded, so a
/// failed save leaves both the file and the readers on the previous state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: watch::Sender<PersistedSession>,
}

impl FileStore {
    /// Open the store at `path`, loading existing state if the file exists.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::Store` if the file exists but cannot be parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let bytes = std::fs::read(&path)?;
            serde_json::from_slice(&bytes).map_err(|e| {
                MozoError::Store(format!("invalid session file {}: {e}", path.display()))
            })?
        } else {
            PersistedSession::default()
        };
        debug!(path = %path.display(), "session file opened");
        Ok(Self {
            path,
            state: watch::channel(state).0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last write, if any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().updated_at
    }

    /// Apply `f` to a copy of the state, persist the copy, then publish it.
    ///
    /// Runs under the watch channel's write lock, so concurrent updates are
    /// serialized and never lose each other's changes.
    fn update(&self, f: impl FnOnce(&mut PersistedSession)) -> Result<()> {
        let mut result = Ok(());
        self.state.send_if_modified(|current| {
            let mut next = current.clone();
            f(&mut next);
            next.updated_at = Some(Utc::now());
            match self.persist(&next) {
                Ok(()) => {
                    *current = next;
                    true
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "unable to write session file");
                    result = Err(e);
                    false
                }
            }
        });
        result
    }

    fn persist(&self, state: &PersistedSession) -> Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl TokenStore for FileStore {
    fn access_token(&self) -> Option<String> {
        self.state.borrow().access_token.clone()
    }

    fn save_token(&self, token: Option<String>) -> Result<()> {
        self.update(|s| s.access_token = token)
    }
}

impl SessionStore for FileStore {
    fn load_current_user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    fn save_current_user(&self, user: User) -> Result<()> {
        self.update(|s| s.current_user = Some(user))
    }

    fn clear_current_user(&self) -> Result<()> {
        self.update(|s| s.current_user = None)
    }
}

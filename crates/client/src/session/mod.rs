//! Session token store.
//!
//! Holds the single bearer token of this client process under a fixed key.
//! Presence of the token is the whole definition of "authenticated": there
//! is no expiry check here, and a stale token is only discovered when a
//! protected request comes back with 401.

mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

pub use storage::{FileStorage, MemoryStorage, TokenStorage};

use crate::error::StorageError;

/// Key the access token is stored under.
pub const TOKEN_KEY: &str = "access_token";

/// Handle to the process-wide token storage.
///
/// Cloning is cheap; every clone sees the same token.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn TokenStorage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Session {
    /// Session over an arbitrary storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Session that forgets the token when the process exits.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Session persisted to `path`, surviving restarts.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing session file cannot be read.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileStorage::open(path)?)))
    }

    /// The stored token, if any. Empty values count as absent.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    pub fn store_token(&self, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token.expose_secret())?;
        debug!("Session token stored");
        Ok(())
    }

    /// Forget the stored token.
    ///
    /// Always clears the in-memory value; a failure to persist the removal
    /// is logged and otherwise ignored so logout cannot fail.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to persist session token removal");
        }
        debug!("Session token cleared");
    }
}

//! Session credential storage.
//!
//! A credential lives in one of two scopes: durable (file-backed, survives a
//! restart) or ephemeral (in-memory, gone with the process). The gateway only
//! ever sees the [`SessionStore`] capability; the concrete
//! [`ScopedSessionStore`] decides where a credential is read from and removes
//! it from both scopes on teardown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Default location of the durable credential file.
pub const DEFAULT_DURABLE_PATH: &str = ".freightdesk/session.json";

/// Bearer token plus the identity record the login endpoint returned with it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, user: Option<serde_json::Value>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

// Keep tokens out of logs.
impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Where a credential is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    /// Survives a restart of the client.
    Durable,
    /// Lives only as long as the process.
    Ephemeral,
}

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Session storage contains invalid data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session storage lock poisoned")]
    Poisoned,
}

/// The capability the gateway client depends on.
///
/// `read` and `clear` never fail: a backend that cannot be read behaves as if
/// no credential were present, and clearing is a best-effort idempotent
/// removal.
pub trait SessionStore: Send + Sync {
    /// The active credential, durable scope first.
    fn read(&self) -> Option<SessionCredential>;

    /// Remove the credential from every scope.
    fn clear(&self);

    /// Store a freshly issued credential in `scope`.
    fn persist(&self, credential: SessionCredential, scope: StorageScope)
        -> Result<(), SessionError>;
}

/// A single persistence scope.
pub trait CredentialStorage: Send + Sync {
    fn load(&self) -> Result<Option<SessionCredential>, SessionError>;
    fn save(&self, credential: &SessionCredential) -> Result<(), SessionError>;
    fn remove(&self) -> Result<(), SessionError>;
}

/// In-memory storage; the ephemeral scope.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RwLock<Option<SessionCredential>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Result<Option<SessionCredential>, SessionError> {
        let slot = self.slot.read().map_err(|_| SessionError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), SessionError> {
        let mut slot = self.slot.write().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(credential.clone());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.write().map_err(|_| SessionError::Poisoned)?;
        slot.take();
        Ok(())
    }
}

/// JSON file storage; the durable scope.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a reader never observes a half-written credential.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStorage for FileStorage {
    fn load(&self) -> Result<Option<SessionCredential>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(credential)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Durable + ephemeral pair with durable-first lookup.
pub struct ScopedSessionStore {
    durable: Box<dyn CredentialStorage>,
    ephemeral: Box<dyn CredentialStorage>,
}

impl ScopedSessionStore {
    pub fn new(durable: Box<dyn CredentialStorage>, ephemeral: Box<dyn CredentialStorage>) -> Self {
        Self { durable, ephemeral }
    }

    /// File-backed durable scope at `path`, in-memory ephemeral scope.
    pub fn with_durable_file(path: impl Into<PathBuf>) -> Self {
        Self::new(
            Box::new(FileStorage::new(path)),
            Box::new(MemoryStorage::new()),
        )
    }

    /// Both scopes in memory; for tests and short-lived tools.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()), Box::new(MemoryStorage::new()))
    }

    fn storage(&self, scope: StorageScope) -> &dyn CredentialStorage {
        match scope {
            StorageScope::Durable => self.durable.as_ref(),
            StorageScope::Ephemeral => self.ephemeral.as_ref(),
        }
    }

    fn load_scope(&self, scope: StorageScope) -> Option<SessionCredential> {
        match self.storage(scope).load() {
            Ok(credential) => credential,
            Err(e) => {
                warn!(?scope, "ignoring unreadable session storage: {}", e);
                None
            }
        }
    }

    fn remove_scope(&self, scope: StorageScope) {
        if let Err(e) = self.storage(scope).remove() {
            error!(?scope, "failed to remove session credential: {}", e);
        }
    }
}

impl SessionStore for ScopedSessionStore {
    fn read(&self) -> Option<SessionCredential> {
        self.load_scope(StorageScope::Durable)
            .or_else(|| self.load_scope(StorageScope::Ephemeral))
    }

    fn clear(&self) {
        self.remove_scope(StorageScope::Durable);
        self.remove_scope(StorageScope::Ephemeral);
        debug!("session credential cleared from all scopes");
    }

    fn persist(
        &self,
        credential: SessionCredential,
        scope: StorageScope,
    ) -> Result<(), SessionError> {
        self.storage(scope).save(&credential)?;
        // A stale copy in the other scope would shadow or outlive the new one.
        let other = match scope {
            StorageScope::Durable => StorageScope::Ephemeral,
            StorageScope::Ephemeral => StorageScope::Durable,
        };
        self.remove_scope(other);
        debug!(?scope, "session credential stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn credential(token: &str) -> SessionCredential {
        SessionCredential::new(token, Some(json!({ "id": 1, "role": "dispatcher" })))
    }

    #[test]
    fn empty_store_reads_none() {
        let store = ScopedSessionStore::in_memory();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn durable_scope_wins_over_ephemeral() {
        let durable = MemoryStorage::new();
        durable.save(&credential("durable-token")).unwrap();
        let ephemeral = MemoryStorage::new();
        ephemeral.save(&credential("ephemeral-token")).unwrap();
        let store = ScopedSessionStore::new(Box::new(durable), Box::new(ephemeral));

        assert_eq!(store.read().unwrap().token, "durable-token");
    }

    #[test]
    fn ephemeral_scope_is_fallback() {
        let store = ScopedSessionStore::in_memory();
        store
            .persist(credential("short-lived"), StorageScope::Ephemeral)
            .unwrap();
        assert_eq!(store.read().unwrap().token, "short-lived");
    }

    #[test]
    fn clear_removes_both_scopes_and_is_idempotent() {
        let durable = MemoryStorage::new();
        durable.save(&credential("a")).unwrap();
        let ephemeral = MemoryStorage::new();
        ephemeral.save(&credential("b")).unwrap();
        let store = ScopedSessionStore::new(Box::new(durable), Box::new(ephemeral));

        store.clear();
        assert_eq!(store.read(), None);
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn persist_replaces_copy_in_other_scope() {
        let store = ScopedSessionStore::in_memory();
        store
            .persist(credential("old"), StorageScope::Durable)
            .unwrap();
        store
            .persist(credential("new"), StorageScope::Ephemeral)
            .unwrap();

        assert_eq!(store.read().unwrap().token, "new");
    }

    #[test]
    fn file_storage_round_trips_and_survives_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let storage = FileStorage::new(&path);
        storage.save(&credential("persisted")).unwrap();

        let reopened = ScopedSessionStore::with_durable_file(&path);
        let loaded = reopened.read().unwrap();
        assert_eq!(loaded.token, "persisted");
        assert_eq!(loaded.user.unwrap()["role"], "dispatcher");

        reopened.clear();
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();

        let store = ScopedSessionStore::with_durable_file(&path);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", credential("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

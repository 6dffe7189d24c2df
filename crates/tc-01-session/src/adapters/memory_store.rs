//! # In-Memory Credential Store
//!
//! Keeps the serialized credentials in a string so tests can seed garbage.

use crate::domain::{CredentialStoreError, PersistedCredentials};
use crate::ports::CredentialStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Credential store backed by process memory.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    raw: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with arbitrary contents, parsed on the next `load`.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Store seeded with valid credentials.
    pub fn with_credentials(credentials: &PersistedCredentials) -> Self {
        let store = Self::new();
        *store.raw.lock() = serde_json::to_string(credentials).ok();
        store
    }

    /// Make every subsequent `save` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Whether anything is stored.
    pub fn is_empty(&self) -> bool {
        self.raw.lock().is_none()
    }

    /// Raw stored contents.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().clone()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<PersistedCredentials>, CredentialStoreError> {
        let guard = self.raw.lock();
        match guard.as_deref() {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| CredentialStoreError::Corrupt(e.to_string())),
        }
    }

    fn save(&self, credentials: &PersistedCredentials) -> Result<(), CredentialStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CredentialStoreError::WriteRejected(
                "store is read-only".to_string(),
            ));
        }
        let raw = serde_json::to_string(credentials)
            .map_err(|e| CredentialStoreError::WriteRejected(e.to_string()))?;
        *self.raw.lock() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.raw.lock() = None;
        Ok(())
    }
}

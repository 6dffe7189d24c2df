//! # File Credential Store
//!
//! Persists the session as `credentials.json` inside a data directory.
//!
//! Writes go to a temporary file that is renamed over the target while an
//! exclusive `fs2` lock on `credentials.lock` is held, so a reader never sees
//! a half-written file and two clients sharing a directory do not interleave.

use crate::domain::{CredentialStoreError, PersistedCredentials};
use crate::ports::CredentialStore;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    const FILE_NAME: &'static str = "credentials.json";
    const TMP_NAME: &'static str = "credentials.json.tmp";
    const LOCK_NAME: &'static str = "credentials.lock";

    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the credentials file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::FILE_NAME)
    }

    fn lock(&self) -> io::Result<LockGuard> {
        fs::create_dir_all(&self.dir)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.dir.join(Self::LOCK_NAME))?;
        file.lock_exclusive()?;
        Ok(LockGuard { file })
    }

    fn write_atomically(&self, target: &Path, contents: &[u8]) -> io::Result<()> {
        let tmp = self.dir.join(Self::TMP_NAME);
        let mut file = File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp, target)
    }
}

/// Releases the advisory lock on drop.
struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<PersistedCredentials>, CredentialStoreError> {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))
    }

    fn save(&self, credentials: &PersistedCredentials) -> Result<(), CredentialStoreError> {
        let contents = serde_json::to_vec_pretty(credentials)
            .map_err(|e| CredentialStoreError::WriteRejected(e.to_string()))?;
        let _guard = self.lock()?;
        self.write_atomically(&self.path(), &contents)?;
        debug!("[tc-01] Credentials written to {}", self.path().display());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _guard = self.lock()?;
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! Credential file storage.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use boxoffice_core::error::StorageError;
use boxoffice_core::{BearerToken, CredentialStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File name of the credential slot inside the data directory.
pub const CREDENTIAL_FILE: &str = "token.json";

/// On-disk form of the credential.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Persists the bearer token as a small JSON file.
///
/// Writers serialize on a sibling lock file, write a temporary file and
/// rename it into place, so a reader sees either the old or the new token.
/// On Unix the file is readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the credential at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store the credential as [`CREDENTIAL_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CREDENTIAL_FILE))
    }

    /// Get the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling_path(".lock")
    }

    /// Take the writer lock. Released when the returned file is dropped.
    fn lock(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        lock_file.lock_exclusive()?;
        Ok(lock_file)
    }

    fn io_error(&self, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn write(&self, json: &str) -> std::io::Result<()> {
        let lock_file = self.lock()?;

        let temp = self.temp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)?;

        // Set restrictive permissions before the token hits the disk
        #[cfg(unix)]
        {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            file.set_permissions(perms)?;
        }

        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp, &self.path)?;
        lock_file.unlock()?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn save(&self, token: &BearerToken) -> Result<()> {
        let stored = StoredCredential {
            token: token.as_str().to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| StorageError::Encode {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        self.write(&json).map_err(|e| self.io_error(e))?;
        debug!("Credential saved");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn load(&self) -> Option<BearerToken> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read credential file");
                return None;
            }
        };

        match serde_json::from_str::<StoredCredential>(&json) {
            Ok(stored) if !stored.token.is_empty() => {
                debug!(saved_at = %stored.saved_at, "Credential loaded");
                Some(BearerToken::new(stored.token))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable credential file");
                None
            }
        }
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let _lock = self.lock().map_err(|e| self.io_error(e))?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Credential removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e).into()),
        }
    }
}

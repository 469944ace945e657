//! In-memory credential store.

use std::sync::{Mutex, PoisonError};

use crate::traits::CredentialStore;
use crate::{BearerToken, Result};

/// A credential store that lives only as long as the process.
///
/// Useful for tests and for hosts that provide their own persistence.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<BearerToken>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`.
    pub fn with_token(token: impl Into<BearerToken>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &BearerToken) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn load(&self) -> Option<BearerToken> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.is_empty())
    }

    fn clear(&self) -> Result<()> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

//! Credential store trait.

use crate::{BearerToken, Result};

/// Durable slot holding the one persisted bearer token.
///
/// No other session state is persisted. Implementations make no network
/// calls.
pub trait CredentialStore: Send + Sync {
    /// Store `token`, replacing any prior value.
    fn save(&self, token: &BearerToken) -> Result<()>;

    /// Returns the stored token, if any.
    ///
    /// Unreadable state is reported as absent rather than as an error.
    fn load(&self) -> Option<BearerToken>;

    /// Remove the stored token. A no-op when nothing is stored.
    fn clear(&self) -> Result<()>;
}

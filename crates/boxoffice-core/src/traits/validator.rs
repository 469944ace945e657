//! Session validator trait.

use async_trait::async_trait;

use crate::BearerToken;

/// Asks the backend whether a token is still trusted.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Returns true only if the backend explicitly accepts `token`.
    ///
    /// Unreachable backends, error responses and rejections all return
    /// false. This method never fails.
    async fn validate(&self, token: &BearerToken) -> bool;
}

//! Bearer token type.

use std::fmt;

/// A bearer token presented on every authenticated backend request.
///
/// The token is issued and signed by the backend; this crate only reads its
/// payload. An empty token stands for "no session".
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Use [`BearerToken::as_str`] only when building authorization headers
///   or persisting the credential
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Create a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns true if no credential is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Hide token value in Debug output
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.debug_tuple("BearerToken").field(&"").finish()
        } else {
            f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
        }
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

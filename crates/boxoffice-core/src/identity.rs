//! The live session identity read by every screen.

use serde::Serialize;

use crate::claims::Claims;
use crate::token::BearerToken;

/// Who is currently logged in.
///
/// The default value is the anonymous identity: no roles, empty username,
/// empty token. `roles` is always exactly what was decoded from `token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub roles: Vec<String>,
    pub username: String,
    #[serde(skip)]
    pub token: BearerToken,
}

impl SessionIdentity {
    /// The anonymous identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub(crate) fn authenticated(token: BearerToken, claims: Claims) -> Self {
        Self {
            roles: claims.roles,
            username: claims.username,
            token,
        }
    }

    /// Returns true if a token is held.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns true if the identity holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

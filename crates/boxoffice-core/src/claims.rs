//! Token payload decoding.
//!
//! The backend signs and verifies tokens; the console only reads the payload
//! to learn who is logged in and which screens to offer. Nothing here checks
//! the signature or expiry. Authority comes from the backend's check-token
//! round trip and from the backend re-validating every request.

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::token::BearerToken;

/// Unverified claims read from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    /// The subject's username.
    pub username: String,
    /// Non-blank roles in the order the token lists them. Never empty.
    pub roles: Vec<String>,
}

impl Claims {
    /// Decode the payload segment of a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the token is not a
    /// three-segment JWS with a parseable header, if the payload is not JSON,
    /// or if it lacks a `username` or any role.
    pub fn decode(token: &BearerToken) -> Result<Self, AuthError> {
        let data = jsonwebtoken::decode::<ClaimsRepr>(
            token.as_str(),
            &DecodingKey::from_secret(&[]),
            &unverified(),
        )
        .map_err(|e| AuthError::malformed(e.to_string()))?;

        Claims::try_from(data.claims)
    }
}

/// Validation settings that only parse: no signature, expiry or audience checks.
fn unverified() -> Validation {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    username: String,
    #[serde(default)]
    roles: Option<RolesRepr>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RolesRepr {
    Single(String),
    Many(Vec<String>),
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = AuthError;

    fn try_from(value: ClaimsRepr) -> Result<Self, AuthError> {
        let mut roles = match value.roles {
            Some(RolesRepr::Single(role)) => vec![role],
            Some(RolesRepr::Many(roles)) => roles,
            None => Vec::new(),
        };
        roles.retain(|role| !role.is_empty());

        if roles.is_empty() {
            return Err(AuthError::malformed("token carries no roles"));
        }

        Ok(Self {
            username: value.username,
            roles,
        })
    }
}

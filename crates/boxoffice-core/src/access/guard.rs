//! Route guard.

use serde::Serialize;

use crate::SessionIdentity;
use crate::error::AuthError;

use super::RouteDescriptor;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    Allowed,
    /// Gated route, nobody logged in.
    LoginRequired,
    /// Logged in, but without any of the required roles.
    Forbidden,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allowed
    }

    /// Convert a denial into an error naming the route.
    pub fn into_result(self, route: &RouteDescriptor) -> Result<(), AuthError> {
        match self {
            Access::Allowed => Ok(()),
            Access::LoginRequired => Err(AuthError::NotLoggedIn),
            Access::Forbidden => Err(AuthError::Forbidden {
                path: route.path.to_string(),
                required: route.required_roles.iter().map(|r| r.to_string()).collect(),
            }),
        }
    }
}

/// Returns true if the route is public or the identity holds at least one
/// of its required roles.
pub fn is_allowed(route: &RouteDescriptor, identity: &SessionIdentity) -> bool {
    route.is_public()
        || route
            .required_roles
            .iter()
            .any(|required| identity.has_role(required))
}

/// Like [`is_allowed`], but tells a missing session apart from missing roles.
pub fn check(route: &RouteDescriptor, identity: &SessionIdentity) -> Access {
    if is_allowed(route, identity) {
        Access::Allowed
    } else if identity.is_authenticated() {
        Access::Forbidden
    } else {
        Access::LoginRequired
    }
}

//! Outbound request authorization.

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tokio::sync::watch;
use tracing::{trace, warn};

use boxoffice_core::SessionIdentity;

/// Adds `Authorization: Bearer <token>` to outgoing requests.
///
/// Holds a subscription to the session identity and reads the token at the
/// moment a request is built, so a later login or logout is reflected on
/// the very next request. Anonymous sessions send no header.
#[derive(Debug, Clone)]
pub struct RequestAuthorizer {
    identity: watch::Receiver<SessionIdentity>,
}

impl RequestAuthorizer {
    pub fn new(identity: watch::Receiver<SessionIdentity>) -> Self {
        Self { identity }
    }

    /// The header value for the current session, if there is one.
    pub fn header_value(&self) -> Option<HeaderValue> {
        let identity = self.identity.borrow();
        if identity.token.is_empty() {
            return None;
        }

        match HeaderValue::from_str(&identity.token.authorization()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                warn!("Session token is not a valid header value, sending request without it");
                None
            }
        }
    }

    /// Attach the current credential to `request`.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.header_value() {
            Some(value) => {
                trace!("Attaching bearer credential");
                request.header(AUTHORIZATION, value)
            }
            None => request,
        }
    }
}

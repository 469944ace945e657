//! The session context: the one writer of the current identity.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::claims::Claims;
use crate::identity::SessionIdentity;
use crate::token::BearerToken;
use crate::traits::{CredentialStore, SessionValidator};

/// Process-wide session state.
///
/// Holds the current [`SessionIdentity`] and is the only place it changes.
/// Readers take a [`watch::Receiver`] from [`SessionContext::subscribe`] and
/// always see a whole identity, never a half-applied one.
///
/// Every state change bumps a session epoch. [`SessionContext::bootstrap`]
/// remembers the epoch it started under and drops its result if an explicit
/// [`SessionContext::establish`] or [`SessionContext::logout`] happened while
/// the backend check was in flight.
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
    validator: Arc<dyn SessionValidator>,
    state: Mutex<SessionState>,
    identity: watch::Sender<SessionIdentity>,
}

#[derive(Debug, Default)]
struct SessionState {
    epoch: u64,
}

impl SessionContext {
    /// Create an anonymous session over the given collaborators.
    pub fn new(store: Arc<dyn CredentialStore>, validator: Arc<dyn SessionValidator>) -> Self {
        let (identity, _) = watch::channel(SessionIdentity::anonymous());
        Self {
            store,
            validator,
            state: Mutex::new(SessionState::default()),
            identity,
        }
    }

    /// Returns a read-only handle on the identity that observes every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionIdentity> {
        self.identity.subscribe()
    }

    /// Returns a snapshot of the current identity.
    pub fn identity(&self) -> SessionIdentity {
        self.identity.borrow().clone()
    }

    /// Establish a session from `token`, or end it if `token` is empty.
    ///
    /// A non-empty token is decoded first. If decoding fails nothing
    /// changes: the prior identity and the persisted credential stay as
    /// they were. Otherwise the token is persisted and the new identity is
    /// published in one step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AuthError::MalformedToken`] for undecodable
    /// tokens and a storage error if the credential cannot be persisted.
    #[instrument(skip_all)]
    pub fn establish(&self, token: &str) -> Result<SessionIdentity> {
        let mut state = self.lock();
        self.apply(&mut state, BearerToken::new(token))
    }

    /// End the session. Same as `establish("")`.
    pub fn logout(&self) -> SessionIdentity {
        let mut state = self.lock();
        self.clear(&mut state)
    }

    /// Restore the persisted session, if the backend still trusts it.
    ///
    /// Call once at startup. The identity stays anonymous until this
    /// resolves. An absent, rejected or unverifiable credential is cleared
    /// and the session stays anonymous; this method never fails.
    #[instrument(skip_all)]
    pub async fn bootstrap(&self) -> SessionIdentity {
        let (epoch, token) = {
            let state = self.lock();
            (state.epoch, self.store.load())
        };

        let Some(token) = token else {
            debug!("No persisted credential");
            let mut state = self.lock();
            if state.epoch == epoch {
                return self.clear(&mut state);
            }
            return self.identity();
        };

        debug!("Validating persisted credential");
        let valid = self.validator.validate(&token).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!(
                started = epoch,
                current = state.epoch,
                "Session changed during bootstrap, discarding result"
            );
            return self.identity();
        }

        if !valid {
            info!("Persisted credential rejected, staying logged out");
            return self.clear(&mut state);
        }

        match self.apply(&mut state, token) {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Persisted credential unusable, staying logged out");
                self.clear(&mut state)
            }
        }
    }

    fn apply(&self, state: &mut SessionState, token: BearerToken) -> Result<SessionIdentity> {
        if token.is_empty() {
            return Ok(self.clear(state));
        }

        let claims = Claims::decode(&token)?;
        self.store.save(&token)?;

        let identity = SessionIdentity::authenticated(token, claims);
        state.epoch += 1;
        self.identity.send_replace(identity.clone());

        info!(
            username = %identity.username,
            roles = ?identity.roles,
            "Session established"
        );
        Ok(identity)
    }

    fn clear(&self, state: &mut SessionState) -> SessionIdentity {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted credential");
        }

        state.epoch += 1;
        let previous = self.identity.send_replace(SessionIdentity::anonymous());
        if previous.is_authenticated() {
            info!(username = %previous.username, "Session ended");
        }
        SessionIdentity::anonymous()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("identity", &*self.identity.borrow())
            .field("epoch", &self.lock().epoch)
            .finish()
    }
}

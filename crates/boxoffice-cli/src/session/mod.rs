//! Console session wiring.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use boxoffice_core::access::{self, CONSOLE_ROUTES};
use boxoffice_core::{ApiUrl, BearerToken, SessionContext, SessionIdentity, SessionValidator};
use boxoffice_file::FileCredentialStore;
use boxoffice_http::{ApiClient, ClientConfig, HttpSessionValidator};

use crate::cli::Settings;

/// Everything a command needs: the session and an authorized client.
pub struct Console {
    session: SessionContext,
    validator: Arc<HttpSessionValidator>,
    client: ApiClient,
}

impl Console {
    /// Assemble the console from CLI settings. The session starts anonymous.
    pub fn open(settings: &Settings) -> Result<Self> {
        let api_url = ApiUrl::new(&settings.api_url).context("Invalid API URL")?;
        let mut config = ClientConfig::new(api_url)
            .with_user_agent(concat!("boxoffice-cli/", env!("BOXOFFICE_VERSION")));
        if settings.check_timeout > 0 {
            config = config.with_validation_timeout(Duration::from_secs(settings.check_timeout));
        }

        let dir = storage::data_dir(settings.data_dir.as_deref())?;
        debug!(api = %config.api_url, dir = %dir.display(), "Opening console");
        let store = Arc::new(FileCredentialStore::in_dir(dir));
        let validator = Arc::new(HttpSessionValidator::new(ApiClient::new(config.clone())));

        let session = SessionContext::new(store, validator.clone());
        let client = ApiClient::authorized(config, session.subscribe());

        Ok(Self {
            session,
            validator,
            client,
        })
    }

    /// Open the console and restore the persisted session.
    pub async fn restore(settings: &Settings) -> Result<Self> {
        let console = Self::open(settings)?;
        console.session.bootstrap().await;
        Ok(console)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Ask the backend whether `token` is currently valid.
    pub async fn check(&self, token: &str) -> bool {
        self.validator.validate(&BearerToken::new(token)).await
    }

    /// Fail unless the current identity may open the screen at `path`.
    pub fn require(&self, path: &str) -> Result<SessionIdentity> {
        let identity = self.session.identity();
        let route = CONSOLE_ROUTES
            .find(path)
            .with_context(|| format!("Unknown route {path}"))?;

        access::check(route, &identity)
            .into_result(route)
            .with_context(|| {
                if identity.is_authenticated() {
                    format!("Access to {} denied", route.path)
                } else {
                    "No active session. Run 'boxoffice login' first.".to_string()
                }
            })?;

        Ok(identity)
    }
}

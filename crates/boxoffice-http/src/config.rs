//! Client configuration.

use std::time::Duration;

use boxoffice_core::ApiUrl;

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the back-office API.
    pub api_url: ApiUrl,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Upper bound on a token check. `None` waits as long as the backend does.
    pub validation_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            user_agent: concat!("boxoffice/", env!("CARGO_PKG_VERSION")).to_string(),
            validation_timeout: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = Some(timeout);
        self
    }
}

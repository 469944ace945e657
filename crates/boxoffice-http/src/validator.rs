//! Backend-backed session validator.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use boxoffice_core::error::{Error, TransportError};
use boxoffice_core::{BearerToken, SessionValidator};

use crate::client::ApiClient;
use crate::endpoints::{CHECK_TOKEN, CheckTokenRequest, CheckTokenResponse};

/// Validates tokens with `POST auth/check-token`.
///
/// The check is sent without an `Authorization` header; the token travels
/// in the body. Any failure to get an explicit `isValid: true` counts as
/// invalid.
#[derive(Debug, Clone)]
pub struct HttpSessionValidator {
    client: ApiClient,
}

impl HttpSessionValidator {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn check(&self, token: &BearerToken) -> Result<bool, Error> {
        let request = CheckTokenRequest {
            token: token.as_str(),
        };
        let check = self
            .client
            .post_unauthed::<_, CheckTokenResponse>(CHECK_TOKEN, &request);

        let response = match self.client.config().validation_timeout {
            Some(limit) => tokio::time::timeout(limit, check).await.map_err(|_| {
                TransportError::Timeout {
                    duration_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })??,
            None => check.await?,
        };

        Ok(response.is_valid)
    }
}

#[async_trait]
impl SessionValidator for HttpSessionValidator {
    #[instrument(skip_all, fields(api = %self.client.api_url()))]
    async fn validate(&self, token: &BearerToken) -> bool {
        match self.check(token).await {
            Ok(valid) => {
                debug!(valid, "Token check answered");
                valid
            }
            Err(e) => {
                warn!(error = %e, "Token check failed, treating token as invalid");
                false
            }
        }
    }
}

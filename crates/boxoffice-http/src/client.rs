//! HTTP client for the back-office REST API.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, instrument, trace};

use boxoffice_core::error::{Error, ProtocolError, TransportError};
use boxoffice_core::{ApiUrl, SessionIdentity};

use crate::authorizer::RequestAuthorizer;
use crate::config::ClientConfig;
use crate::endpoints::ErrorResponse;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout { duration_ms: 0 }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client for back-office requests.
///
/// Cloning is cheap; clones share the connection pool and the authorizer.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
    authorizer: Option<RequestAuthorizer>,
}

impl ApiClient {
    /// Create a client that never sends credentials.
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            config,
            authorizer: None,
        }
    }

    /// Create a client whose requests carry the credential of `identity`.
    pub fn authorized(config: ClientConfig, identity: watch::Receiver<SessionIdentity>) -> Self {
        Self {
            authorizer: Some(RequestAuthorizer::new(identity)),
            ..Self::new(config)
        }
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &ApiUrl {
        &self.config.api_url
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request with the current credential attached.
    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, Error> {
        let builder = self.request_unauthed(method, segments)?;
        Ok(match &self.authorizer {
            Some(authorizer) => authorizer.authorize(builder),
            None => builder,
        })
    }

    /// Build a request that never carries a credential.
    pub fn request_unauthed(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, Error> {
        let url = self.config.api_url.endpoint(segments)?;
        trace!(%method, %url, "Building request");
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json")))
    }

    /// Authorized GET.
    #[instrument(skip(self))]
    pub async fn get<R>(&self, segments: &[&str]) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!("GET");
        self.execute(self.request(Method::GET, segments)?).await
    }

    /// Authorized POST with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST");
        self.execute(self.request(Method::POST, segments)?.json(body))
            .await
    }

    /// Authorized PUT with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn put<B, R>(&self, segments: &[&str], body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("PUT");
        self.execute(self.request(Method::PUT, segments)?.json(body))
            .await
    }

    /// Authorized DELETE.
    #[instrument(skip(self))]
    pub async fn delete<R>(&self, segments: &[&str]) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!("DELETE");
        self.execute(self.request(Method::DELETE, segments)?).await
    }

    /// POST with a JSON body and no credential.
    #[instrument(skip(self, body))]
    pub async fn post_unauthed<B, R>(&self, segments: &[&str], body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST (unauthenticated)");
        self.execute(self.request_unauthed(Method::POST, segments)?.json(body))
            .await
    }

    /// Send a request and decode its JSON body.
    ///
    /// An empty success body decodes as JSON `null`, so callers expecting
    /// `serde_json::Value` or `Option<_>` accept bodiless responses.
    pub async fn execute<R>(&self, request: RequestBuilder) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    async fn handle_response<R: DeserializeOwned>(&self, response: Response) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "Response");

        if !status.is_success() {
            return Err(Error::Protocol(Self::parse_error_response(response).await));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let decoded = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&body)
        };

        decoded.map_err(|e| {
            Error::Protocol(ProtocolError::new(
                status.as_u16(),
                Some(format!("unexpected response body: {}", e)),
            ))
        })
    }

    async fn parse_error_response(response: Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.into_message()),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

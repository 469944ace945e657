//! Endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

/// POST auth/check-token
pub const CHECK_TOKEN: &[&str] = &["auth", "check-token"];

/// POST Reports
pub const REPORTS: &[&str] = &["Reports"];

/// Request body for check-token.
#[derive(Debug, Serialize)]
pub struct CheckTokenRequest<'a> {
    pub token: &'a str,
}

/// Response from check-token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTokenResponse {
    #[serde(default)]
    pub is_valid: bool,
}

/// Request body for the monthly report.
#[derive(Debug, Serialize)]
pub struct ReportRequest<'a> {
    pub date: &'a str,
}

/// Error body returned by the backend, when it sends one.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

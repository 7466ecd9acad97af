//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the order server
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Client error type
///
/// `Display` is what the dashboard shows in its error banner.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an error envelope
    #[error("{message} (code {code})")]
    Api {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Resource not found, no envelope
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected request, no envelope
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success answer
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Numeric error code when the server sent an envelope
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Map a non-success response to an error, preferring the envelope
    pub(crate) fn from_status(status: http::StatusCode, text: String) -> Self {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return Self::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            };
        }
        match status {
            http::StatusCode::NOT_FOUND => Self::NotFound(text),
            http::StatusCode::BAD_REQUEST => Self::Validation(text),
            _ => Self::Internal(format!("{status}: {text}")),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_envelope_becomes_api_error() {
        let body = r#"{"success":false,"code":4001,"message":"Order 7 not found","details":{"id":7}}"#;
        let err = ClientError::from_status(StatusCode::NOT_FOUND, body.to_string());
        assert_eq!(err.code(), Some(4001));
        assert_eq!(err.to_string(), "Order 7 not found (code 4001)");
    }

    #[test]
    fn test_plain_body_falls_back_on_status() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, "nope".into());
        assert!(matches!(err, ClientError::NotFound(_)));

        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert!(matches!(err, ClientError::Internal(ref m) if m.contains("502")));
    }
}

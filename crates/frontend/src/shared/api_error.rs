//! Error normalization at the HTTP boundary
//!
//! Every failed request ends up as one [`ApiError`] kind. `Validation` is the
//! only kind raised before a request is made.

use super::config::Messages;
use super::http::{HttpResponse, TransportError};
use contracts::dashboards::d400_sales_summary::ApiErrorBody;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("network unreachable")]
    NetworkUnreachable,
    #[error("server error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("validation: {0}")]
    Validation(String),
}

impl ApiError {
    /// Classify a non-success response
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            0 => ApiError::NetworkUnreachable,
            _ => ApiError::Server {
                status,
                message: serde_json::from_str::<ApiErrorBody>(body)
                    .ok()
                    .and_then(|b| b.text()),
            },
        }
    }

    pub fn from_response(response: &HttpResponse) -> Self {
        Self::from_status(response.status, &response.body)
    }

    /// A 2xx response whose body could not be decoded
    pub fn undecodable(status: u16, err: &serde_json::Error) -> Self {
        log::error!("Failed to parse response ({}): {}", status, err);
        ApiError::Server {
            status,
            message: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text for the alert dialog. `None` for `Unauthorized`, which redirects silently.
    pub fn user_message(&self, messages: &Messages) -> Option<String> {
        self.user_message_or(messages, &messages.server_error_fallback)
    }

    /// Like [`user_message`](Self::user_message), with `fallback` for server
    /// errors that carry no message
    pub fn user_message_or(&self, messages: &Messages, fallback: &str) -> Option<String> {
        match self {
            ApiError::Unauthorized => None,
            ApiError::NetworkUnreachable => Some(messages.network_error.clone()),
            ApiError::Server { message, .. } => {
                Some(message.clone().unwrap_or_else(|| fallback.to_string()))
            }
            ApiError::Validation(prompt) => Some(prompt.clone()),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        log::warn!("{}", err);
        ApiError::NetworkUnreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(0, ""), ApiError::NetworkUnreachable);
        assert_eq!(
            ApiError::from_status(500, r#"{"message":"boom"}"#),
            ApiError::Server {
                status: 500,
                message: Some("boom".into())
            }
        );
        assert_eq!(
            ApiError::from_status(404, "<html>not found</html>"),
            ApiError::Server {
                status: 404,
                message: None
            }
        );
    }

    #[test]
    fn test_user_messages() {
        let messages = Messages::default();
        assert_eq!(ApiError::Unauthorized.user_message(&messages), None);
        assert_eq!(
            ApiError::NetworkUnreachable.user_message(&messages).as_deref(),
            Some("Network error occurred")
        );
        assert_eq!(
            ApiError::from_status(502, "").user_message(&messages),
            Some(messages.server_error_fallback.clone())
        );
        assert_eq!(
            ApiError::from_status(400, r#"{"detail":"Invalid report type"}"#)
                .user_message(&messages)
                .as_deref(),
            Some("Invalid report type")
        );
    }

    #[test]
    fn test_upload_fallback_only_without_server_message() {
        let messages = Messages::default();
        let fallback = &messages.upload_error_fallback;
        assert_eq!(
            ApiError::from_status(500, "").user_message_or(&messages, fallback).as_deref(),
            Some("Error uploading file. Please try again.")
        );
        assert_eq!(
            ApiError::from_status(413, r#"{"detail":"File too large"}"#)
                .user_message_or(&messages, fallback)
                .as_deref(),
            Some("File too large")
        );
        assert_eq!(
            ApiError::NetworkUnreachable.user_message_or(&messages, fallback),
            Some(messages.network_error.clone())
        );
    }

    #[test]
    fn test_transport_error_is_network() {
        let err: ApiError = TransportError("offline".into()).into();
        assert_eq!(err, ApiError::NetworkUnreachable);
    }
}

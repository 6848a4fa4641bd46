//! Error types returned by the gateway client.

use crate::session::SessionError;
use freightdesk_common::{external_service_error, FreightdeskError};
use http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between building a request and handing the
/// decoded response back to the caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No response was received (connection refused, DNS, timeout, TLS, ...)
    #[error("FreightDesk API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A protected endpoint answered 401; the stored session has already been cleared
    #[error("Session expired or invalid (status 401): {body}")]
    SessionExpired { body: String },

    /// Any other non-success status, passed through untouched
    #[error("FreightDesk API returned an error: {message} (Status: {status})")]
    Api { status: StatusCode, message: String },

    /// A success response whose body is not the expected JSON
    #[error("Failed to decode FreightDesk API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or inconsistent gateway configuration
    #[error("Gateway configuration error: {0}")]
    Config(String),

    /// The request could not be assembled (bad MIME type, unencodable query, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A freshly issued credential could not be stored
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl GatewayError {
    /// Status code of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::SessionExpired { .. } => Some(StatusCode::UNAUTHORIZED),
            GatewayError::Api { status, .. } => Some(*status),
            GatewayError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Raw response body of the failed response, if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            GatewayError::SessionExpired { body } => Some(body),
            GatewayError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Convert GatewayError to FreightdeskError
impl From<GatewayError> for FreightdeskError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) => FreightdeskError::from(e),
            GatewayError::SessionExpired { body } => FreightdeskError::SessionExpired(body),
            GatewayError::Api { status, message } if status == StatusCode::UNAUTHORIZED => {
                FreightdeskError::AuthError(message)
            }
            GatewayError::Api { status, message } if status == StatusCode::NOT_FOUND => {
                FreightdeskError::NotFoundError(message)
            }
            GatewayError::Api { status, message } => external_service_error(
                "FreightDesk API",
                format!("Status: {}, Message: {}", status.as_u16(), message),
            ),
            GatewayError::Decode(e) => FreightdeskError::ParseError(e.to_string()),
            GatewayError::Config(msg) => FreightdeskError::ConfigError(msg),
            GatewayError::InvalidRequest(msg) => FreightdeskError::ValidationError(msg),
            GatewayError::Session(e) => FreightdeskError::InternalError(e.to_string()),
        }
    }
}

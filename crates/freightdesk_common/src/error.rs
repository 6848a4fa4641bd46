use std::fmt;
use thiserror::Error;

/// The base error type shared by all FreightDesk crates.
///
/// Crate-specific errors (`GatewayError`, `DbError`, ...) implement
/// `From<SpecificError> for FreightdeskError` so binaries can use a single
/// error type at their top level.
#[derive(Error, Debug)]
pub enum FreightdeskError {
    /// No response was received for an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Credentials were rejected
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The stored session is no longer accepted by the server
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The remote API answered with a non-success status
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, FreightdeskError>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, FreightdeskError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| FreightdeskError::InternalError(format!("{}: {}", context, error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for FreightdeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FreightdeskError::TimeoutError(err.to_string())
        } else {
            FreightdeskError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FreightdeskError {
    fn from(err: serde_json::Error) -> Self {
        FreightdeskError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for FreightdeskError {
    fn from(err: std::io::Error) -> Self {
        FreightdeskError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> FreightdeskError {
    FreightdeskError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> FreightdeskError {
    FreightdeskError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> FreightdeskError {
    FreightdeskError::InternalError(message.to_string())
}

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, Context, FreightdeskError,
};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, default_headers, DEFAULT_TIMEOUT_SECS};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, level_from_name, log_error};

// This crate provides functionality shared by the gateway client, the
// datastore collaborator and the client binary.

//! Session-aware HTTP gateway to the FreightDesk logistics API.
//!
//! All traffic goes through one [`GatewayClient`], which owns the base URL,
//! attaches the stored bearer token to outgoing requests, and tears the
//! session down when the server rejects it. The typed wrappers under
//! [`endpoints`] only describe requests.
//!
//! ```no_run
//! use std::sync::Arc;
//! use freightdesk_config::GatewaySettings;
//! use freightdesk_gateway::endpoints::{LoginRequest, ShipmentQuery};
//! use freightdesk_gateway::{GatewayClient, LogOnlyListener, ScopedSessionStore};
//!
//! # async fn run() -> Result<(), freightdesk_gateway::GatewayError> {
//! let client = GatewayClient::from_settings(
//!     &GatewaySettings::default(),
//!     Arc::new(ScopedSessionStore::in_memory()),
//!     Arc::new(LogOnlyListener),
//! )?;
//! client
//!     .auth()
//!     .login(&LoginRequest::new("ops@example.com", "secret"), true)
//!     .await?;
//! let shipments: serde_json::Value = client.shipments().list(&ShipmentQuery::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod session;

pub use client::{BinaryPayload, GatewayClient, GatewayResponse, LogOnlyListener, SessionListener};
pub use config::{resolve_base_url, GatewayConfig};
pub use endpoints::ListQuery;
pub use error::GatewayError;
pub use request::{FilePart, MultipartPayload, RequestBody, RequestDescriptor, ResponseKind};
pub use session::{
    CredentialStorage, FileStorage, MemoryStorage, ScopedSessionStore, SessionCredential,
    SessionError, SessionStore, StorageScope,
};

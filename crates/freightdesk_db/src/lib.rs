//! Datastore bootstrap for FreightDesk
//!
//! Builds the bounded PostgreSQL connection pool the API server side of the
//! system talks to: at most 20 connections, idle connections evicted after
//! 30 seconds, and a 10 second limit on acquiring one. TLS is required in
//! production and whenever the connection string asks for it; certificates
//! are not verified, so cloud-managed and self-signed certificates work.
//!
//! # Example
//!
//! ```rust,no_run
//! use freightdesk_config::AppConfig;
//! use freightdesk_db::DbClient;
//!
//! async fn setup_db(config: &AppConfig) -> Result<DbClient, freightdesk_db::DbError> {
//!     let db = DbClient::new(config).await?;
//!     if !db.is_healthy().await {
//!         tracing::warn!("database is not answering yet");
//!     }
//!     Ok(db)
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{requires_tls, DbClient, ACQUIRE_TIMEOUT, IDLE_TIMEOUT, MAX_CONNECTIONS};
pub use error::DbError;

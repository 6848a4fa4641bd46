//! Database client for FreightDesk
//!
//! Wraps a bounded PostgreSQL pool. The pool is an external collaborator of
//! the gateway: nothing here runs queries beyond a health check.

use crate::error::DbError;
use freightdesk_config::{AppConfig, DatabaseConfig, DeploymentMode};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Upper bound on concurrently open connections.
pub const MAX_CONNECTIONS: u32 = 20;
/// Idle connections are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30);
/// How long a caller waits for a free connection before giving up.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

const TLS_SSL_MODES: [&str; 3] = ["require", "verify-ca", "verify-full"];
// sqlx accepts both spellings.
const SSL_MODE_KEYS: [&str; 2] = ["sslmode", "ssl-mode"];

/// Whether connections must be encrypted: always in production, otherwise
/// only when the connection string carries a TLS `sslmode`.
pub fn requires_tls(mode: DeploymentMode, url: &str) -> bool {
    if mode.is_production() {
        return true;
    }
    let Some((_, query)) = url.split_once('?') else {
        return false;
    };
    let params: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(params) => params,
        Err(e) => {
            debug!("Unparseable database URL query, assuming no TLS: {}", e);
            return false;
        }
    };
    params.iter().any(|(key, value)| {
        SSL_MODE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
            && TLS_SSL_MODES.iter().any(|m| m.eq_ignore_ascii_case(value))
    })
}

/// Pooled PostgreSQL client.
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    /// Connect using the application configuration.
    ///
    /// # Errors
    ///
    /// * the `database` section is missing or its URL is empty
    /// * the URL cannot be parsed
    /// * the first connection cannot be established
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;
        Self::from_config(db_config, config.gateway.mode).await
    }

    /// Connect eagerly; fails if the database cannot be reached now.
    pub async fn from_config(db_config: &DatabaseConfig, mode: DeploymentMode) -> Result<Self, DbError> {
        let options = connect_options(&db_config.url, mode)?;
        let pool = pool_options()
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::from(e)
            })?;
        info!("Database pool created successfully");
        Ok(Self { pool })
    }

    /// Build the pool without opening a connection; the first query connects.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn connect_lazy(db_config: &DatabaseConfig, mode: DeploymentMode) -> Result<Self, DbError> {
        let options = connect_options(&db_config.url, mode)?;
        Ok(Self {
            pool: pool_options().connect_lazy_with(options),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `SELECT 1` against the pool.
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close every connection and wait for them to be released.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .idle_timeout(IDLE_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

fn connect_options(url: &str, mode: DeploymentMode) -> Result<PgConnectOptions, DbError> {
    if url.trim().is_empty() {
        return Err(DbError::ConfigError("Database URL is empty".to_string()));
    }
    let options = PgConnectOptions::from_str(url).map_err(|e| DbError::UrlError(e.to_string()))?;
    if requires_tls(mode, url) {
        debug!("Database connections require TLS; certificate verification disabled");
        // Require encrypts without checking the certificate chain.
        Ok(options.ssl_mode(PgSslMode::Require))
    } else {
        Ok(options)
    }
}

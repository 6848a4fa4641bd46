//! Error types for the database client

use freightdesk_common::FreightdeskError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// No connection became free within the acquire timeout
    #[error("Timed out waiting for a database connection")]
    PoolTimeout,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::PoolTimeout,
            sqlx::Error::Configuration(e) => DbError::UrlError(e.to_string()),
            other => DbError::SqlxError(other),
        }
    }
}

/// Convert DbError to FreightdeskError
impl From<DbError> for FreightdeskError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) | DbError::UrlError(msg) => FreightdeskError::ConfigError(msg),
            DbError::PoolTimeout => {
                FreightdeskError::TimeoutError("database connection pool exhausted".to_string())
            }
            other => FreightdeskError::DatabaseError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_recognised() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::PoolTimeout));
        assert!(matches!(
            FreightdeskError::from(err),
            FreightdeskError::TimeoutError(_)
        ));
    }

    #[test]
    fn other_failures_become_database_errors() {
        let err: FreightdeskError = DbError::from(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, FreightdeskError::DatabaseError(ref m) if m.contains("closed")));
    }
}

//! # Database Pool Management
//!
//! Connection pool creation and configuration for PostgreSQL.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Service startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(url) ← Configure pool settings                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← Create pool                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │              PgPool                     │                            │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐        │                            │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...    │  (max_connections)         │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘        │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ Concurrent access from request handlers                         │
//! │       ▼                                                                 │
//! │  db.lookup()    ──► validation-time point lookups                       │
//! │  db.purchases() ──► persist / read purchases                            │
//! │  db.vouchers()  ──► persist / read vouchers                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Schema DDL lives with the deployment, not this crate; `connect` assumes
//! the tables in [`crate::catalog::schema_catalog`] already exist.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

use crate::catalog::schema_catalog;
use crate::error::{DbError, DbResult};
use crate::lookup::PgStorageLookup;
use crate::repository::purchase::PurchaseRepository;
use crate::repository::voucher::VoucherRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("postgres://folio@localhost/folio")
///     .max_connections(10)
///     .min_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    /// Default: 10
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection.
    /// Default: 30 seconds
    pub acquire_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given connection URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        DbConfig {
            database_url: database_url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing the lookup port and repository access.
///
/// Cheap to clone; all clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection failed
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            max_connections = config.max_connections,
            "Initializing database connection"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect(&config.database_url)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!("Database pool created");
        Ok(Database { pool })
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories; prefer repository
    /// methods when available.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the storage lookup port for the validation engine.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let dispatcher = Dispatcher::new(db.lookup());
    /// ```
    pub fn lookup(&self) -> PgStorageLookup {
        PgStorageLookup::new(self.pool.clone(), schema_catalog())
    }

    /// Returns the purchase repository.
    pub fn purchases(&self) -> PurchaseRepository {
        PurchaseRepository::new(self.pool.clone())
    }

    /// Returns the discount voucher repository.
    pub fn vouchers(&self) -> VoucherRepository {
        VoucherRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("postgres://folio@localhost/folio")
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(5));

        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }
}

//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PostgreSQL Error (sqlx::Error)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HTTP layer maps to a status code (outside this workspace)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories speak `DbError`. The lookup port speaks
//! `folio_validate::LookupError`; its mapping lives in [`crate::lookup`].

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation (PostgreSQL error code 23505).
    ///
    /// ## When This Occurs
    /// - Duplicate voucher code
    /// - Duplicate author email
    /// - Lost race after a clean uniqueness validation
    #[error("duplicate {constraint}: value already exists")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation (PostgreSQL error code 23503).
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// A row read back from storage violates a domain invariant
    /// (unparseable email, zero-percent voucher). Indicates the row was
    /// written by something that bypassed validation.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound            → DbError::NotFound
/// sqlx::Error::Database code 23505    → DbError::UniqueViolation
/// sqlx::Error::Database code 23503    → DbError::ForeignKeyViolation
/// sqlx::Error::PoolTimedOut           → DbError::PoolExhausted
/// Other                               → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                // PostgreSQL SQLSTATE codes: 23505 unique, 23503 foreign key
                match db_err.code().as_deref() {
                    Some("23505") => DbError::UniqueViolation {
                        constraint: db_err
                            .constraint()
                            .unwrap_or("unknown constraint")
                            .to_string(),
                    },
                    Some("23503") => DbError::ForeignKeyViolation {
                        message: db_err.message().to_string(),
                    },
                    _ => DbError::QueryFailed(db_err.message().to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

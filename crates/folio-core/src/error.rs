//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  └── CoreError       - constructing domain values from bad input       │
//! │                                                                         │
//! │  folio-validate errors (separate crate)                                │
//! │  ├── LookupError     - storage unavailable / contract breach           │
//! │  └── ConfigError     - bad rule declarations, caught at startup        │
//! │                                                                         │
//! │  folio-db errors (separate crate)                                      │
//! │  └── DbError         - database operation failures                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the split: a rule violation in a *request* is not an error at all.
//! It is a `ValidationResult::Invalid` value returned to the caller.
//! `CoreError` only covers constructing domain types from data that should
//! already have been validated (e.g. a voucher row with a blank code).

use thiserror::Error;

/// Errors constructing core domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was empty or whitespace-only.
    #[error("{field} cannot be blank")]
    BlankField { field: &'static str },

    /// A voucher percentage must be greater than zero.
    #[error("discount percentage must be greater than zero")]
    NonPositivePercent,

    /// The string is not a syntactically valid email address.
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BlankField { field: "code" };
        assert_eq!(err.to_string(), "code cannot be blank");

        let err = CoreError::InvalidEmail("nope".to_string());
        assert_eq!(err.to_string(), "invalid email: nope");
    }
}

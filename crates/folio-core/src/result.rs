//! # Validation Result Algebra
//!
//! The outcome of validating a request, and how outcomes combine.
//!
//! ## The Merge
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Valid      + X          = X                                            │
//! │  X          + Valid      = X                                            │
//! │  Invalid(a) + Invalid(b) = Invalid(a ++ b)                              │
//! │                                                                         │
//! │  Associative, with Valid as the identity on both sides.                 │
//! │  Reason order is evaluation order and is test-visible.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected request is NOT an error: `Invalid` is a normal return value the
//! caller maps to a 4xx body. Infrastructure failures travel on a separate
//! error channel entirely (see the engine crate's `LookupError`).

use serde::{Deserialize, Serialize};

/// The outcome of running validation rules against a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    /// No rule objected.
    Valid,
    /// At least one rule objected; reasons in evaluation order.
    Invalid(Vec<String>),
}

impl ValidationResult {
    /// A single-reason rejection.
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationResult::Invalid(vec![reason.into()])
    }

    /// Builds a result from collected reasons; no reasons means `Valid`.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(reasons)
        }
    }

    /// Whether the request passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The collected reasons (empty for `Valid`).
    pub fn reasons(&self) -> &[String] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(reasons) => reasons,
        }
    }

    /// The named associative combine. Total: defined for every pair.
    ///
    /// Reasons from `self` precede reasons from `other`, preserving
    /// evaluation order for deterministic assertions.
    pub fn merge(self, other: ValidationResult) -> ValidationResult {
        match (self, other) {
            (ValidationResult::Valid, other) => other,
            (this, ValidationResult::Valid) => this,
            (ValidationResult::Invalid(mut a), ValidationResult::Invalid(b)) => {
                a.extend(b);
                ValidationResult::Invalid(a)
            }
        }
    }
}

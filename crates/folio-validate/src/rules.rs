//! # Field Rules
//!
//! Declarative per-field constraints, evaluated without any knowledge of the
//! enclosing request's semantics.
//!
//! ## Declare Once, Apply to Every Instance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  impl Tagged for AuthorRequest {                                        │
//! │      fn tagged_fields() -> &'static [FieldSpec<Self>] {                 │
//! │          &[                                                             │
//! │              FieldSpec { name: "name",  rule: Required,      get: .. }, │
//! │              FieldSpec { name: "email", rule: Unique{..},    get: .. }, │
//! │          ]                                                              │
//! │      }                                                                  │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The predecessor system discovered these by reflecting over annotated
//! members per request. Here the declaration is a static table of
//! `(name, getter, rule)` triples per request type: resolved once, checked
//! against the schema catalog at startup, zero runtime introspection.
//!
//! ## Evaluation contract
//! - every field is evaluated, unconditionally - two bad fields, two reasons
//! - blank violations read `"<name> cannot be blank"`
//! - uniqueness hits are bucketed separately and surfaced as a single
//!   `DUPLICATED_FIELDS: ...` reason, so callers can tell "already exists"
//!   apart from "missing"
//! - reasons come out in declaration order; lookups run sequentially, which
//!   makes that ordering trivial (fan-out would have to re-sort)

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use folio_core::result::ValidationResult;

use crate::storage::{LookupError, StorageLookup};

// =============================================================================
// Declarations
// =============================================================================

/// The constraint a tagged field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be non-blank (not empty, not whitespace-only).
    Required,
    /// Value must not already exist in `table.column`.
    Unique {
        table: &'static str,
        column: &'static str,
    },
}

/// One tagged field: a name, a getter, and the rule it carries.
///
/// The getter is a plain fn pointer so declarations can live in statics.
/// A field may appear in several specs when it carries several rules.
pub struct FieldSpec<R> {
    pub name: &'static str,
    pub rule: FieldRule,
    pub get: fn(&R) -> &str,
}

/// A request type that declares tagged fields.
///
/// The default is "no tagged fields", which makes every rule-less type
/// trivially `Valid` under field evaluation.
///
/// The `'static` bound comes with the territory: declarations are static
/// tables of `FieldSpec<Self>`, so the type itself cannot borrow.
pub trait Tagged: 'static {
    fn tagged_fields() -> &'static [FieldSpec<Self>]
    where
        Self: Sized,
    {
        &[]
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates every tagged field of `request` against storage.
///
/// No short-circuit: all fields are checked so the client gets the complete
/// picture in one round trip. Only a [`LookupError`] aborts.
pub async fn evaluate<R: Tagged>(
    request: &R,
    storage: &dyn StorageLookup,
) -> Result<ValidationResult, LookupError> {
    let mut reasons = Vec::new();
    let mut duplicated: Vec<&'static str> = Vec::new();

    for spec in R::tagged_fields() {
        let value = (spec.get)(request);
        match spec.rule {
            FieldRule::Required => {
                if value.trim().is_empty() {
                    reasons.push(format!("{} cannot be blank", spec.name));
                }
            }
            FieldRule::Unique { table, column } => {
                if storage.exists(table, column, value).await? {
                    duplicated.push(spec.name);
                }
            }
        }
    }

    if !duplicated.is_empty() {
        reasons.push(format!("DUPLICATED_FIELDS: {}", duplicated.join(", ")));
    }

    debug!(
        fields = R::tagged_fields().len(),
        violations = reasons.len(),
        "field rules evaluated"
    );
    Ok(ValidationResult::from_reasons(reasons))
}

// =============================================================================
// Startup Contract Checks
// =============================================================================

/// The tables and columns the storage layer actually serves.
///
/// Built by the storage implementation, consumed here to fail bad rule
/// declarations at startup instead of at request time.
#[derive(Debug, Default, Clone)]
pub struct SchemaCatalog {
    tables: BTreeMap<&'static str, &'static [&'static str]>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table and its columns.
    pub fn table(mut self, name: &'static str, columns: &'static [&'static str]) -> Self {
        self.tables.insert(name, columns);
        self
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|columns| columns.contains(&column))
    }
}

/// A rule declaration that cannot be served by the storage schema.
///
/// Fatal at registration; a live request must never be the first thing to
/// discover a typo'd table name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unique rule on field `{field}` references unknown table `{table}`")]
    UnknownTable {
        field: &'static str,
        table: &'static str,
    },

    #[error("unique rule on field `{field}` references unknown column `{table}.{column}`")]
    UnknownColumn {
        field: &'static str,
        table: &'static str,
        column: &'static str,
    },
}

/// Checks one request type's declarations against the catalog.
pub fn verify_declarations<R: Tagged>(catalog: &SchemaCatalog) -> Result<(), ConfigError> {
    for spec in R::tagged_fields() {
        if let FieldRule::Unique { table, column } = spec.rule {
            if !catalog.has_table(table) {
                return Err(ConfigError::UnknownTable {
                    field: spec.name,
                    table,
                });
            }
            if !catalog.has_column(table, column) {
                return Err(ConfigError::UnknownColumn {
                    field: spec.name,
                    table,
                    column,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStorage;

    struct Signup {
        username: String,
        email: String,
    }

    impl Tagged for Signup {
        fn tagged_fields() -> &'static [FieldSpec<Self>] {
            &[
                FieldSpec {
                    name: "username",
                    rule: FieldRule::Required,
                    get: |r| &r.username,
                },
                FieldSpec {
                    name: "email",
                    rule: FieldRule::Required,
                    get: |r| &r.email,
                },
                FieldSpec {
                    name: "email",
                    rule: FieldRule::Unique {
                        table: "authors",
                        column: "email",
                    },
                    get: |r| &r.email,
                },
            ]
        }
    }

    #[tokio::test]
    async fn test_all_blank_fields_reported() {
        let request = Signup {
            username: "   ".to_string(),
            email: String::new(),
        };
        let result = evaluate(&request, &FakeStorage::new()).await.unwrap();

        // Both violations, in declaration order
        assert_eq!(
            result.reasons(),
            ["username cannot be blank", "email cannot be blank"]
        );
    }

    #[tokio::test]
    async fn test_duplicated_fields_bucketed_separately() {
        let storage =
            FakeStorage::new().with_value("authors", "email", "taken@example.com");
        let request = Signup {
            username: "ada".to_string(),
            email: "taken@example.com".to_string(),
        };
        let result = evaluate(&request, &storage).await.unwrap();

        assert_eq!(result.reasons(), ["DUPLICATED_FIELDS: email"]);
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_coexist() {
        let storage =
            FakeStorage::new().with_value("authors", "email", "taken@example.com");
        let request = Signup {
            username: String::new(),
            email: "taken@example.com".to_string(),
        };
        let result = evaluate(&request, &storage).await.unwrap();

        // Blank reasons first, then the duplicate bucket
        assert_eq!(
            result.reasons(),
            ["username cannot be blank", "DUPLICATED_FIELDS: email"]
        );
    }

    #[tokio::test]
    async fn test_clean_request_is_valid() {
        let request = Signup {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let result = evaluate(&request, &FakeStorage::new()).await.unwrap();
        assert!(result.is_valid());
    }

    #[tokio::test]
    async fn test_lookup_outage_propagates_as_error() {
        let storage = FakeStorage::new().failing();
        let request = Signup {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let result = evaluate(&request, &storage).await;
        assert!(matches!(result, Err(LookupError::Unavailable(_))));
    }

    #[test]
    fn test_verify_declarations_accepts_known_schema() {
        let catalog = SchemaCatalog::new().table("authors", &["id", "name", "email"]);
        assert_eq!(verify_declarations::<Signup>(&catalog), Ok(()));
    }

    #[test]
    fn test_verify_declarations_rejects_unknown_table() {
        let catalog = SchemaCatalog::new().table("categories", &["id", "name"]);
        assert_eq!(
            verify_declarations::<Signup>(&catalog),
            Err(ConfigError::UnknownTable {
                field: "email",
                table: "authors",
            })
        );
    }

    #[test]
    fn test_verify_declarations_rejects_unknown_column() {
        let catalog = SchemaCatalog::new().table("authors", &["id", "name"]);
        assert_eq!(
            verify_declarations::<Signup>(&catalog),
            Err(ConfigError::UnknownColumn {
                field: "email",
                table: "authors",
                column: "email",
            })
        );
    }
}

//! # Validation Dispatcher
//!
//! The single entry point of the write path: takes any request, runs the
//! rules it declares, and merges the outcomes into one result.
//!
//! ## Orchestration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request ──► Dispatcher::validate                                       │
//! │                  │                                                      │
//! │                  ├── field rules (rules::evaluate)                      │
//! │                  │      Required / Unique, declaration order            │
//! │                  │                                                      │
//! │                  ├── consistency hook (if the type has one)             │
//! │                  │      cross-field / cross-entity checks               │
//! │                  │                                                      │
//! │                  └── merge: field reasons first, hook reasons after     │
//! │                                                                         │
//! │  no tagged fields + no hook  ⇒  Valid (nothing to reject)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dispatcher never looks at field values itself. The consistency hook is
//! an explicit capability the request type opts into - presence of the trait,
//! never name-based dispatch.

use async_trait::async_trait;
use tracing::debug;

use folio_core::result::ValidationResult;

use crate::rules::{self, Tagged};
use crate::storage::{LookupError, StorageLookup};

/// Request-type-specific cross-field and cross-entity checks.
///
/// Implementations collect every violation rather than stopping at the
/// first, except where a later check depends on an earlier one's outcome.
#[async_trait]
pub trait ConsistencyCheck: Sync {
    async fn check(&self, storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError>;
}

/// A request that opts into validation.
///
/// Both halves default to "nothing declared": a type with no tagged fields
/// and no hook dispatches straight to `Valid`.
pub trait ValidateRequest: Tagged + Sync {
    /// The type's consistency hook, if it has one.
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        None
    }
}

/// Orchestrates validation for every request type.
///
/// Holds the storage port injected at construction; lifecycle belongs to the
/// surrounding service.
pub struct Dispatcher<S> {
    storage: S,
}

impl<S: StorageLookup> Dispatcher<S> {
    pub fn new(storage: S) -> Self {
        Dispatcher { storage }
    }

    /// The underlying storage port (handy for callers that persist after
    /// validating).
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates one request: field rules, then the consistency hook, merged
    /// in that order so reason order is deterministic.
    ///
    /// `Err` means infrastructure trouble, not a rejected request.
    pub async fn validate<R: ValidateRequest>(
        &self,
        request: &R,
    ) -> Result<ValidationResult, LookupError> {
        let fields = rules::evaluate(request, &self.storage).await?;

        let consistency = match request.consistency() {
            Some(hook) => hook.check(&self.storage).await?,
            None => ValidationResult::Valid,
        };

        let result = fields.merge(consistency);
        debug!(
            request = std::any::type_name::<R>(),
            valid = result.is_valid(),
            reasons = result.reasons().len(),
            "request dispatched"
        );
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FieldRule, FieldSpec};
    use crate::testing::FakeStorage;

    /// A request with no tagged fields and no hook.
    struct Ping;
    impl Tagged for Ping {}
    impl ValidateRequest for Ping {}

    /// A request with one Required field and a hook that always objects.
    struct Grumpy {
        note: String,
    }

    impl Tagged for Grumpy {
        fn tagged_fields() -> &'static [FieldSpec<Self>] {
            &[FieldSpec {
                name: "note",
                rule: FieldRule::Required,
                get: |r| &r.note,
            }]
        }
    }

    #[async_trait]
    impl ConsistencyCheck for Grumpy {
        async fn check(
            &self,
            _storage: &dyn StorageLookup,
        ) -> Result<ValidationResult, LookupError> {
            Ok(ValidationResult::invalid("hook objection"))
        }
    }

    impl ValidateRequest for Grumpy {
        fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
            Some(self)
        }
    }

    #[tokio::test]
    async fn test_no_rules_means_valid() {
        let dispatcher = Dispatcher::new(FakeStorage::new());
        let result = dispatcher.validate(&Ping).await.unwrap();
        assert!(result.is_valid());
    }

    #[tokio::test]
    async fn test_field_reasons_precede_hook_reasons() {
        let dispatcher = Dispatcher::new(FakeStorage::new());
        let result = dispatcher
            .validate(&Grumpy { note: String::new() })
            .await
            .unwrap();
        assert_eq!(result.reasons(), ["note cannot be blank", "hook objection"]);
    }

    #[tokio::test]
    async fn test_hook_alone_still_rejects() {
        let dispatcher = Dispatcher::new(FakeStorage::new());
        let result = dispatcher
            .validate(&Grumpy { note: "fine".to_string() })
            .await
            .unwrap();
        assert_eq!(result.reasons(), ["hook objection"]);
    }

    #[tokio::test]
    async fn test_outage_aborts_dispatch() {
        struct NeedsLookup {
            code: String,
        }
        impl Tagged for NeedsLookup {
            fn tagged_fields() -> &'static [FieldSpec<Self>] {
                &[FieldSpec {
                    name: "code",
                    rule: FieldRule::Unique {
                        table: "discount_vouchers",
                        column: "code",
                    },
                    get: |r| &r.code,
                }]
            }
        }
        impl ValidateRequest for NeedsLookup {}

        let dispatcher = Dispatcher::new(FakeStorage::new().failing());
        let result = dispatcher
            .validate(&NeedsLookup { code: "X".to_string() })
            .await;
        assert!(matches!(result, Err(LookupError::Unavailable(_))));
    }
}

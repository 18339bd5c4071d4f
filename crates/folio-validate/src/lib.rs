//! # folio-validate: Request Validation Engine
//!
//! The write-path gatekeeper: every mutating request is dispatched through
//! this crate before anything touches storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   HTTP layer (out of scope)                                             │
//! │        │ deserialized request                                           │
//! │        ▼                                                                │
//! │   ★ folio-validate (THIS CRATE) ★                                       │
//! │                                                                         │
//! │   ┌────────────┐   ┌───────────┐   ┌──────────────────────────────┐    │
//! │   │ dispatcher │──►│   rules   │   │ purchase / requests          │    │
//! │   │            │   │ Required  │   │ consistency hooks            │    │
//! │   │            │──►│ Unique    │   │ (cross-field, cross-entity)  │    │
//! │   └─────┬──────┘   └─────┬─────┘   └──────────────┬───────────────┘    │
//! │         │                │ StorageLookup (port)   │                    │
//! │         ▼                ▼                        ▼                    │
//! │   folio-db: PgStorageLookup ──────────────► PostgreSQL                 │
//! │                                                                         │
//! │   folio-core: Money, Document, ValidationResult, domain types          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! - A rejected request is a **value**: `ValidationResult::Invalid(reasons)`,
//!   every violation collected in one pass.
//! - An unreachable backend is an **error**: `LookupError`, aborting the
//!   dispatch. The two never mix.
//! - Rule declarations are static tables checked against the storage schema
//!   at startup ([`requests::verify_registry`]); a typo'd table name is a
//!   boot failure, not a runtime surprise.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dispatcher;
pub mod purchase;
pub mod requests;
pub mod rules;
pub mod storage;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dispatcher::{ConsistencyCheck, Dispatcher, ValidateRequest};
pub use requests::{
    verify_registry, AuthorRequest, BookRequest, CategoryRequest, CountryRequest,
    CountryStateRequest, DiscountVoucherRequest,
};
pub use purchase::{BasketRequest, ItemRequest, PurchaseRequest};
pub use rules::{ConfigError, FieldRule, FieldSpec, SchemaCatalog, Tagged};
pub use storage::{LookupError, StorageLookup};

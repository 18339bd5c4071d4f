//! # folio-db: PostgreSQL Storage for the Folio Bookstore Backend
//!
//! Owns every database operation: the lookup port the validation engine runs
//! against, and the repositories that persist validated domain types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   folio-validate                                                        │
//! │        │ StorageLookup (trait, defined there)                           │
//! │        ▼                                                                │
//! │   ★ folio-db (THIS CRATE) ★                                             │
//! │                                                                         │
//! │   ┌──────────┐  ┌─────────┐  ┌──────────┐  ┌──────────────────────┐    │
//! │   │   pool   │  │ catalog │  │  lookup  │  │      repository      │    │
//! │   │ DbConfig │  │ tables/ │  │ PgStorage│  │  purchases, vouchers │    │
//! │   │ Database │  │ columns │  │  Lookup  │  │                      │    │
//! │   └──────────┘  └─────────┘  └──────────┘  └──────────────────────┘    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   PostgreSQL                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Order
//!
//! 1. `Database::connect(config)` builds the pool
//! 2. `verify_registry(&schema_catalog())` proves every declared rule is
//!    servable - a typo'd table name fails here, not on a live request
//! 3. `Dispatcher::new(db.lookup())` wires validation to storage

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::schema_catalog;
pub use error::{DbError, DbResult};
pub use lookup::PgStorageLookup;
pub use pool::{Database, DbConfig};
pub use repository::purchase::PurchaseRepository;
pub use repository::voucher::VoucherRepository;

//! # Storage Lookup Port
//!
//! Read-only point lookups the validation rules are allowed to make.
//!
//! ## Port, not Implementation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  folio-validate                          folio-db                       │
//! │                                                                         │
//! │  StorageLookup (trait) ◄─────────────── PgStorageLookup (impl)          │
//! │       ▲                                                                 │
//! │       │ injected at construction                                        │
//! │  Dispatcher / rules                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is a suspension point: it may block the calling task while
//! the row comes back, but never another request's validation. All methods
//! are read-only; the validation core never writes.
//!
//! ## Two failure channels
//! "Not found" is a normal empty result (`Ok(false)` / `Ok(None)`).
//! [`LookupError`] is the infrastructure channel: the backend is unreachable
//! or the call broke the lookup contract. It aborts the remaining checks for
//! the request and must never be presented as a validation reason, or a
//! backend outage would read as "your input is wrong".

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use folio_core::money::Money;
use folio_core::types::DiscountVoucher;

/// Well-known table names used by rule declarations.
pub mod tables {
    pub const AUTHORS: &str = "authors";
    pub const CATEGORIES: &str = "categories";
    pub const BOOKS: &str = "books";
    pub const COUNTRIES: &str = "countries";
    pub const COUNTRY_STATES: &str = "country_states";
    pub const DISCOUNT_VOUCHERS: &str = "discount_vouchers";
    pub const PURCHASES: &str = "purchases";
}

/// Infrastructure failure during a lookup.
///
/// Distinct from a validation failure by construction: rules return
/// `ValidationResult`, lookups return `Result<_, LookupError>`.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The storage backend could not answer (connection, timeout).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The call itself was malformed (unknown table/column identifier).
    /// Reaching this at request time means a registration check was skipped.
    #[error("lookup contract violation: {0}")]
    Contract(String),
}

/// Read-only storage lookups available to validation rules.
#[async_trait]
pub trait StorageLookup: Send + Sync {
    /// Does any row of `table` have `column == value`?
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError>;

    /// Does `table` contain a row with this id?
    async fn row_exists(&self, table: &str, id: i64) -> Result<bool, LookupError>;

    /// Finds a row id by the `name` column.
    async fn find_by_name(&self, table: &str, name: &str) -> Result<Option<i64>, LookupError>;

    /// Does the parent row have at least one child via `foreign_key`?
    async fn has_children(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        foreign_key: &str,
    ) -> Result<bool, LookupError>;

    /// Does the parent row have a child with this `name`?
    async fn child_named_exists(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        foreign_key: &str,
        name: &str,
    ) -> Result<bool, LookupError>;

    /// Unit prices for the requested book ids. Ids without a catalog entry
    /// are simply absent from the map; that absence is the signal the
    /// purchase validator acts on.
    async fn find_price_map(
        &self,
        ids: &BTreeSet<i64>,
    ) -> Result<HashMap<i64, Money>, LookupError>;

    /// Resolves a discount code to its voucher, consumption state included.
    async fn find_voucher(&self, code: &str) -> Result<Option<DiscountVoucher>, LookupError>;
}

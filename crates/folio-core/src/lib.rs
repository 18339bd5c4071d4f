//! # folio-core: Pure Business Logic for the Folio Bookstore Backend
//!
//! This crate is the **heart** of the Folio write-path. It contains the
//! business logic that the validation engine and the storage layer both lean
//! on, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  HTTP layer (out of scope)                      │   │
//! │  │     deserialized request ──► dispatch ──► 201 / 4xx            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                folio-validate (engine crate)                    │   │
//! │  │     dispatcher • field rules • purchase consistency             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ document  │  │  result   │  │   types   │  │   │
//! │  │   │   Money   │  │ CPF/CNPJ  │  │  merge    │  │  Order    │  │   │
//! │  │   │  Percent  │  │ checksums │  │  algebra  │  │  Voucher  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`document`] - CPF/CNPJ checksum classification
//! - [`email`] - practical email syntax check
//! - [`result`] - the `Valid | Invalid` sum type and its merge
//! - [`types`] - domain types (Order, DiscountVoucher, Country, Purchase)
//! - [`error`] - domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input, same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64) to keep the
//!    validator's exact-equality total check honest
//! 4. **Rejections are values**: an invalid request is `Invalid(reasons)`,
//!    never an `Err`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod email;
pub mod error;
pub mod money;
pub mod result;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Money` instead of
// `use folio_core::money::Money`

pub use document::Document;
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use result::ValidationResult;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum catalog price for a book, in cents.
///
/// ## Business Reason
/// The store does not list books below this price; the book-request
/// validator enforces it before a row is ever written.
pub const MIN_BOOK_PRICE_CENTS: i64 = 2_000;

/// Minimum page count for a listed book.
pub const MIN_BOOK_PAGES: i64 = 100;

/// Maximum length of a book summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 500;

/// Maximum length of an author description, in characters.
pub const MAX_AUTHOR_DESCRIPTION_CHARS: usize = 400;

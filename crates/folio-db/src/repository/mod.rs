//! # Repository Module
//!
//! Database repository implementations for the Folio backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler (outside this workspace)                                  │
//! │       │                                                                 │
//! │       │  1. dispatcher.validate(&request).await?   ← folio-validate     │
//! │       │  2. db.purchases().insert(&purchase, code) ← this module        │
//! │       ▼                                                                 │
//! │  PurchaseRepository / VoucherRepository                                 │
//! │       │  SQL, bound parameters only                                     │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories persist **validated** domain types, never raw requests. The
//! write path is: dispatch, convert, insert.
//!
//! ## Available Repositories
//!
//! - [`purchase::PurchaseRepository`] - persist and read purchases
//! - [`voucher::VoucherRepository`] - persist and read discount vouchers

pub mod purchase;
pub mod voucher;

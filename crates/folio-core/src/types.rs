//! # Domain Types
//!
//! Core domain types used throughout the Folio backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │ DiscountVoucher │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  total (Money)  │   │  code (unique)  │   │  email (Email)  │       │
//! │  │  items          │   │  percent (bps)  │   │  document       │       │
//! │  │  discount?      │   │  expires_at     │   │  order (Order)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Percent      │   │    Country      │   │  CountryState   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  id, name       │   │  name, country  │       │
//! │  │  1000 = 10.00%  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are validated elsewhere; the types here are either the validated
//! forms (`Purchase`, `Order`) or long-lived rows read back from storage
//! (`DiscountVoucher`, `Country`). None of them touch I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::email::is_valid_email;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so a u32 carries a percentage at a fixed
/// two-decimal scale with no rounding: 1000 bps = 10.00%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from whole percent (10 → 10.00%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Percent(pct * 100)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Checks whether the percentage is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Email
// =============================================================================

/// A syntactically valid email address.
///
/// Construction goes through [`Email::parse`]; holding an `Email` means the
/// syntax check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parses and validates an email address.
    pub fn parse(value: &str) -> CoreResult<Self> {
        if value.trim().is_empty() {
            return Err(CoreError::BlankField { field: "email" });
        }
        if !is_valid_email(value) {
            return Err(CoreError::InvalidEmail(value.to_string()));
        }
        Ok(Email(value.to_string()))
    }

    /// Returns the address as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Discount Voucher
// =============================================================================

/// A discount voucher row, read back from storage.
///
/// Validity is two conditions, both checked at use time:
/// - not expired (`expires_at` still in the future)
/// - not consumed (no purchase has claimed the code yet)
///
/// An expired voucher must still be constructible: rows outlive their expiry
/// and the discount engine is specified to leave the order untouched for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountVoucher {
    pub id: i64,
    /// Unique business code typed in by the customer.
    pub code: String,
    /// Discount percentage at a fixed two-decimal scale.
    pub percent: Percent,
    /// Expiry timestamp; the voucher is unusable from this instant on.
    pub expires_at: DateTime<Utc>,
    /// Purchase that consumed this voucher, if any.
    pub used_on_purchase: Option<i64>,
}

impl DiscountVoucher {
    /// Creates a voucher, rejecting blank codes and non-positive percentages.
    pub fn new(
        id: i64,
        code: String,
        percent: Percent,
        expires_at: DateTime<Utc>,
        used_on_purchase: Option<i64>,
    ) -> CoreResult<Self> {
        if code.trim().is_empty() {
            return Err(CoreError::BlankField { field: "code" });
        }
        if !percent.is_positive() {
            return Err(CoreError::NonPositivePercent);
        }
        Ok(DiscountVoucher {
            id,
            code,
            percent,
            expires_at,
            used_on_purchase,
        })
    }

    /// Checks whether the voucher can still be applied at `now`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.used_on_purchase.is_none()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A discount already applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Amount subtracted from the order total.
    pub value: Money,
    /// Percentage that produced the value, in basis points.
    pub percent_bps: u32,
}

/// A single basket line: which book and how many copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub book_id: i64,
    pub quantity: i64,
}

/// A validated order: the total, its items, and an optional applied discount.
///
/// Persisted as a JSON payload on the purchase row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub total: Money,
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

impl Order {
    /// Applies a voucher, producing a new order with a recomputed total.
    ///
    /// ## Contract
    /// - An invalid voucher (expired or consumed) leaves the order unchanged.
    /// - This is a pure transform; the caller invokes it at most once per
    ///   order. Re-applying a voucher to an already-discounted order is not
    ///   guarded here.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, Utc};
    /// use folio_core::money::Money;
    /// use folio_core::types::{DiscountVoucher, Order, Percent};
    ///
    /// let order = Order { total: Money::from_cents(10_000), items: vec![], discount: None };
    /// let voucher = DiscountVoucher::new(
    ///     1, "TENOFF".into(), Percent::from_bps(1000), Utc::now() + Duration::days(1), None,
    /// ).unwrap();
    ///
    /// let discounted = order.apply_discount(&voucher, Utc::now());
    /// assert_eq!(discounted.total.cents(), 9_000);
    /// assert_eq!(discounted.discount.unwrap().value.cents(), 1_000);
    /// ```
    pub fn apply_discount(&self, voucher: &DiscountVoucher, now: DateTime<Utc>) -> Order {
        if !voucher.is_valid(now) {
            return self.clone();
        }

        let value = self.total.percentage_of(voucher.percent);
        Order {
            total: self.total - value,
            items: self.items.clone(),
            discount: Some(Discount {
                value,
                percent_bps: voucher.percent.bps(),
            }),
        }
    }
}

// =============================================================================
// Country / CountryState
// =============================================================================

/// A country row. Existence is always queried, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// A state within a country. Meaningless without its parent country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryState {
    pub name: String,
    pub country: String,
}

// =============================================================================
// Purchase
// =============================================================================

/// A fully validated purchase, ready to persist (or read back from storage).
///
/// The raw request never becomes a `Purchase` unless the dispatcher returned
/// `Valid`; the typed `Email` and classified `Document` encode that.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: i64,
    pub email: Email,
    pub name: String,
    pub last_name: String,
    pub document: Document,
    pub address: String,
    pub complement: String,
    pub city: String,
    pub country: String,
    pub country_state: Option<String>,
    pub phone: String,
    pub post_code: String,
    pub order: Order,
}

// =============================================================================
// Unit Tests
// =============================================================================

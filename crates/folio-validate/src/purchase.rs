//! # Purchase Validation
//!
//! The purchase request and its consistency hook - the deepest rule set in
//! the system, cross-referencing four entity families.
//!
//! ## The Eight Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. email syntax                                                        │
//! │  2. document classifies as CPF or CNPJ                                  │
//! │  3. country exists ──┐                                                  │
//! │  4. state checks   ◄─┘ (skipped when the country is unknown,            │
//! │                         required only when the country has states)      │
//! │  5. basket shape: total ≥ 0, items non-empty, quantities ≥ 0            │
//! │  6. every book id resolves ──┐                                          │
//! │  7. exact total equality   ◄─┘ (skipped on missing ids: comparing       │
//! │                                 against a partial price map would       │
//! │                                 produce a misleading second reason)     │
//! │  8. discount code resolves and is still usable                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything else runs unconditionally: the client gets every violation in
//! one response. The two arrows above are the only ordering dependencies, so
//! the checks run sequentially.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use folio_core::document::Document;
use folio_core::email::is_valid_email;
use folio_core::error::CoreResult;
use folio_core::money::Money;
use folio_core::result::ValidationResult;
use folio_core::types::{Email, Order, OrderItem, Purchase};

use crate::dispatcher::{ConsistencyCheck, ValidateRequest};
use crate::rules::{FieldRule, FieldSpec, Tagged};
use crate::storage::{tables, LookupError, StorageLookup};

// =============================================================================
// Request DTOs
// =============================================================================

/// An incoming purchase, exactly as deserialized. Nothing here is trusted
/// until the dispatcher returns `Valid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub document: String,
    pub address: String,
    pub complement: String,
    pub city: String,
    pub country: String,
    /// Conditionally required: only when the country has registered states.
    #[serde(default)]
    pub country_state: String,
    pub phone: String,
    pub post_code: String,
    pub basket: BasketRequest,
    #[serde(default)]
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketRequest {
    /// Client-computed total in cents; recomputed and compared server-side.
    pub total_cents: i64,
    pub items: Vec<ItemRequest>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemRequest {
    pub book_id: i64,
    pub quantity: i64,
}

impl BasketRequest {
    pub fn to_order(&self) -> Order {
        Order {
            total: Money::from_cents(self.total_cents),
            items: self
                .items
                .iter()
                .map(|item| OrderItem {
                    book_id: item.book_id,
                    quantity: item.quantity,
                })
                .collect(),
            discount: None,
        }
    }
}

impl PurchaseRequest {
    /// Converts a request the dispatcher accepted into the validated form.
    ///
    /// Still fallible: the typed constructors re-check what they encode, so
    /// a bug that skips dispatch cannot smuggle a bad email into a
    /// `Purchase`.
    pub fn into_purchase(&self, id: i64) -> CoreResult<Purchase> {
        Ok(Purchase {
            id,
            email: Email::parse(&self.email)?,
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            document: Document::classify(&self.document),
            address: self.address.clone(),
            complement: self.complement.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            country_state: if self.country_state.trim().is_empty() {
                None
            } else {
                Some(self.country_state.clone())
            },
            phone: self.phone.clone(),
            post_code: self.post_code.clone(),
            order: self.basket.to_order(),
        })
    }
}

// =============================================================================
// Tagged Fields
// =============================================================================

impl Tagged for PurchaseRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        // country_state is deliberately absent: blankness is conditional on
        // the country and handled by the consistency hook
        &[
            FieldSpec { name: "email", rule: FieldRule::Required, get: |r| &r.email },
            FieldSpec { name: "name", rule: FieldRule::Required, get: |r| &r.name },
            FieldSpec { name: "last_name", rule: FieldRule::Required, get: |r| &r.last_name },
            FieldSpec { name: "document", rule: FieldRule::Required, get: |r| &r.document },
            FieldSpec { name: "address", rule: FieldRule::Required, get: |r| &r.address },
            FieldSpec { name: "complement", rule: FieldRule::Required, get: |r| &r.complement },
            FieldSpec { name: "city", rule: FieldRule::Required, get: |r| &r.city },
            FieldSpec { name: "country", rule: FieldRule::Required, get: |r| &r.country },
            FieldSpec { name: "phone", rule: FieldRule::Required, get: |r| &r.phone },
            FieldSpec { name: "post_code", rule: FieldRule::Required, get: |r| &r.post_code },
        ]
    }
}

// =============================================================================
// Consistency Hook
// =============================================================================

#[async_trait]
impl ConsistencyCheck for PurchaseRequest {
    async fn check(&self, storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError> {
        let mut violations: Vec<String> = Vec::new();

        // 1. email syntax
        if !is_valid_email(&self.email) {
            violations.push("Email has to be valid".to_string());
        }

        // 2. document checksum
        if Document::classify(&self.document).is_invalid() {
            violations.push("Document is not a valid CPF/CNPJ".to_string());
        }

        // 3 + 4. country, then states gated on the country existing
        match storage.find_by_name(tables::COUNTRIES, &self.country).await? {
            None => violations.push("Country doesn't exist".to_string()),
            Some(country_id) => {
                let has_states = storage
                    .has_children(
                        tables::COUNTRIES,
                        country_id,
                        tables::COUNTRY_STATES,
                        "country_id",
                    )
                    .await?;
                if has_states {
                    if self.country_state.trim().is_empty() {
                        violations
                            .push(format!("State is required for country: {}", self.country));
                    } else if !storage
                        .child_named_exists(
                            tables::COUNTRIES,
                            country_id,
                            tables::COUNTRY_STATES,
                            "country_id",
                            &self.country_state,
                        )
                        .await?
                    {
                        violations.push("Invalid country state".to_string());
                    }
                }
            }
        }

        // 5. basket shape
        if self.basket.total_cents < 0 {
            violations.push("Basket has to be positive".to_string());
        }
        if self.basket.items.is_empty() {
            violations.push("Empty basket".to_string());
        }
        if self.basket.items.iter().any(|item| item.quantity < 0) {
            violations.push("Item quantity has to be positive".to_string());
        }

        // 6 + 7. catalog ids, then the exact total gated on all ids resolving
        let book_ids: BTreeSet<i64> = self.basket.items.iter().map(|i| i.book_id).collect();
        let prices = storage.find_price_map(&book_ids).await?;
        let missing: Vec<i64> = book_ids
            .iter()
            .copied()
            .filter(|id| !prices.contains_key(id))
            .collect();

        if !missing.is_empty() {
            violations.push(format!("Invalid book id {missing:?}"));
        } else {
            // Overflow in the recomputation can never equal an honest total
            let server_total = self
                .basket
                .items
                .iter()
                .try_fold(Money::zero(), |acc, item| {
                    prices[&item.book_id]
                        .checked_mul_quantity(item.quantity)
                        .and_then(|line| acc.checked_add(line))
                });
            if server_total != Some(Money::from_cents(self.basket.total_cents)) {
                violations.push("Invalid total".to_string());
            }
        }

        // 8. discount code
        if let Some(code) = &self.discount_code {
            match storage.find_voucher(code).await? {
                None => violations.push("Discount code doesn't exist".to_string()),
                Some(voucher) => {
                    if !voucher.is_valid(Utc::now()) {
                        violations.push("Discount code is not valid".to_string());
                    }
                }
            }
        }

        Ok(ValidationResult::from_reasons(violations))
    }
}

impl ValidateRequest for PurchaseRequest {
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        Some(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Catalog Requests
//!
//! The administrative write requests: authors, categories, books, countries,
//! states, and discount vouchers. Each declares its tagged fields and, where
//! one field's meaning depends on another row, a consistency hook.
//!
//! Simpler cousins of [`crate::purchase::PurchaseRequest`], all dispatched
//! through the same [`crate::dispatcher::Dispatcher`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::email::is_valid_email;
use folio_core::result::ValidationResult;
use folio_core::{MAX_AUTHOR_DESCRIPTION_CHARS, MAX_SUMMARY_CHARS, MIN_BOOK_PAGES, MIN_BOOK_PRICE_CENTS};

use crate::dispatcher::{ConsistencyCheck, ValidateRequest};
use crate::rules::{ConfigError, FieldRule, FieldSpec, SchemaCatalog, Tagged};
use crate::storage::{tables, LookupError, StorageLookup};

// =============================================================================
// Author
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub name: String,
    pub email: String,
    pub description: String,
}

impl Tagged for AuthorRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "name", rule: FieldRule::Required, get: |r| &r.name },
            FieldSpec {
                name: "name",
                rule: FieldRule::Unique { table: tables::AUTHORS, column: "name" },
                get: |r| &r.name,
            },
            FieldSpec { name: "email", rule: FieldRule::Required, get: |r| &r.email },
            FieldSpec {
                name: "email",
                rule: FieldRule::Unique { table: tables::AUTHORS, column: "email" },
                get: |r| &r.email,
            },
            FieldSpec { name: "description", rule: FieldRule::Required, get: |r| &r.description },
        ]
    }
}

#[async_trait]
impl ConsistencyCheck for AuthorRequest {
    async fn check(&self, _storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError> {
        let mut violations = Vec::new();
        if self.description.chars().count() > MAX_AUTHOR_DESCRIPTION_CHARS {
            violations.push(format!(
                "description cannot be greater than {MAX_AUTHOR_DESCRIPTION_CHARS} characters"
            ));
        }
        if !is_valid_email(&self.email) {
            violations.push("email has to be valid".to_string());
        }
        Ok(ValidationResult::from_reasons(violations))
    }
}

impl ValidateRequest for AuthorRequest {
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        Some(self)
    }
}

// =============================================================================
// Category / Country
// =============================================================================

/// Nothing to cross-check: a category is just a unique name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

impl Tagged for CategoryRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "name", rule: FieldRule::Required, get: |r| &r.name },
            FieldSpec {
                name: "name",
                rule: FieldRule::Unique { table: tables::CATEGORIES, column: "name" },
                get: |r| &r.name,
            },
        ]
    }
}

impl ValidateRequest for CategoryRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRequest {
    pub name: String,
}

impl Tagged for CountryRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "name", rule: FieldRule::Required, get: |r| &r.name },
            FieldSpec {
                name: "name",
                rule: FieldRule::Unique { table: tables::COUNTRIES, column: "name" },
                get: |r| &r.name,
            },
        ]
    }
}

impl ValidateRequest for CountryRequest {}

// =============================================================================
// Country State
// =============================================================================

/// A state is scoped to its country, so uniqueness is per-parent and lives in
/// the hook rather than a `Unique` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryStateRequest {
    pub name: String,
    pub country: String,
}

impl Tagged for CountryStateRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "name", rule: FieldRule::Required, get: |r| &r.name },
            FieldSpec { name: "country", rule: FieldRule::Required, get: |r| &r.country },
        ]
    }
}

#[async_trait]
impl ConsistencyCheck for CountryStateRequest {
    async fn check(&self, storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError> {
        let mut violations = Vec::new();
        match storage.find_by_name(tables::COUNTRIES, &self.country).await? {
            None => violations.push("country does not exist".to_string()),
            Some(country_id) => {
                let taken = storage
                    .child_named_exists(
                        tables::COUNTRIES,
                        country_id,
                        tables::COUNTRY_STATES,
                        "country_id",
                        &self.name,
                    )
                    .await?;
                if taken {
                    violations.push("state already exists".to_string());
                }
            }
        }
        Ok(ValidationResult::from_reasons(violations))
    }
}

impl ValidateRequest for CountryStateRequest {
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        Some(self)
    }
}

// =============================================================================
// Book
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub price_cents: i64,
    pub pages: i64,
    pub isbn: String,
    /// RFC 3339 timestamp; must parse and lie in the future.
    pub published_at: String,
    pub category_id: i64,
    pub author_id: i64,
}

impl Tagged for BookRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "title", rule: FieldRule::Required, get: |r| &r.title },
            FieldSpec { name: "summary", rule: FieldRule::Required, get: |r| &r.summary },
            FieldSpec { name: "isbn", rule: FieldRule::Required, get: |r| &r.isbn },
            FieldSpec { name: "published_at", rule: FieldRule::Required, get: |r| &r.published_at },
        ]
    }
}

#[async_trait]
impl ConsistencyCheck for BookRequest {
    async fn check(&self, storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError> {
        let mut violations = Vec::new();
        if self.summary.chars().count() > MAX_SUMMARY_CHARS {
            violations.push(format!("Summary must have at most {MAX_SUMMARY_CHARS} characters"));
        }
        if self.price_cents < MIN_BOOK_PRICE_CENTS {
            violations.push(format!("Price must be at least {}", MIN_BOOK_PRICE_CENTS / 100));
        }
        if self.pages < MIN_BOOK_PAGES {
            violations.push(format!("Pages must be at least {MIN_BOOK_PAGES}"));
        }
        match DateTime::parse_from_rfc3339(&self.published_at) {
            Ok(published_at) => {
                if published_at.with_timezone(&Utc) < Utc::now() {
                    violations.push("PublishedAt must be in the future".to_string());
                }
            }
            Err(_) => violations.push("PublishedAt must be in ISO8601 format".to_string()),
        }
        if !storage.row_exists(tables::CATEGORIES, self.category_id).await? {
            violations.push("Category does not exist".to_string());
        }
        if !storage.row_exists(tables::AUTHORS, self.author_id).await? {
            violations.push("Author does not exist".to_string());
        }
        Ok(ValidationResult::from_reasons(violations))
    }
}

impl ValidateRequest for BookRequest {
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        Some(self)
    }
}

// =============================================================================
// Discount Voucher
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountVoucherRequest {
    pub code: String,
    /// Discount in basis points; 1000 = 10%.
    pub discount_percent_bps: i64,
    /// RFC 3339 timestamp; must parse and lie in the future.
    pub expires_at: String,
}

impl Tagged for DiscountVoucherRequest {
    fn tagged_fields() -> &'static [FieldSpec<Self>] {
        &[
            FieldSpec { name: "code", rule: FieldRule::Required, get: |r| &r.code },
            FieldSpec {
                name: "code",
                rule: FieldRule::Unique { table: tables::DISCOUNT_VOUCHERS, column: "code" },
                get: |r| &r.code,
            },
            FieldSpec { name: "expires_at", rule: FieldRule::Required, get: |r| &r.expires_at },
        ]
    }
}

#[async_trait]
impl ConsistencyCheck for DiscountVoucherRequest {
    async fn check(&self, _storage: &dyn StorageLookup) -> Result<ValidationResult, LookupError> {
        let mut violations = Vec::new();
        if self.discount_percent_bps <= 0 {
            violations.push("discountPercentage must be greater than zero".to_string());
        }
        match DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(expires_at) => {
                if expires_at.with_timezone(&Utc) < Utc::now() {
                    violations.push("expiresAt must be in the future".to_string());
                }
            }
            Err(_) => violations.push("expiresAt must be in ISO8601 format".to_string()),
        }
        Ok(ValidationResult::from_reasons(violations))
    }
}

impl ValidateRequest for DiscountVoucherRequest {
    fn consistency(&self) -> Option<&dyn ConsistencyCheck> {
        Some(self)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Verifies every request type's rule declarations against the schema the
/// storage layer serves. Run once at startup, before any dispatch.
pub fn verify_registry(catalog: &SchemaCatalog) -> Result<(), ConfigError> {
    crate::rules::verify_declarations::<AuthorRequest>(catalog)?;
    crate::rules::verify_declarations::<CategoryRequest>(catalog)?;
    crate::rules::verify_declarations::<CountryRequest>(catalog)?;
    crate::rules::verify_declarations::<CountryStateRequest>(catalog)?;
    crate::rules::verify_declarations::<BookRequest>(catalog)?;
    crate::rules::verify_declarations::<DiscountVoucherRequest>(catalog)?;
    crate::rules::verify_declarations::<crate::purchase::PurchaseRequest>(catalog)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Purchase Repository
//!
//! Database operations for purchases.
//!
//! ## Row Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchases                                                              │
//! │                                                                         │
//! │  scalar columns: email, name, last_name, document, address,             │
//! │                  complement, city, country, country_state, phone,       │
//! │                  post_code, discount_code                               │
//! │                                                                         │
//! │  order_payload (JSONB): { "total": 4500,                                │
//! │                           "items": [{"book_id": 1, "quantity": 2}],     │
//! │                           "discount": {"value": 500, ...} }             │
//! │                                                                         │
//! │  discount_code doubles as the consumption marker: the voucher lookup's  │
//! │  left join finds it and reports the voucher as used                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only validated [`Purchase`] values come through here; the raw request
//! never reaches this module.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::document::Document;
use folio_core::types::{Email, Order, Purchase};

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

/// Raw purchase row; rehydrated into a [`Purchase`] via `try_into`.
#[derive(sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    email: String,
    name: String,
    last_name: String,
    document: String,
    address: String,
    complement: String,
    city: String,
    country: String,
    country_state: Option<String>,
    phone: String,
    post_code: String,
    order_payload: serde_json::Value,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DbError;

    fn try_from(row: PurchaseRow) -> DbResult<Purchase> {
        let email = Email::parse(&row.email)
            .map_err(|err| DbError::Corrupt(format!("purchase {}: {err}", row.id)))?;
        let order: Order = serde_json::from_value(row.order_payload)
            .map_err(|err| DbError::Corrupt(format!("purchase {}: bad order payload: {err}", row.id)))?;

        Ok(Purchase {
            id: row.id,
            email,
            name: row.name,
            last_name: row.last_name,
            document: Document::classify(&row.document),
            address: row.address,
            complement: row.complement,
            city: row.city,
            country: row.country,
            country_state: row.country_state,
            phone: row.phone,
            post_code: row.post_code,
            order,
        })
    }
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: PgPool) -> Self {
        PurchaseRepository { pool }
    }

    /// Inserts a validated purchase, returning its new row id.
    ///
    /// `discount_code` is the code the order's discount came from, if any;
    /// persisting it is what consumes the voucher.
    pub async fn insert(
        &self,
        purchase: &Purchase,
        discount_code: Option<&str>,
    ) -> DbResult<i64> {
        let order_payload = serde_json::to_value(&purchase.order)
            .map_err(|err| DbError::Internal(format!("order serialization: {err}")))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO purchases \
             (email, name, last_name, document, address, complement, city, \
              country, country_state, phone, post_code, order_payload, discount_code) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING id",
        )
        .bind(purchase.email.as_str())
        .bind(&purchase.name)
        .bind(&purchase.last_name)
        .bind(purchase.document.value())
        .bind(&purchase.address)
        .bind(&purchase.complement)
        .bind(&purchase.city)
        .bind(&purchase.country)
        .bind(&purchase.country_state)
        .bind(&purchase.phone)
        .bind(&purchase.post_code)
        .bind(&order_payload)
        .bind(discount_code)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, total_cents = purchase.order.total.cents(), "purchase inserted");
        Ok(id)
    }

    /// Fetches a purchase by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Purchase> {
        let row: Option<PurchaseRow> = sqlx::query_as(
            "SELECT id, email, name, last_name, document, address, complement, \
                    city, country, country_state, phone, post_code, order_payload \
             FROM purchases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("purchase", id.to_string()))?
            .try_into()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::money::Money;
    use folio_core::types::OrderItem;
    use serde_json::json;

    fn row(email: &str, payload: serde_json::Value) -> PurchaseRow {
        PurchaseRow {
            id: 7,
            email: email.to_string(),
            name: "John".to_string(),
            last_name: "Doe".to_string(),
            document: "11144477700".to_string(),
            address: "123 Main St".to_string(),
            complement: "Apt 4B".to_string(),
            city: "Sao Paulo".to_string(),
            country: "Brazil".to_string(),
            country_state: None,
            phone: "32222222".to_string(),
            post_code: "05105000".to_string(),
            order_payload: payload,
        }
    }

    #[test]
    fn test_row_rehydrates() {
        let payload = json!({
            "total": 5000,
            "items": [{"book_id": 1, "quantity": 2}],
        });
        let purchase: Purchase = row("a@b.com", payload).try_into().unwrap();

        assert_eq!(purchase.id, 7);
        assert_eq!(purchase.order.total, Money::from_cents(5_000));
        assert_eq!(purchase.order.items, [OrderItem { book_id: 1, quantity: 2 }]);
        assert!(purchase.order.discount.is_none());
        assert!(matches!(purchase.document, Document::Cpf(_)));
    }

    #[test]
    fn test_corrupt_email_rejected() {
        let payload = json!({"total": 0, "items": []});
        let result: DbResult<Purchase> = row("not-an-email", payload).try_into();
        assert!(matches!(result, Err(DbError::Corrupt(_))));
    }

    #[test]
    fn test_corrupt_payload_rejected() {
        let result: DbResult<Purchase> = row("a@b.com", json!({"totally": "wrong"})).try_into();
        assert!(matches!(result, Err(DbError::Corrupt(_))));
    }
}

//! # PostgreSQL Storage Lookup
//!
//! The [`StorageLookup`] implementation the validation engine runs against.
//!
//! ## Runtime Identifiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Unique { table: "authors", column: "email" }                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exists("authors", "email", value)                                      │
//! │       │                                                                 │
//! │       ├── catalog whitelist ── unknown name? ──► LookupError::Contract  │
//! │       │                                          (no SQL is built)      │
//! │       ▼                                                                 │
//! │  SELECT EXISTS(SELECT 1 FROM authors WHERE email = $1)                  │
//! │              ▲ interpolated ident          ▲ bound value                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers cannot be bind parameters in PostgreSQL, so they are
//! interpolated - but only after the catalog has vouched for them. Values
//! always go through binds.
//!
//! Every sqlx failure maps to [`LookupError::Unavailable`]: the validation
//! engine treats it as an aborted dispatch, never as a rejection reason.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use folio_core::money::Money;
use folio_core::types::{DiscountVoucher, Percent};
use folio_validate::{LookupError, SchemaCatalog, StorageLookup};

/// [`StorageLookup`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStorageLookup {
    pool: PgPool,
    catalog: SchemaCatalog,
}

impl PgStorageLookup {
    pub fn new(pool: PgPool, catalog: SchemaCatalog) -> Self {
        PgStorageLookup { pool, catalog }
    }

    fn check_table(&self, table: &str) -> Result<(), LookupError> {
        if self.catalog.has_table(table) {
            Ok(())
        } else {
            Err(LookupError::Contract(format!("unknown table `{table}`")))
        }
    }

    fn check_column(&self, table: &str, column: &str) -> Result<(), LookupError> {
        self.check_table(table)?;
        if self.catalog.has_column(table, column) {
            Ok(())
        } else {
            Err(LookupError::Contract(format!(
                "unknown column `{table}.{column}`"
            )))
        }
    }
}

fn unavailable(err: sqlx::Error) -> LookupError {
    LookupError::Unavailable(err.to_string())
}

/// Rebuilds a voucher from its row, rejecting rows that violate domain
/// invariants (written by something that bypassed validation).
pub(crate) fn voucher_from_row(
    id: i64,
    code: String,
    percent_bps: i64,
    expires_at: DateTime<Utc>,
    used_on_purchase: Option<i64>,
) -> Result<DiscountVoucher, LookupError> {
    let bps = u32::try_from(percent_bps).map_err(|_| {
        LookupError::Contract(format!("voucher {id} has out-of-range percent {percent_bps}"))
    })?;
    DiscountVoucher::new(id, code, Percent::from_bps(bps), expires_at, used_on_purchase)
        .map_err(|err| LookupError::Contract(format!("voucher {id} is corrupt: {err}")))
}

#[async_trait]
impl StorageLookup for PgStorageLookup {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        self.check_column(table, column)?;
        debug!(table, column, "uniqueness lookup");

        let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {column} = $1)");
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn row_exists(&self, table: &str, id: i64) -> Result<bool, LookupError> {
        self.check_column(table, "id")?;

        let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn find_by_name(&self, table: &str, name: &str) -> Result<Option<i64>, LookupError> {
        self.check_column(table, "name")?;

        let sql = format!("SELECT id FROM {table} WHERE name = $1");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn has_children(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        foreign_key: &str,
    ) -> Result<bool, LookupError> {
        self.check_table(parent_table)?;
        self.check_column(child_table, foreign_key)?;

        let sql = format!("SELECT EXISTS(SELECT 1 FROM {child_table} WHERE {foreign_key} = $1)");
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn child_named_exists(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        foreign_key: &str,
        name: &str,
    ) -> Result<bool, LookupError> {
        self.check_table(parent_table)?;
        self.check_column(child_table, foreign_key)?;
        self.check_column(child_table, "name")?;

        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {child_table} WHERE {foreign_key} = $1 AND name = $2)"
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(parent_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn find_price_map(
        &self,
        ids: &BTreeSet<i64>,
    ) -> Result<HashMap<i64, Money>, LookupError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let id_vec: Vec<i64> = ids.iter().copied().collect();

        let rows: Vec<(i64, i64)> =
            sqlx::query_as("SELECT id, price_cents FROM books WHERE id = ANY($1)")
                .bind(&id_vec)
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(id, cents)| (id, Money::from_cents(cents)))
            .collect())
    }

    async fn find_voucher(&self, code: &str) -> Result<Option<DiscountVoucher>, LookupError> {
        // The left join surfaces consumption: a purchase row claiming the
        // code fills used_on_purchase
        let row: Option<(i64, String, i64, DateTime<Utc>, Option<i64>)> = sqlx::query_as(
            "SELECT v.id, v.code, v.discount_percent_bps, v.expires_at, p.id \
             FROM discount_vouchers v \
             LEFT JOIN purchases p ON p.discount_code = v.code \
             WHERE v.code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        row.map(|(id, code, bps, expires_at, used_on)| {
            voucher_from_row(id, code, bps, expires_at, used_on)
        })
        .transpose()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// No live database here: the identifier whitelist must reject bad names
// before any SQL is built, which a lazy (unconnected) pool proves.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema_catalog;
    use chrono::Duration;
    use sqlx::postgres::PgPoolOptions;

    fn lookup() -> PgStorageLookup {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://folio@localhost/folio")
            .expect("lazy pool");
        PgStorageLookup::new(pool, schema_catalog())
    }

    #[tokio::test]
    async fn test_unknown_table_is_contract_error() {
        let result = lookup().exists("users", "email", "a@b.com").await;
        assert!(matches!(result, Err(LookupError::Contract(_))));
    }

    #[tokio::test]
    async fn test_unknown_column_is_contract_error() {
        let result = lookup().exists("authors", "password", "x").await;
        assert!(matches!(result, Err(LookupError::Contract(_))));
    }

    #[tokio::test]
    async fn test_find_by_name_requires_name_column() {
        // purchases has no name-keyed access
        let result = lookup().find_by_name("purchases", "x").await;
        assert!(matches!(result, Err(LookupError::Contract(_))));
    }

    #[tokio::test]
    async fn test_empty_price_query_short_circuits() {
        // No ids, no SQL - succeeds even without a reachable database
        let prices = lookup().find_price_map(&BTreeSet::new()).await.unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn test_voucher_row_rebuild() {
        let voucher =
            voucher_from_row(1, "TENOFF".to_string(), 1000, Utc::now() + Duration::days(1), None)
                .unwrap();
        assert_eq!(voucher.percent.bps(), 1000);
        assert!(voucher.is_valid(Utc::now()));
    }

    #[test]
    fn test_corrupt_voucher_row_rejected() {
        let zero_percent =
            voucher_from_row(1, "ZERO".to_string(), 0, Utc::now(), None);
        assert!(matches!(zero_percent, Err(LookupError::Contract(_))));

        let negative_bps =
            voucher_from_row(2, "NEG".to_string(), -5, Utc::now(), None);
        assert!(matches!(negative_bps, Err(LookupError::Contract(_))));
    }
}

//! # Discount Voucher Repository
//!
//! Database operations for discount vouchers.
//!
//! Consumption is never a column on the voucher row: a voucher is consumed
//! the moment a purchase row carries its code, which `find_by_code` surfaces
//! through the same left join the validation lookup uses.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::lookup::voucher_from_row;
use folio_core::types::{DiscountVoucher, Percent};
use folio_validate::LookupError;

/// Repository for discount voucher database operations.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    /// Creates a new VoucherRepository.
    pub fn new(pool: PgPool) -> Self {
        VoucherRepository { pool }
    }

    /// Inserts a voucher, returning its new row id.
    ///
    /// The caller dispatches the request first; a duplicate code that slips
    /// past validation in a race still comes back as
    /// [`DbError::UniqueViolation`] from the unique index.
    pub async fn insert(
        &self,
        code: &str,
        percent: Percent,
        expires_at: DateTime<Utc>,
    ) -> DbResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO discount_vouchers (code, discount_percent_bps, expires_at) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(code)
        .bind(i64::from(percent.bps()))
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, code, "voucher inserted");
        Ok(id)
    }

    /// Fetches a voucher by code, consumption state included.
    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<DiscountVoucher>> {
        let row: Option<(i64, String, i64, DateTime<Utc>, Option<i64>)> = sqlx::query_as(
            "SELECT v.id, v.code, v.discount_percent_bps, v.expires_at, p.id \
             FROM discount_vouchers v \
             LEFT JOIN purchases p ON p.discount_code = v.code \
             WHERE v.code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id, code, bps, expires_at, used_on)| {
            voucher_from_row(id, code, bps, expires_at, used_on).map_err(|err| match err {
                LookupError::Contract(msg) => DbError::Corrupt(msg),
                LookupError::Unavailable(msg) => DbError::ConnectionFailed(msg),
            })
        })
        .transpose()
    }
}

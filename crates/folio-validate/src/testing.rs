//! In-memory [`StorageLookup`] fake for unit tests.
//!
//! Seeded through builder methods; `failing()` turns every lookup into an
//! infrastructure error to exercise the outage path.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};

use folio_core::money::Money;
use folio_core::types::DiscountVoucher;

use crate::storage::{tables, LookupError, StorageLookup};

#[derive(Default)]
pub struct FakeStorage {
    values: HashSet<(String, String, String)>,
    rows: HashSet<(String, i64)>,
    names: HashMap<(String, String), i64>,
    children: HashMap<(String, i64, String), Vec<String>>,
    prices: HashMap<i64, Money>,
    vouchers: HashMap<String, DiscountVoucher>,
    fail: bool,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `table.column = value` as already present.
    pub fn with_value(mut self, table: &str, column: &str, value: &str) -> Self {
        self.values
            .insert((table.to_string(), column.to_string(), value.to_string()));
        self
    }

    pub fn with_row(mut self, table: &str, id: i64) -> Self {
        self.rows.insert((table.to_string(), id));
        self
    }

    pub fn with_named_row(mut self, table: &str, name: &str, id: i64) -> Self {
        self.names.insert((table.to_string(), name.to_string()), id);
        self.rows.insert((table.to_string(), id));
        self
    }

    pub fn with_child(
        mut self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        name: &str,
    ) -> Self {
        self.children
            .entry((parent_table.to_string(), parent_id, child_table.to_string()))
            .or_default()
            .push(name.to_string());
        self
    }

    /// Seeds a country row.
    pub fn with_country(self, name: &str, id: i64) -> Self {
        self.with_named_row(tables::COUNTRIES, name, id)
    }

    /// Seeds a state under a country.
    pub fn with_state(self, country_id: i64, name: &str) -> Self {
        self.with_child(tables::COUNTRIES, country_id, tables::COUNTRY_STATES, name)
    }

    /// Seeds a catalog price (and the book row itself).
    pub fn with_price(mut self, book_id: i64, cents: i64) -> Self {
        self.prices.insert(book_id, Money::from_cents(cents));
        self.rows.insert((tables::BOOKS.to_string(), book_id));
        self
    }

    pub fn with_voucher(mut self, voucher: DiscountVoucher) -> Self {
        self.vouchers.insert(voucher.code.clone(), voucher);
        self
    }

    /// Every subsequent lookup reports the backend as unavailable.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn check_up(&self) -> Result<(), LookupError> {
        if self.fail {
            Err(LookupError::Unavailable("fake storage down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StorageLookup for FakeStorage {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        self.check_up()?;
        Ok(self
            .values
            .contains(&(table.to_string(), column.to_string(), value.to_string())))
    }

    async fn row_exists(&self, table: &str, id: i64) -> Result<bool, LookupError> {
        self.check_up()?;
        Ok(self.rows.contains(&(table.to_string(), id)))
    }

    async fn find_by_name(&self, table: &str, name: &str) -> Result<Option<i64>, LookupError> {
        self.check_up()?;
        Ok(self
            .names
            .get(&(table.to_string(), name.to_string()))
            .copied())
    }

    async fn has_children(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        _foreign_key: &str,
    ) -> Result<bool, LookupError> {
        self.check_up()?;
        Ok(self
            .children
            .get(&(parent_table.to_string(), parent_id, child_table.to_string()))
            .is_some_and(|names| !names.is_empty()))
    }

    async fn child_named_exists(
        &self,
        parent_table: &str,
        parent_id: i64,
        child_table: &str,
        _foreign_key: &str,
        name: &str,
    ) -> Result<bool, LookupError> {
        self.check_up()?;
        Ok(self
            .children
            .get(&(parent_table.to_string(), parent_id, child_table.to_string()))
            .is_some_and(|names| names.iter().any(|n| n == name)))
    }

    async fn find_price_map(
        &self,
        ids: &BTreeSet<i64>,
    ) -> Result<HashMap<i64, Money>, LookupError> {
        self.check_up()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.prices.get(id).map(|price| (*id, *price)))
            .collect())
    }

    async fn find_voucher(&self, code: &str) -> Result<Option<DiscountVoucher>, LookupError> {
        self.check_up()?;
        Ok(self.vouchers.get(code).cloned())
    }
}

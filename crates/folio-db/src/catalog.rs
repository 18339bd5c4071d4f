//! # Schema Catalog
//!
//! The static list of tables and columns this storage layer serves.
//!
//! ## Two Consumers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  schema_catalog()                                                       │
//! │       │                                                                 │
//! │       ├──► verify_registry (startup)                                    │
//! │       │      every Unique rule must point at a real table.column        │
//! │       │                                                                 │
//! │       └──► PgStorageLookup (request time)                               │
//! │              runtime identifiers are whitelisted here before they are   │
//! │              interpolated into SQL - bind parameters cannot carry       │
//! │              identifiers, so the whitelist is the injection barrier     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_validate::SchemaCatalog;

/// The tables and columns backing the Folio schema.
///
/// Must be kept in lockstep with the deployed DDL; a column listed here but
/// absent from the database still fails, just later and louder.
pub fn schema_catalog() -> SchemaCatalog {
    SchemaCatalog::new()
        .table("authors", &["id", "name", "email", "description"])
        .table("categories", &["id", "name"])
        .table(
            "books",
            &[
                "id",
                "title",
                "summary",
                "content",
                "price_cents",
                "pages",
                "isbn",
                "published_at",
                "category_id",
                "author_id",
            ],
        )
        .table("countries", &["id", "name"])
        .table("country_states", &["id", "name", "country_id"])
        .table(
            "discount_vouchers",
            &["id", "code", "discount_percent_bps", "expires_at"],
        )
        .table(
            "purchases",
            &[
                "id",
                "email",
                "name",
                "last_name",
                "document",
                "address",
                "complement",
                "city",
                "country",
                "country_state",
                "phone",
                "post_code",
                "order_payload",
                "discount_code",
            ],
        )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_validate::verify_registry;

    #[test]
    fn test_every_request_type_is_served() {
        // The whole point of the catalog: every declared Unique rule
        // resolves against it
        assert!(verify_registry(&schema_catalog()).is_ok());
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = schema_catalog();
        assert!(catalog.has_table("discount_vouchers"));
        assert!(catalog.has_column("authors", "email"));
        assert!(!catalog.has_table("users"));
        assert!(!catalog.has_column("authors", "password"));
    }
}

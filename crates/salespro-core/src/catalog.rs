//! # Built-in Fallback Catalog
//!
//! The catalog list screen must always have *something* to display, even
//! before the backend is seeded or when the store read fails. This module
//! provides the built-in sample catalog and the tagged listing type that
//! tells callers which branch produced the data.
//!
//! ## Listing Source
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       list_or_default()                                 │
//! │                                                                         │
//! │  store read ──► Ok(non-empty) ──► CatalogSource::Store                 │
//! │             ──► Ok(empty)     ──► CatalogSource::BuiltIn               │
//! │             ──► Err(_)        ──► CatalogSource::BuiltIn (logged)      │
//! │                                                                         │
//! │  The source is an explicit variant, never silently conflated, so       │
//! │  callers and tests can assert which branch fired.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CatalogItem;

// =============================================================================
// Listing Source
// =============================================================================

/// Where a catalog listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogSource {
    /// Rows read from the record store.
    Store,
    /// The built-in sample catalog (store empty or unreachable).
    BuiltIn,
}

/// A catalog list tagged with its source.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogListing {
    pub source: CatalogSource,
    pub items: Vec<CatalogItem>,
}

impl CatalogListing {
    /// A listing read from the store.
    pub fn from_store(items: Vec<CatalogItem>) -> Self {
        CatalogListing {
            source: CatalogSource::Store,
            items,
        }
    }

    /// The built-in fallback listing.
    pub fn built_in(now: DateTime<Utc>) -> Self {
        CatalogListing {
            source: CatalogSource::BuiltIn,
            items: default_catalog(now),
        }
    }
}

// =============================================================================
// Default Sample Data
// =============================================================================

/// The built-in sample catalog.
///
/// Timestamps are an input (`now`) so this stays a pure function; the fixed
/// ids let repeated fallbacks produce stable references.
pub fn default_catalog(now: DateTime<Utc>) -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "Wireless Headphones".to_string(),
            sku: Some("WH-001".to_string()),
            retail_price_cents: 9999,
            unit_cost_cents: 4500,
            current_stock: 25,
            category: Some("Electronics".to_string()),
            unit: None,
            created_at: now,
            updated_at: now,
        },
        CatalogItem {
            id: "00000000-0000-0000-0000-000000000002".to_string(),
            name: "Bluetooth Speaker".to_string(),
            sku: Some("BS-002".to_string()),
            retail_price_cents: 7999,
            unit_cost_cents: 3500,
            current_stock: 15,
            category: Some("Electronics".to_string()),
            unit: None,
            created_at: now,
            updated_at: now,
        },
        CatalogItem {
            id: "00000000-0000-0000-0000-000000000003".to_string(),
            name: "Phone Case".to_string(),
            sku: Some("PC-003".to_string()),
            retail_price_cents: 2499,
            unit_cost_cents: 800,
            current_stock: 50,
            category: Some("Accessories".to_string()),
            unit: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_catalog_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        let items = default_catalog(now);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.current_stock > 0));
        assert!(items.iter().all(|i| i.retail_price_cents > i.unit_cost_cents));
    }

    #[test]
    fn test_listing_sources_are_distinguishable() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();

        let store = CatalogListing::from_store(vec![]);
        assert_eq!(store.source, CatalogSource::Store);

        let built_in = CatalogListing::built_in(now);
        assert_eq!(built_in.source, CatalogSource::BuiltIn);
        assert_eq!(built_in.items.len(), 3);
    }
}

//! Inventory reconciliation pipeline
//!
//! raw records → [`normalize`] → [`merge`] → [`filter`] → [`valuation`]
//!
//! Every stage is a pure function over in-memory lists. Callers fetch the
//! source collections, pick a fallback when a fetch fails, and decide what to
//! cache.

pub mod filter;
pub mod merge;
pub mod normalize;
pub mod valuation;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{InventorySettings, InventoryView, LineItem, ProductRecord, PurchaseRecord};
use crate::types::{CoercionWarning, SnapshotSource};

pub use filter::InventoryFilter;
pub use merge::{distinct_categories, merge_line_items};
pub use normalize::{normalize_product, normalize_purchase};
pub use valuation::value_items;

/// Merged ledger plus the numeric problems recovered along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub items: Vec<LineItem>,
    pub warnings: Vec<CoercionWarning>,
}

/// Normalize both collections (products first) and merge them by name
pub fn reconcile(
    products: &[ProductRecord],
    purchases: &[PurchaseRecord],
    today: NaiveDate,
    settings: &InventorySettings,
) -> Reconciliation {
    let mut warnings = Vec::new();
    let mut normalized = Vec::with_capacity(products.len() + purchases.len());

    for record in products {
        let out = normalize_product(record, today, settings);
        warnings.extend(out.warnings);
        normalized.push(out.value);
    }
    for record in purchases {
        let out = normalize_purchase(record, today, settings);
        warnings.extend(out.warnings);
        normalized.push(out.value);
    }

    let items = merge_line_items(normalized, settings.merge_strategy);

    tracing::debug!(
        products = products.len(),
        purchases = purchases.len(),
        merged = items.len(),
        warnings = warnings.len(),
        "reconciled inventory"
    );

    Reconciliation { items, warnings }
}

/// Filter and value a merged ledger for display
pub fn build_view(
    items: &[LineItem],
    filter: &InventoryFilter,
    settings: &InventorySettings,
    source: SnapshotSource,
    cached_at: Option<DateTime<Utc>>,
) -> InventoryView {
    let valuation = value_items(filter.apply(items), settings.low_stock_threshold);

    InventoryView {
        source,
        cached_at,
        valuation,
        categories: distinct_categories(items),
        warnings: Vec::new(),
    }
}

impl Reconciliation {
    /// View of a freshly reconciled ledger
    pub fn into_view(self, filter: &InventoryFilter, settings: &InventorySettings) -> InventoryView {
        let mut view = build_view(&self.items, filter, settings, SnapshotSource::Live, None);
        view.warnings = self.warnings;
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn pen_product() -> ProductRecord {
        ProductRecord {
            id: json!(1),
            name: "Pen".to_string(),
            category: Some("Stationery".to_string()),
            stock: json!(5),
            price: json!(10),
            last_updated: Some("2024-06-01".to_string()),
        }
    }

    fn pen_purchase() -> PurchaseRecord {
        PurchaseRecord {
            id: json!(1),
            product_name: "Pen".to_string(),
            category: None,
            stock_received: json!(3),
            total_amount: json!(10),
            order_date: Some("2024-06-20".to_string()),
        }
    }

    #[test]
    fn test_pen_scenario() {
        let settings = InventorySettings::default();
        let view = reconcile(&[pen_product()], &[pen_purchase()], today(), &settings)
            .into_view(&InventoryFilter::default(), &settings);

        assert_eq!(view.source, SnapshotSource::Live);
        assert_eq!(view.valuation.items.len(), 1);
        let pen = &view.valuation.items[0];
        assert_eq!(pen.item.name, "Pen");
        assert_eq!(pen.item.available_quantity, Decimal::from(8));
        assert_eq!(pen.item.unit_price, Decimal::from(10));
        assert!(pen.is_low_stock);
        assert_eq!(pen.stock_value, Decimal::from(80));
        assert_eq!(view.valuation.total_stock_value, Decimal::from(80));
        assert_eq!(view.categories, vec!["Stationery"]);
    }

    #[test]
    fn test_huge_numbers_clamp_instead_of_failing() {
        let settings = InventorySettings::default();
        let mut huge = pen_product();
        huge.name = "Crate".to_string();
        huge.stock = json!("1e20");
        huge.price = json!(1e20);
        let mut bulk = pen_product();
        bulk.name = "Bulk".to_string();
        bulk.stock = json!("50000000000000000000000000000");
        bulk.price = json!(0);

        let view = reconcile(&[huge, bulk.clone(), bulk], &[], today(), &settings)
            .into_view(&InventoryFilter::default(), &settings);

        assert_eq!(view.valuation.items.len(), 2);
        assert_eq!(view.valuation.items[0].stock_value, Decimal::MAX);
        assert_eq!(view.valuation.items[1].item.available_quantity, Decimal::MAX);
        assert_eq!(view.valuation.total_stock_value, Decimal::MAX);
        assert!(view.warnings.is_empty());
    }

    #[test]
    fn test_warnings_are_carried_into_view() {
        let settings = InventorySettings::default();
        let mut broken = pen_purchase();
        broken.stock_received = json!("n/a");

        let view = reconcile(&[pen_product()], &[broken], today(), &settings)
            .into_view(&InventoryFilter::default(), &settings);

        assert_eq!(view.valuation.items[0].item.available_quantity, Decimal::from(5));
        assert_eq!(view.warnings.len(), 1);
    }

    #[test]
    fn test_categories_ignore_filter() {
        let settings = InventorySettings::default();
        let mut ink = pen_product();
        ink.name = "Ink".to_string();
        ink.category = Some("Refills".to_string());

        let filter = InventoryFilter {
            category: Some("Refills".to_string()),
            ..Default::default()
        };
        let view = reconcile(&[pen_product(), ink], &[], today(), &settings)
            .into_view(&filter, &settings);

        assert_eq!(view.valuation.items.len(), 1);
        assert_eq!(view.categories, vec!["Stationery", "Refills"]);
    }

    #[test]
    fn test_cached_view_is_tagged() {
        let settings = InventorySettings::default();
        let items = reconcile(&[pen_product()], &[], today(), &settings).items;
        let at = Utc::now();

        let view = build_view(
            &items,
            &InventoryFilter::default(),
            &settings,
            SnapshotSource::Cached,
            Some(at),
        );
        assert_eq!(view.source, SnapshotSource::Cached);
        assert_eq!(view.cached_at, Some(at));
    }
}

//! Source normalizer: maps product and purchase records onto [`LineItem`]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    InventorySettings, LineItem, ProductRecord, PurchasePricing, PurchaseRecord,
    PURCHASE_ID_PREFIX,
};
use crate::types::{Coerced, CoercionWarning, Normalized, SourceKind};
use crate::validation::{coerce_decimal, id_to_string, normalize_date};

/// Normalize a product record
pub fn normalize_product(
    record: &ProductRecord,
    today: NaiveDate,
    settings: &InventorySettings,
) -> Normalized<LineItem> {
    let id = id_to_string(&record.id);
    let quantity = coerce_decimal(&record.stock);
    let price = coerce_decimal(&record.price);
    let warnings = collect_warnings(SourceKind::Product, &id, quantity, price);

    let value = LineItem {
        name: record.name.clone(),
        category: category_or_default(record.category.as_deref(), settings),
        available_quantity: quantity.value(),
        unit_price: price.value(),
        last_updated_date: normalize_date(record.last_updated.as_deref(), today),
        low_stock_threshold: settings.low_stock_threshold,
        id,
    };

    Normalized { value, warnings }
}

/// Normalize a purchase record.
///
/// The unit price is derived from the invoice total according to
/// [`InventorySettings::purchase_pricing`].
pub fn normalize_purchase(
    record: &PurchaseRecord,
    today: NaiveDate,
    settings: &InventorySettings,
) -> Normalized<LineItem> {
    let raw_id = id_to_string(&record.id);
    let quantity = coerce_decimal(&record.stock_received);
    let total = coerce_decimal(&record.total_amount);
    let warnings = collect_warnings(SourceKind::Purchase, &raw_id, quantity, total);

    let unit_price = match settings.purchase_pricing {
        PurchasePricing::InvoiceTotalAsUnitPrice => total.value(),
        PurchasePricing::PerUnitFromInvoiceTotal => total
            .value()
            .checked_div(quantity.value())
            .unwrap_or(Decimal::ZERO),
    };

    let value = LineItem {
        id: format!("{}{}", PURCHASE_ID_PREFIX, raw_id),
        name: record.product_name.clone(),
        category: category_or_default(record.category.as_deref(), settings),
        available_quantity: quantity.value(),
        unit_price,
        last_updated_date: normalize_date(record.order_date.as_deref(), today),
        low_stock_threshold: settings.low_stock_threshold,
    };

    Normalized { value, warnings }
}

fn category_or_default(category: Option<&str>, settings: &InventorySettings) -> String {
    match category.filter(|c| !c.is_empty()) {
        Some(c) => c.to_string(),
        None => settings.default_category.clone(),
    }
}

fn collect_warnings(
    source: SourceKind,
    record_id: &str,
    quantity: Coerced,
    price: Coerced,
) -> Vec<CoercionWarning> {
    let mut warnings = Vec::new();

    if let Some(fault) = quantity.fault() {
        tracing::debug!(%source, record_id, ?fault, "quantity defaulted to zero");
        warnings.push(CoercionWarning::InvalidQuantity {
            source,
            record_id: record_id.to_string(),
            fault,
        });
    }
    if let Some(fault) = price.fault() {
        tracing::debug!(%source, record_id, ?fault, "price defaulted to zero");
        warnings.push(CoercionWarning::InvalidPrice {
            source,
            record_id: record_id.to_string(),
            fault,
        });
    }

    warnings
}

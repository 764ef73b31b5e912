//! WebAssembly module for the billing inventory screen
//!
//! Lets the browser reconcile the product and purchase collections it already
//! holds, without a round trip to the gateway:
//! - Normalize, merge, filter and value in one call
//! - Distinct categories for the filter dropdown
//! - Low-stock check for a single quantity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reconcile::*;
pub use shared::types::*;

/// Reconcile raw collections and return the serialized inventory view.
///
/// `products_json` and `purchases_json` accept either a bare array or the
/// API's `{ success, data }` envelope. `filter_json` and `settings_json` may
/// be empty strings to use defaults.
#[wasm_bindgen]
pub fn reconcile_inventory(
    products_json: &str,
    purchases_json: &str,
    filter_json: &str,
    settings_json: &str,
) -> Result<String, JsValue> {
    let (view, warnings) =
        reconcile_json(products_json, purchases_json, filter_json, settings_json, today())
            .map_err(|e| JsValue::from_str(&e))?;

    for warning in &warnings {
        warn(&warning.to_string());
    }
    Ok(view)
}

/// Distinct categories of a merged item list, first-seen order
#[wasm_bindgen]
pub fn inventory_categories(items_json: &str) -> Result<String, JsValue> {
    categories_json(items_json).map_err(|e| JsValue::from_str(&e))
}

/// Low-stock check using the same inclusive comparison as the ledger
#[wasm_bindgen]
pub fn is_low_stock(quantity: f64, threshold: f64) -> bool {
    let quantity = Decimal::try_from(quantity).unwrap_or(Decimal::ZERO);
    let threshold = Decimal::try_from(threshold).unwrap_or(Decimal::ZERO);
    quantity <= threshold
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Collection<T> {
    Records(Vec<T>),
    Envelope(ApiEnvelope<T>),
}

fn parse_collection<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, String> {
    let collection: Collection<T> = serde_json::from_str(json)
        .map_err(|e| format!("Invalid {} JSON: {}", what, e))?;
    Ok(match collection {
        Collection::Records(records) => records,
        Collection::Envelope(envelope) => envelope.into_records(),
    })
}

fn parse_or_default<T: DeserializeOwned + Default>(json: &str, what: &str) -> Result<T, String> {
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn reconcile_json(
    products_json: &str,
    purchases_json: &str,
    filter_json: &str,
    settings_json: &str,
    today: NaiveDate,
) -> Result<(String, Vec<CoercionWarning>), String> {
    let products: Vec<ProductRecord> = parse_collection(products_json, "products")?;
    let purchases: Vec<PurchaseRecord> = parse_collection(purchases_json, "purchases")?;
    let filter: InventoryFilter = parse_or_default(filter_json, "filter")?;
    let settings: InventorySettings = parse_or_default(settings_json, "settings")?;

    settings.validate().map_err(|e| e.to_string())?;
    filter.validate().map_err(|e| e.to_string())?;

    let reconciliation = reconcile(&products, &purchases, today, &settings);
    let warnings = reconciliation.warnings.clone();
    let view = reconciliation.into_view(&filter, &settings);

    let json = serde_json::to_string(&view).map_err(|e| e.to_string())?;
    Ok((json, warnings))
}

fn categories_json(items_json: &str) -> Result<String, String> {
    let items: Vec<LineItem> =
        serde_json::from_str(items_json).map_err(|e| format!("Invalid items JSON: {}", e))?;
    serde_json::to_string(&distinct_categories(&items)).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const PRODUCTS: &str = r#"[
        {"id": 1, "name": "Pen", "category": "Stationery", "stock": 5, "price": 10,
         "lastUpdated": "2024-04-02T12:00:00Z"},
        {"id": 2, "name": "Desk", "category": "Furniture", "stock": "abc", "price": "250",
         "lastUpdated": "2024-03-15"}
    ]"#;

    const PURCHASES: &str = r#"{"success": true, "data": [
        {"id": 9, "productname": "Pen", "stockrecieved": 3, "totalAmount": 10,
         "orderdate": "2024-04-10"}
    ]}"#;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_reconcile_json_merges_and_values() {
        let (json, warnings) = reconcile_json(PRODUCTS, PURCHASES, "", "", day()).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(view["items"].as_array().unwrap().len(), 2);
        assert_eq!(view["items"][0]["availableQuantity"], "8");
        assert_eq!(view["totalStockValue"], "80");
        assert_eq!(view["lowStockCount"], 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_reconcile_json_applies_filter() {
        let (json, _) = reconcile_json(
            PRODUCTS,
            "[]",
            r#"{"category": "Furniture"}"#,
            r#"{"low_stock_threshold": "0"}"#,
            day(),
        )
        .unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(view["items"].as_array().unwrap().len(), 1);
        assert_eq!(view["items"][0]["name"], "Desk");
        assert_eq!(view["categories"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_envelope_counts_as_empty() {
        let (json, _) =
            reconcile_json(PRODUCTS, r#"{"success": false}"#, "", "", day()).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["items"][0]["availableQuantity"], "5");
    }

    #[test]
    fn test_reconcile_json_rejects_bad_input() {
        assert!(reconcile_json("not json", "[]", "", "", day()).is_err());
        assert!(reconcile_json("[]", "[]", r#"{"endDate": "someday"}"#, "", day()).is_err());
    }

    #[test]
    fn test_categories_json() {
        let (json, _) = reconcile_json(PRODUCTS, PURCHASES, "", "", day()).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();

        let categories = categories_json(&view["items"].to_string()).unwrap();
        assert_eq!(categories, r#"["Stationery","Furniture"]"#);
        assert!(categories_json("{}").is_err());
    }

    #[test]
    fn test_is_low_stock() {
        assert!(is_low_stock(10.0, 10.0));
        assert!(is_low_stock(0.0, 10.0));
        assert!(!is_low_stock(10.5, 10.0));
    }
}

//! Coercion and validation helpers for loosely typed source records
//!
//! The remote billing API stores most numeric fields as whatever the form
//! submitted, so a quantity can arrive as `5`, `"5"`, `"5.00"`, `""` or `null`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::types::{Coerced, CoercionFault};

/// Calendar date format used for every date string in a line item
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a `YYYY-MM-DD` date
pub const DATE_LEN: usize = 10;

// ============================================================================
// Numeric Coercion
// ============================================================================

/// Coerce a JSON field into a non-negative decimal, defaulting to zero.
pub fn coerce_decimal(value: &Value) -> Coerced {
    let parsed = match value {
        Value::Null => return Coerced::DefaultedZero(CoercionFault::Missing),
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Coerced::DefaultedZero(CoercionFault::Missing);
            }
            parse_decimal(trimmed)
        }
        _ => None,
    };

    match parsed {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Coerced::DefaultedZero(CoercionFault::Negative)
        }
        Some(v) => Coerced::Parsed(v.normalize()),
        None => Coerced::DefaultedZero(CoercionFault::NotNumeric),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Render a raw record id (number or string) as a string
pub fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Date Handling
// ============================================================================

/// Truncate a source timestamp to its `YYYY-MM-DD` prefix, or use `today`
/// when the source has none.
pub fn normalize_date(raw: Option<&str>, today: NaiveDate) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.chars().take(DATE_LEN).collect(),
        None => format_date(today),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Check that a string is a real `YYYY-MM-DD` calendar date
pub fn is_iso_date(s: &str) -> bool {
    s.len() == DATE_LEN && NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
}

/// Validate a filter date, returning a message suitable for a form error
pub fn validate_filter_date(s: &str) -> Result<(), &'static str> {
    if is_iso_date(s) {
        Ok(())
    } else {
        Err("Date must be in YYYY-MM-DD format")
    }
}

//! Valuation aggregator

use rust_decimal::Decimal;

use crate::models::{LineItem, ValuationReport, ValuedItem};

/// Value each item and total the set.
///
/// `threshold` overrides the per-item threshold so one run flags every item
/// against the same limit. Results are exact; rounding is left to display.
/// Sums that exceed the decimal range clamp to `Decimal::MAX`.
pub fn value_items<'a, I>(items: I, threshold: Decimal) -> ValuationReport
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut report = ValuationReport::default();

    for item in items {
        let stock_value = item.stock_value();
        let is_low_stock = item.available_quantity <= threshold;

        report.total_stock_value = report.total_stock_value.saturating_add(stock_value);
        if is_low_stock {
            report.low_stock_count += 1;
        }
        report.items.push(ValuedItem {
            item: item.clone(),
            stock_value,
            is_low_stock,
        });
    }

    report
}

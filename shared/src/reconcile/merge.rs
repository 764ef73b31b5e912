//! Merger/deduplicator: folds line items sharing a name into one entry

use std::collections::HashMap;

use crate::models::{LineItem, MergeStrategy};

/// Merge line items by exact `name`, summing quantities.
///
/// Output keeps first-insertion order. Which price and category survive a
/// collision depends on `strategy`; `id` and `last_updated_date` always come
/// from the first record seen.
pub fn merge_line_items<I>(items: I, strategy: MergeStrategy) -> Vec<LineItem>
where
    I: IntoIterator<Item = LineItem>,
{
    let mut merged: Vec<LineItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        match index.get(&item.name).copied() {
            Some(pos) => {
                let existing = &mut merged[pos];
                tracing::trace!(
                    name = %item.name,
                    into = %existing.id,
                    from = %item.id,
                    "merging duplicate line item"
                );
                existing.available_quantity = existing
                    .available_quantity
                    .saturating_add(item.available_quantity);
                if strategy == MergeStrategy::LastWriteWins {
                    existing.unit_price = item.unit_price;
                    existing.category = item.category;
                }
            }
            None => {
                index.insert(item.name.clone(), merged.len());
                merged.push(item);
            }
        }
    }

    merged
}

/// Distinct categories in first-seen order
pub fn distinct_categories(items: &[LineItem]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.category.as_str()))
        .map(|item| item.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: &str, name: &str, category: &str, qty: i64, price: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            available_quantity: Decimal::from(qty),
            unit_price: Decimal::from(price),
            last_updated_date: "2024-01-01".to_string(),
            low_stock_threshold: Decimal::from(10),
        }
    }

    #[test]
    fn test_keep_first_sums_quantity_only() {
        let merged = merge_line_items(
            vec![
                item("1", "Pen", "Stationery", 5, 10),
                item("purchase-9", "Pen", "General", 3, 30),
            ],
            MergeStrategy::KeepFirst,
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "1");
        assert_eq!(merged[0].available_quantity, Decimal::from(8));
        assert_eq!(merged[0].unit_price, Decimal::from(10));
        assert_eq!(merged[0].category, "Stationery");
    }

    #[test]
    fn test_last_write_wins_overwrites_price_and_category() {
        let merged = merge_line_items(
            vec![
                item("1", "Pen", "Stationery", 5, 10),
                item("purchase-9", "Pen", "General", 3, 30),
            ],
            MergeStrategy::LastWriteWins,
        );

        assert_eq!(merged[0].id, "1");
        assert_eq!(merged[0].available_quantity, Decimal::from(8));
        assert_eq!(merged[0].unit_price, Decimal::from(30));
        assert_eq!(merged[0].category, "General");
    }

    #[test]
    fn test_quantity_sum_saturates() {
        let mut first = item("1", "Bulk", "A", 0, 1);
        first.available_quantity = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let second = first.clone();

        let merged = merge_line_items(vec![first, second], MergeStrategy::KeepFirst);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].available_quantity, Decimal::MAX);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let merged = merge_line_items(
            vec![item("1", "Pen", "A", 1, 1), item("2", "pen", "A", 1, 1)],
            MergeStrategy::KeepFirst,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_first_insertion_order() {
        let merged = merge_line_items(
            vec![
                item("1", "Pen", "A", 1, 1),
                item("2", "Ink", "A", 1, 1),
                item("3", "Pen", "A", 1, 1),
                item("4", "Pad", "A", 1, 1),
            ],
            MergeStrategy::KeepFirst,
        );
        let names: Vec<_> = merged.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pen", "Ink", "Pad"]);
        assert_eq!(merged[0].available_quantity, Decimal::from(2));
    }

    #[test]
    fn test_distinct_categories() {
        let items = vec![
            item("1", "Pen", "Stationery", 1, 1),
            item("2", "Ink", "General", 1, 1),
            item("3", "Pad", "Stationery", 1, 1),
        ];
        assert_eq!(distinct_categories(&items), vec!["Stationery", "General"]);
        assert!(distinct_categories(&[]).is_empty());
    }
}

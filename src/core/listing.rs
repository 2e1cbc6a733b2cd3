//! Filtering and sorting of the item list for display.

use crate::core::{item::InventoryItem, status::stock_ratio};
use std::cmp::Ordering;

/// Which items a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Only items whose category matches exactly
    Only(String),
}

impl CategoryFilter {
    /// Builds a filter from an optional category name; `None` means all.
    #[must_use]
    pub fn from_option(category: Option<String>) -> Self {
        category.map_or(Self::All, Self::Only)
    }

    /// Whether `item` passes this filter.
    #[must_use]
    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Alphabetical by name
    #[default]
    Name,
    /// Stock ratio ascending, most depleted first
    Stock,
    /// Alphabetical by category
    Category,
}

/// Case-insensitive comparison with a plain lexicographic tiebreak, so "apple"
/// and "Apple" still get a deterministic order.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Returns clones of the items that pass `filter`, in collection order.
#[must_use]
pub fn filter_items(items: &[InventoryItem], filter: &CategoryFilter) -> Vec<InventoryItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Stable in-place sort by `key`.
pub fn sort_items(items: &mut [InventoryItem], key: SortKey) {
    match key {
        SortKey::Name => items.sort_by(|a, b| compare_text(&a.name, &b.name)),
        SortKey::Stock => items.sort_by(|a, b| stock_ratio(a).total_cmp(&stock_ratio(b))),
        SortKey::Category => items.sort_by(|a, b| compare_text(&a.category, &b.category)),
    }
}

/// Filter then sort, the order the view applies them in.
#[must_use]
pub fn filter_and_sort(
    items: &[InventoryItem],
    filter: &CategoryFilter,
    key: SortKey,
) -> Vec<InventoryItem> {
    let mut selected = filter_items(items, filter);
    sort_items(&mut selected, key);
    selected
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_item;

    fn pantry() -> Vec<InventoryItem> {
        vec![
            sample_item("1", "rice", "staples", 9.0, 10.0),
            sample_item("2", "Apples", "produce", 1.0, 10.0),
            sample_item("3", "beans", "staples", 4.0, 10.0),
            sample_item("4", "Carrots", "produce", 2.0, 4.0),
        ]
    }

    fn ids(items: &[InventoryItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let items = pantry();
        assert_eq!(filter_items(&items, &CategoryFilter::All), items);
    }

    #[test]
    fn test_filter_by_category() {
        let items = pantry();
        let produce = filter_items(&items, &CategoryFilter::Only("produce".to_string()));
        assert_eq!(ids(&produce), ["2", "4"]);
    }

    #[test]
    fn test_filter_unknown_category_then_sort_is_empty() {
        let items = pantry();
        let mut none = filter_items(&items, &CategoryFilter::Only("cleaning".to_string()));
        assert!(none.is_empty());

        sort_items(&mut none, SortKey::Stock);
        assert!(none.is_empty());
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut items = pantry();
        sort_items(&mut items, SortKey::Name);
        assert_eq!(ids(&items), ["2", "3", "4", "1"]);
    }

    #[test]
    fn test_sort_by_stock_most_depleted_first() {
        let mut items = pantry();
        sort_items(&mut items, SortKey::Stock);
        // 0.1, 0.4, 0.5, 0.9
        assert_eq!(ids(&items), ["2", "3", "4", "1"]);
    }

    #[test]
    fn test_sort_by_category_is_stable() {
        let mut items = pantry();
        sort_items(&mut items, SortKey::Category);
        assert_eq!(ids(&items), ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_filter_and_sort() {
        let items = pantry();
        let staples = filter_and_sort(
            &items,
            &CategoryFilter::from_option(Some("staples".to_string())),
            SortKey::Stock,
        );
        assert_eq!(ids(&staples), ["3", "1"]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(categories(&pantry()), ["staples", "produce"]);
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_from_option_none_is_all() {
        assert_eq!(CategoryFilter::from_option(None), CategoryFilter::All);
    }
}

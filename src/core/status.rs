//! Stock ratio and status classification.
//!
//! These thresholds are the contract the view layer colour-codes and alerts on.

use crate::core::item::InventoryItem;
use std::fmt;

/// Ratios at or below this are `Low`.
pub const LOW_STOCK_THRESHOLD: f64 = 0.30;
/// Ratios at or below this (and above `LOW_STOCK_THRESHOLD`) are `Medium`.
pub const MEDIUM_STOCK_THRESHOLD: f64 = 0.50;

/// Three-tier classification of an item's stock ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// At or below 30% of recommended
    Low,
    /// Above 30%, at or below 50%
    Medium,
    /// Above 50%
    High,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// Fraction of the recommended stock currently on hand, in `[0, ∞)`.
///
/// Returns 0.0 when the recommended stock is not positive.
#[must_use]
pub fn stock_ratio(item: &InventoryItem) -> f64 {
    if item.recommended_stock <= 0.0 {
        return 0.0;
    }
    item.current_stock / item.recommended_stock
}

/// Stock ratio as a whole-number percentage, rounded half away from zero.
#[must_use]
pub fn stock_percent(item: &InventoryItem) -> f64 {
    (stock_ratio(item) * 100.0).round()
}

/// Classifies an item. Both boundaries are inclusive on the lower tier.
#[must_use]
pub fn stock_status(item: &InventoryItem) -> StockStatus {
    let ratio = stock_ratio(item);
    if ratio <= LOW_STOCK_THRESHOLD {
        StockStatus::Low
    } else if ratio <= MEDIUM_STOCK_THRESHOLD {
        StockStatus::Medium
    } else {
        StockStatus::High
    }
}

/// Whether the item belongs in the low-stock alert banner.
///
/// Strictly below the low threshold: an item at exactly 30% is `Low` but not alerted.
#[must_use]
pub fn is_low_stock(item: &InventoryItem) -> bool {
    stock_ratio(item) < LOW_STOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_item;

    #[test]
    fn test_ratio_and_percent() {
        let item = sample_item("oil", "Oil", "seasoning", 8.0, 10.0);
        assert_eq!(stock_ratio(&item), 0.8);
        assert_eq!(stock_percent(&item), 80.0);

        let item = sample_item("x", "X", "c", 1.0, 3.0);
        assert_eq!(stock_percent(&item), 33.0);
    }

    #[test]
    fn test_ratio_can_exceed_one() {
        let item = sample_item("x", "X", "c", 1004.0, 5.0);
        assert!(stock_ratio(&item) > 1.0);
        assert_eq!(stock_status(&item), StockStatus::High);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        let item = sample_item("x", "X", "c", 4.0, 0.0);
        assert_eq!(stock_ratio(&item), 0.0);
        assert_eq!(stock_status(&item), StockStatus::Low);
    }

    #[test]
    fn test_forty_percent_is_medium() {
        let item = sample_item("x", "X", "c", 2.0, 5.0);
        assert_eq!(stock_status(&item), StockStatus::Medium);
        assert!(!is_low_stock(&item));
    }

    #[test]
    fn test_thirty_percent_is_low_but_not_alerted() {
        let item = sample_item("x", "X", "c", 3.0, 10.0);
        assert_eq!(stock_status(&item), StockStatus::Low);
        assert!(!is_low_stock(&item));
    }

    #[test]
    fn test_fifty_percent_is_medium_boundary() {
        let at = sample_item("x", "X", "c", 5.0, 10.0);
        assert_eq!(stock_status(&at), StockStatus::Medium);

        let above = sample_item("x", "X", "c", 5.1, 10.0);
        assert_eq!(stock_status(&above), StockStatus::High);
    }

    #[test]
    fn test_below_thirty_percent_is_alerted() {
        let item = sample_item("x", "X", "c", 2.0, 10.0);
        assert_eq!(stock_status(&item), StockStatus::Low);
        assert!(is_low_stock(&item));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StockStatus::Low.to_string(), "low");
        assert_eq!(StockStatus::Medium.to_string(), "medium");
        assert_eq!(StockStatus::High.to_string(), "high");
    }
}

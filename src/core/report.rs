//! Presentation data for the view layer.
//!
//! Builds the filtered, sorted and annotated view of the inventory (item cards and
//! the low-stock alert banner) and renders it as plain text. Nothing here mutates
//! the store; the view is recomputed from a fresh read on every render.

use crate::core::{
    item::InventoryItem,
    listing::{CategoryFilter, SortKey, categories, filter_and_sort},
    status::{StockStatus, is_low_stock, stock_percent, stock_status},
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// One item as the view shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCard {
    /// The item itself
    pub item: InventoryItem,
    /// Stock ratio as a rounded percentage
    pub percent: f64,
    /// Three-tier classification
    pub status: StockStatus,
}

impl From<InventoryItem> for ItemCard {
    fn from(item: InventoryItem) -> Self {
        Self {
            percent: stock_percent(&item),
            status: stock_status(&item),
            item,
        }
    }
}

/// Everything a render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    /// Cards after filtering and sorting
    pub cards: Vec<ItemCard>,
    /// Items from `cards` that belong in the alert banner, in the same order
    pub alerts: Vec<InventoryItem>,
    /// All categories in the full collection, for the filter selector
    pub categories: Vec<String>,
}

/// Derives the view: store → filter → sort → annotate.
#[must_use]
pub fn build_view(items: &[InventoryItem], filter: &CategoryFilter, sort: SortKey) -> InventoryView {
    let selected = filter_and_sort(items, filter, sort);
    let alerts = selected
        .iter()
        .filter(|item| is_low_stock(item))
        .cloned()
        .collect();

    InventoryView {
        cards: selected.into_iter().map(ItemCard::from).collect(),
        alerts,
        categories: categories(items),
    }
}

/// Renders a quantity without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Generates a text progress bar like `[████████░░] 80%`.
///
/// The bar is clamped to `[0, 100]`; the label shows the real percentage, which
/// can exceed 100 for overstocked items.
#[must_use]
pub fn format_progress_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and length is small, so the cast cannot truncate meaningfully
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.0}%", "█".repeat(filled), "░".repeat(empty))
}

/// Formats a last-updated timestamp like `3/15 10:30 UTC`.
#[must_use]
pub fn format_last_updated(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d %H:%M UTC").to_string()
}

/// Renders one card.
#[must_use]
pub fn format_card(card: &ItemCard) -> String {
    let item = &card.item;
    let mut out = format!(
        "{} ({}) [{}] - {}\n",
        item.name, item.id, item.category, card.status
    );
    let _ = writeln!(out, "  {}", format_progress_bar(card.percent, None));
    let _ = writeln!(
        out,
        "  In stock: {} / {} {}   This month: {} {}",
        format_quantity(item.current_stock),
        format_quantity(item.recommended_stock),
        item.unit,
        format_quantity(item.monthly_consumption),
        item.unit
    );
    let _ = writeln!(out, "  Last updated: {}", format_last_updated(item.last_updated));
    out
}

/// Renders the low-stock banner, or `None` when nothing is low.
#[must_use]
pub fn format_alert_banner(alerts: &[InventoryItem]) -> Option<String> {
    if alerts.is_empty() {
        return None;
    }

    let mut banner = String::from("⚠️  Low stock\n");
    for item in alerts {
        let _ = writeln!(
            banner,
            "  {}: {}{} left (recommended: {}{})",
            item.name,
            format_quantity(item.current_stock),
            item.unit,
            format_quantity(item.recommended_stock),
            item.unit
        );
    }
    Some(banner)
}

/// Renders the whole view: alert banner first, then the cards.
#[must_use]
pub fn format_view(view: &InventoryView) -> String {
    let mut out = String::new();
    if let Some(banner) = format_alert_banner(&view.alerts) {
        out.push_str(&banner);
        out.push('\n');
    }

    if view.cards.is_empty() {
        out.push_str("No items to show.\n");
        return out;
    }

    for card in &view.cards {
        out.push_str(&format_card(card));
        out.push('\n');
    }
    out
}

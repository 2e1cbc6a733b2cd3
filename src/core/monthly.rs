//! Monthly consumption rollover.
//!
//! Monthly consumption must only reflect the current calendar month. The date of
//! the last reset is kept as a single record in the `system_state` table rather
//! than read off any one item, so an empty collection or items with diverging
//! histories cannot confuse the check. Month boundaries are computed in UTC.

use crate::{
    core::{item::InventoryItem, report::format_quantity},
    entities::{SystemState, system_state},
    errors::{Error, Result},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{Set, prelude::*};
use tracing::debug;

pub(crate) const LAST_MONTHLY_RESET_KEY: &str = "last_monthly_reset";

/// Consumption cleared from a single item by a reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResetResult {
    /// Name of the item
    pub item_name: String,
    /// Display unit
    pub unit: String,
    /// Monthly consumption before it was zeroed
    pub cleared_consumption: f64,
}

/// Result of resetting monthly consumption across the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyResetResult {
    /// Per-item detail, in collection order
    pub reset_items: Vec<ItemResetResult>,
    /// Total number of items processed
    pub total_items_processed: usize,
    /// Date the reset was performed
    pub reset_date: NaiveDate,
}

impl MonthlyResetResult {
    /// Captures what a reset at `now` is about to clear from `items`.
    #[must_use]
    pub fn capture(items: &[InventoryItem], now: DateTime<Utc>) -> Self {
        let reset_items: Vec<ItemResetResult> = items
            .iter()
            .map(|item| ItemResetResult {
                item_name: item.name.clone(),
                unit: item.unit.clone(),
                cleared_consumption: item.monthly_consumption,
            })
            .collect();

        Self {
            total_items_processed: reset_items.len(),
            reset_items,
            reset_date: now.date_naive(),
        }
    }
}

/// First day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whether a reset is due: no reset has been recorded yet, or the last one
/// happened before the start of `today`'s month.
#[must_use]
pub fn is_monthly_reset_needed(last_reset: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_reset.is_none_or(|last| last < start_of_month(today))
}

/// Retrieves the date of the last monthly reset from the `system_state` table.
///
/// # Returns
/// * `Ok(Some(date))` - Last reset date if one was recorded
/// * `Ok(None)` - No reset recorded yet
pub async fn get_last_monthly_reset_date<C>(db: &C) -> Result<Option<NaiveDate>>
where
    C: ConnectionTrait,
{
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(LAST_MONTHLY_RESET_KEY))
        .one(db)
        .await?;

    match state {
        Some(s) => NaiveDate::parse_from_str(&s.value, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| Error::Config {
                message: format!("Failed to parse last monthly reset date: {e}"),
            }),
        None => Ok(None),
    }
}

/// Records `date` as the last monthly reset, inserting or updating the entry.
pub async fn set_last_monthly_reset_date<C>(db: &C, date: NaiveDate) -> Result<()>
where
    C: ConnectionTrait,
{
    let date_str = date.format("%Y-%m-%d").to_string();
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(LAST_MONTHLY_RESET_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(date_str);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(LAST_MONTHLY_RESET_KEY.to_string()),
            value: Set(date_str),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
    }

    debug!("Recorded last monthly reset as {}", date);
    Ok(())
}

/// Checks the stored boundary against `now`.
pub async fn is_monthly_reset_due<C>(db: &C, now: DateTime<Utc>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let last_reset = get_last_monthly_reset_date(db).await?;
    Ok(is_monthly_reset_needed(last_reset, now.date_naive()))
}

/// Formats a reset result into a human-readable summary for logs and the CLI.
#[must_use]
pub fn format_monthly_reset_summary(result: &MonthlyResetResult) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Monthly Reset - {} - Processed {} items\n",
        result.reset_date.format("%B %Y"),
        result.total_items_processed
    );

    for item in &result.reset_items {
        // write! to a String cannot fail
        let _ = writeln!(
            summary,
            "  {} | consumed {}{} → 0",
            item.item_name,
            format_quantity(item.cleared_consumption),
            item.unit
        );
    }

    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_items, setup_test_db};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(date(2024, 3, 17)), date(2024, 3, 1));
        assert_eq!(start_of_month(date(2024, 3, 1)), date(2024, 3, 1));
    }

    #[test]
    fn test_reset_needed_when_never_reset() {
        assert!(is_monthly_reset_needed(None, date(2024, 3, 17)));
    }

    #[test]
    fn test_reset_not_needed_within_same_month() {
        assert!(!is_monthly_reset_needed(Some(date(2024, 3, 1)), date(2024, 3, 31)));
        assert!(!is_monthly_reset_needed(Some(date(2024, 3, 20)), date(2024, 3, 21)));
    }

    #[test]
    fn test_reset_needed_after_month_boundary() {
        assert!(is_monthly_reset_needed(Some(date(2024, 2, 29)), date(2024, 3, 1)));
        assert!(is_monthly_reset_needed(Some(date(2023, 12, 31)), date(2024, 1, 2)));
        // Same month number, earlier year
        assert!(is_monthly_reset_needed(Some(date(2023, 3, 15)), date(2024, 3, 15)));
    }

    #[test]
    fn test_reset_not_needed_for_future_record() {
        // A record from a later month (clock moved back) is not "earlier"
        assert!(!is_monthly_reset_needed(Some(date(2024, 5, 1)), date(2024, 3, 10)));
    }

    #[tokio::test]
    async fn test_get_last_monthly_reset_date_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_last_monthly_reset_date(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_last_monthly_reset_date_updates_existing() -> Result<()> {
        let db = setup_test_db().await?;

        set_last_monthly_reset_date(&db, date(2024, 1, 1)).await?;
        set_last_monthly_reset_date(&db, date(2024, 2, 1)).await?;

        assert_eq!(get_last_monthly_reset_date(&db).await?, Some(date(2024, 2, 1)));

        let count = SystemState::find()
            .filter(system_state::Column::Key.eq(LAST_MONTHLY_RESET_KEY))
            .count(&db)
            .await?;
        assert_eq!(count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_reset_date_is_config_error() -> Result<()> {
        let db = setup_test_db().await?;
        system_state::ActiveModel {
            key: Set(LAST_MONTHLY_RESET_KEY.to_string()),
            value: Set("last tuesday".to_string()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let result = get_last_monthly_reset_date(&db).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_format_monthly_reset_summary() {
        let mut items = sample_items();
        items[0].monthly_consumption = 3.0;
        items[1].monthly_consumption = 1.5;
        let now = date(2024, 3, 1).and_hms_opt(9, 0, 0).unwrap().and_utc();

        let result = MonthlyResetResult::capture(&items, now);
        assert_eq!(result.total_items_processed, 3);

        let summary = format_monthly_reset_summary(&result);
        assert!(summary.contains("March 2024"));
        assert!(summary.contains("Processed 3 items"));
        assert!(summary.contains("キャノーラ油 | consumed 3L → 0"));
        assert!(summary.contains("consumed 1.5パック → 0"));
    }
}

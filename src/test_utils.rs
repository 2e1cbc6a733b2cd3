//! Shared test utilities for `PantryBuddy`.
//!
//! Helpers for setting up in-memory databases and building items with fixed
//! timestamps, so assertions on dates stay deterministic.

use crate::{
    config::items::Config,
    core::{InventoryItem, InventoryStore, inventory},
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// Fixed clock reading used across tests: 2024-03-15 10:30:00 UTC.
#[must_use]
pub fn test_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// In-memory database seeded with the default items at [`test_time`].
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    inventory::seed_initial_items(&db, &Config::default(), test_time()).await?;
    Ok(db)
}

/// Store opened over a fresh in-memory database at [`test_time`].
pub async fn open_test_store() -> Result<InventoryStore> {
    let db = setup_test_db().await?;
    InventoryStore::open_at(db, &Config::default(), test_time()).await
}

/// Builds an item with unit `pc`, no consumption, and both timestamps at [`test_time`].
#[must_use]
pub fn sample_item(
    id: &str,
    name: &str,
    category: &str,
    current_stock: f64,
    recommended_stock: f64,
) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        current_stock,
        recommended_stock,
        unit: "pc".to_string(),
        monthly_consumption: 0.0,
        last_updated: test_time(),
        last_month_reset: test_time(),
    }
}

/// The default seed items as they look right after seeding at [`test_time`].
#[must_use]
pub fn sample_items() -> Vec<InventoryItem> {
    Config::default()
        .items
        .into_iter()
        .map(|seed| InventoryItem {
            id: seed.id,
            name: seed.name,
            category: seed.category,
            current_stock: seed.current_stock,
            recommended_stock: seed.recommended_stock,
            unit: seed.unit,
            monthly_consumption: 0.0,
            last_updated: test_time(),
            last_month_reset: test_time(),
        })
        .collect()
}

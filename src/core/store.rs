//! The inventory store - single source of truth for the item collection.
//!
//! `InventoryStore` is built once at startup and handed to whatever needs it. It
//! owns the in-memory collection and the database connection; every mutation is
//! applied in memory first and then written through explicitly. The store is the
//! only sanctioned write path: callers get a read-only slice back from
//! [`InventoryStore::items`].

use crate::{
    config::items::Config,
    core::{
        inventory,
        item::{self, InventoryItem, StockAdjustment, StockChange},
        monthly::{self, MonthlyResetResult, format_monthly_reset_summary},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Namespace under which the collection is persisted and exported.
pub const STORAGE_KEY: &str = "inventory-storage";

/// Explicit store object for the item collection.
#[derive(Debug)]
pub struct InventoryStore {
    db: DatabaseConnection,
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    /// Opens the store: seeds the collection on first run, rehydrates it, and runs
    /// the monthly rollover check. This is one view-layer activation.
    pub async fn open(db: DatabaseConnection, config: &Config) -> Result<Self> {
        Self::open_at(db, config, Utc::now()).await
    }

    /// [`InventoryStore::open`] with an explicit clock reading.
    #[instrument(skip(db, config))]
    pub async fn open_at(
        db: DatabaseConnection,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let txn = db.begin().await?;
        if inventory::seed_initial_items(&txn, config, now).await? > 0 {
            // A fresh inventory starts the month already reset
            monthly::set_last_monthly_reset_date(&txn, now.date_naive()).await?;
        }
        txn.commit().await?;

        let items = inventory::get_all_items(&db).await?;
        info!("Loaded {} inventory items from {}", items.len(), STORAGE_KEY);

        let mut store = Self { db, items };
        if let Some(result) = store.ensure_current_month_at(now).await? {
            info!("{}", format_monthly_reset_summary(&result));
        }
        Ok(store)
    }

    /// Read-only view of the current collection, in display order.
    #[must_use]
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Looks up one item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The underlying database connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Adjusts the stock of one item and persists it.
    ///
    /// Returns `Ok(None)` if no item has `id`; nothing is changed in that case.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for a non-finite amount, or a database error
    /// if the write fails.
    pub async fn update_stock(
        &mut self,
        id: &str,
        adjustment: StockAdjustment,
    ) -> Result<Option<StockChange>> {
        self.update_stock_at(id, adjustment, Utc::now()).await
    }

    /// [`InventoryStore::update_stock`] with an explicit clock reading.
    #[instrument(skip(self))]
    pub async fn update_stock_at(
        &mut self,
        id: &str,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> Result<Option<StockChange>> {
        self.ensure_current_month_at(now).await?;

        let Some(position) = self.position_of(id) else {
            debug!("No item with id {}, ignoring stock update", id);
            return Ok(None);
        };

        let mut updated = self.items[position].clone();
        let change = updated.apply_adjustment(adjustment, now)?;
        inventory::save_item(&self.db, &updated, position).await?;
        self.items[position] = updated;

        info!(
            "Stock for {} changed {} -> {} (consumed {})",
            id, change.old_stock, change.new_stock, change.consumed
        );
        Ok(Some(change))
    }

    /// Sets the recommended stock of one item and persists it.
    ///
    /// Returns `Ok(None)` if no item has `id`.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` unless `amount` is finite and positive.
    pub async fn set_recommended_stock(
        &mut self,
        id: &str,
        amount: f64,
    ) -> Result<Option<&InventoryItem>> {
        self.set_recommended_stock_at(id, amount, Utc::now()).await
    }

    /// [`InventoryStore::set_recommended_stock`] with an explicit clock reading.
    pub async fn set_recommended_stock_at(
        &mut self,
        id: &str,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<&InventoryItem>> {
        self.ensure_current_month_at(now).await?;

        let Some(position) = self.position_of(id) else {
            debug!("No item with id {}, ignoring recommended stock update", id);
            return Ok(None);
        };

        let mut updated = self.items[position].clone();
        updated.set_recommended_stock(amount, now)?;
        inventory::save_item(&self.db, &updated, position).await?;
        self.items[position] = updated;

        info!("Recommended stock for {} set to {}", id, amount);
        Ok(self.items.get(position))
    }

    /// Zeroes monthly consumption on every item, unconditionally.
    pub async fn reset_monthly_consumption(&mut self) -> Result<MonthlyResetResult> {
        self.reset_monthly_consumption_at(Utc::now()).await
    }

    /// [`InventoryStore::reset_monthly_consumption`] with an explicit clock reading.
    ///
    /// All items and the reset record are written in one transaction, so a failed
    /// write leaves both the database and the in-memory collection unchanged.
    #[instrument(skip(self))]
    pub async fn reset_monthly_consumption_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<MonthlyResetResult> {
        let result = MonthlyResetResult::capture(&self.items, now);

        let mut updated = self.items.clone();
        item::reset_monthly_consumption(&mut updated, now);

        let txn = self.db.begin().await?;
        inventory::save_all_items(&txn, &updated).await?;
        monthly::set_last_monthly_reset_date(&txn, now.date_naive()).await?;
        txn.commit().await?;

        self.items = updated;
        info!("Monthly consumption reset for {} items", result.total_items_processed);
        Ok(result)
    }

    /// Runs the rollover check: resets monthly consumption if the last recorded
    /// reset predates the start of the current month.
    ///
    /// Returns `Ok(None)` when the current month has already been reset.
    pub async fn ensure_current_month(&mut self) -> Result<Option<MonthlyResetResult>> {
        self.ensure_current_month_at(Utc::now()).await
    }

    /// [`InventoryStore::ensure_current_month`] with an explicit clock reading.
    pub async fn ensure_current_month_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Option<MonthlyResetResult>> {
        if !monthly::is_monthly_reset_due(&self.db, now).await? {
            return Ok(None);
        }
        debug!("New month detected, resetting monthly consumption");
        self.reset_monthly_consumption_at(now).await.map(Some)
    }

    /// Replaces the state of items that share an id with `incoming`.
    ///
    /// Used to restore a persisted record. Unknown ids are skipped and no item is
    /// created or removed. Returns the number of items restored.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` if a record breaks the quantity invariants and
    /// `Error::DuplicateItem` if an id repeats; nothing is written in either case.
    pub async fn restore(&mut self, incoming: &[InventoryItem]) -> Result<usize> {
        self.restore_at(incoming, Utc::now()).await
    }

    /// [`InventoryStore::restore`] with an explicit clock reading.
    ///
    /// Runs the rollover check first. Records last reset before the current month
    /// carry stale consumption, which is dropped rather than carried into this month.
    #[instrument(skip(self, incoming), fields(count = incoming.len()))]
    pub async fn restore_at(
        &mut self,
        incoming: &[InventoryItem],
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let mut seen = HashSet::new();
        for record in incoming {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateItem {
                    id: record.id.clone(),
                });
            }
        }

        self.ensure_current_month_at(now).await?;
        let month_start = monthly::start_of_month(now.date_naive());

        let mut updated = self.items.clone();
        let mut restored = 0;
        for record in incoming {
            if let Some(slot) = updated.iter_mut().find(|item| item.id == record.id) {
                slot.restore_from(record, month_start);
                restored += 1;
            } else {
                debug!("Skipping unknown item {} in restore", record.id);
            }
        }

        let txn = self.db.begin().await?;
        inventory::save_all_items(&txn, &updated).await?;
        txn.commit().await?;

        self.items = updated;
        info!("Restored {} of {} items", restored, incoming.len());
        Ok(restored)
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

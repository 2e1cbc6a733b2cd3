//! Inventory item domain type and its mutation rules.
//!
//! Everything in here is pure: functions take the current time as an argument
//! and never touch the database, so the store can apply a change in memory and
//! persist it afterwards.

use crate::{
    entities::item,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One tracked stock-keeping unit.
///
/// Serialized with camelCase keys and RFC 3339 timestamps; this is the shape of
/// the persisted record written by [`crate::core::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Stable identifier, never reassigned
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Quantity on hand, never negative
    pub current_stock: f64,
    /// Target quantity, always positive
    pub recommended_stock: f64,
    /// Display unit
    pub unit: String,
    /// Quantity removed since the last monthly reset
    pub monthly_consumption: f64,
    /// Time of the most recent mutation
    pub last_updated: DateTime<Utc>,
    /// Time of the most recent monthly reset
    pub last_month_reset: DateTime<Utc>,
}

/// How a stock update should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockAdjustment {
    /// Add a signed quantity to the current stock (e.g. -5, -1, +1, +5)
    Delta(f64),
    /// Replace the current stock with an absolute quantity
    SetTo(f64),
}

impl StockAdjustment {
    const fn amount(self) -> f64 {
        match self {
            Self::Delta(amount) | Self::SetTo(amount) => amount,
        }
    }
}

/// Outcome of applying a [`StockAdjustment`] to one item.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    /// Stock before the change
    pub old_stock: f64,
    /// Stock after the change
    pub new_stock: f64,
    /// Amount added to `monthly_consumption`
    pub consumed: f64,
}

impl InventoryItem {
    /// Applies a stock adjustment in place.
    ///
    /// The resulting stock is clamped at zero in both forms. Only decreases count
    /// toward monthly consumption, and only by the amount actually removed, so a
    /// `Delta(-10)` against a stock of 3 records 3.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` if the adjustment amount is not finite.
    pub fn apply_adjustment(
        &mut self,
        adjustment: StockAdjustment,
        now: DateTime<Utc>,
    ) -> Result<StockChange> {
        let amount = adjustment.amount();
        if !amount.is_finite() {
            return Err(Error::InvalidAmount { amount });
        }

        let old_stock = self.current_stock;
        let new_stock = match adjustment {
            StockAdjustment::Delta(delta) => old_stock + delta,
            StockAdjustment::SetTo(target) => target,
        }
        .max(0.0);
        let consumed = (old_stock - new_stock).max(0.0);

        self.current_stock = new_stock;
        self.monthly_consumption += consumed;
        self.touch(now);

        Ok(StockChange {
            old_stock,
            new_stock,
            consumed,
        })
    }

    /// Replaces the recommended stock.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` unless `amount` is finite and positive, since
    /// it becomes the denominator of every stock ratio for this item.
    pub fn set_recommended_stock(&mut self, amount: f64, now: DateTime<Utc>) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
        self.recommended_stock = amount;
        self.touch(now);
        Ok(())
    }

    /// Zeroes the monthly consumption counter and stamps the reset time.
    pub fn reset_monthly_consumption(&mut self, now: DateTime<Utc>) {
        self.monthly_consumption = 0.0;
        self.last_month_reset = now;
    }

    /// Checks the quantity invariants: stock and consumption are finite and
    /// non-negative, and the recommended stock is finite and positive.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` carrying the first offending value.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.current_stock, self.current_stock >= 0.0),
            (self.recommended_stock, self.recommended_stock > 0.0),
            (self.monthly_consumption, self.monthly_consumption >= 0.0),
        ];
        for (amount, ok) in checks {
            if !ok || !amount.is_finite() {
                return Err(Error::InvalidAmount { amount });
            }
        }
        Ok(())
    }

    /// Takes over the state of `record`, which must carry the same id.
    ///
    /// Consumption recorded in a month before `month_start` no longer counts, so
    /// such a record arrives with a zero counter and this item's reset stamp.
    /// `last_updated` keeps the later of the two timestamps.
    pub fn restore_from(&mut self, record: &Self, month_start: NaiveDate) {
        let last_updated = self.last_updated.max(record.last_updated);
        let last_month_reset = self.last_month_reset;

        *self = record.clone();
        self.last_updated = last_updated;
        if record.last_month_reset.date_naive() < month_start {
            self.monthly_consumption = 0.0;
            self.last_month_reset = last_month_reset;
        }
    }

    /// `last_updated` never moves backwards, even if the clock does.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = self.last_updated.max(now);
    }

    /// Converts the item into an active model at the given collection position.
    #[must_use]
    pub fn to_active_model(&self, position: i32) -> item::ActiveModel {
        use sea_orm::Set;

        item::ActiveModel {
            id: Set(self.id.clone()),
            position: Set(position),
            name: Set(self.name.clone()),
            category: Set(self.category.clone()),
            current_stock: Set(self.current_stock),
            recommended_stock: Set(self.recommended_stock),
            unit: Set(self.unit.clone()),
            monthly_consumption: Set(self.monthly_consumption),
            last_updated: Set(self.last_updated),
            last_month_reset: Set(self.last_month_reset),
        }
    }
}

impl From<item::Model> for InventoryItem {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            current_stock: model.current_stock,
            recommended_stock: model.recommended_stock,
            unit: model.unit,
            monthly_consumption: model.monthly_consumption,
            last_updated: model.last_updated,
            last_month_reset: model.last_month_reset,
        }
    }
}

/// Applies `adjustment` to the item with `id`, leaving every other item untouched.
///
/// Returns `Ok(None)` when no item matches; an unknown id is not an error.
///
/// # Errors
/// Returns `Error::InvalidAmount` if the adjustment amount is not finite.
pub fn update_stock(
    items: &mut [InventoryItem],
    id: &str,
    adjustment: StockAdjustment,
    now: DateTime<Utc>,
) -> Result<Option<StockChange>> {
    items
        .iter_mut()
        .find(|item| item.id == id)
        .map(|item| item.apply_adjustment(adjustment, now))
        .transpose()
}

/// Resets monthly consumption on every item.
pub fn reset_monthly_consumption(items: &mut [InventoryItem], now: DateTime<Utc>) {
    for item in items {
        item.reset_monthly_consumption(now);
    }
}

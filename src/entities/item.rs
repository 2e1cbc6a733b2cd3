//! Inventory item entity - One row per tracked stock-keeping unit.
//!
//! Rows are seeded once on first run and then only updated in place; the
//! `position` column preserves the seed order so listings stay stable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Stable identifier assigned at seed time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Zero-based position in the collection
    pub position: i32,
    /// Display name (e.g., "Canola oil")
    pub name: String,
    /// Free-form category label (e.g., "Seasoning")
    pub category: String,
    /// Quantity currently on hand
    pub current_stock: f64,
    /// Target quantity; denominator for the stock ratio
    pub recommended_stock: f64,
    /// Display unit (e.g., "L", "pack")
    pub unit: String,
    /// Total removed since the last monthly reset
    pub monthly_consumption: f64,
    /// When this item was last mutated
    pub last_updated: DateTimeUtc,
    /// When `monthly_consumption` was last zeroed
    pub last_month_reset: DateTimeUtc,
}

/// Items have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

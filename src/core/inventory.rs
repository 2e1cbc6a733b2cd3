//! Item persistence - loading, saving and seeding the `inventory_items` table.
//!
//! The store keeps the authoritative collection in memory; these functions are
//! the explicit write-through it calls after every mutation.

use crate::{
    config::items::Config,
    core::item::InventoryItem,
    entities::{Item, item},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, prelude::*};
use tracing::{debug, info, instrument};

/// Loads the full collection in display order.
pub async fn get_all_items<C>(db: &C) -> Result<Vec<InventoryItem>>
where
    C: ConnectionTrait,
{
    let models = Item::find()
        .order_by_asc(item::Column::Position)
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;
    Ok(models.into_iter().map(InventoryItem::from).collect())
}

/// Finds one item by id.
pub async fn get_item_by_id<C>(db: &C, id: &str) -> Result<Option<InventoryItem>>
where
    C: ConnectionTrait,
{
    Ok(Item::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(InventoryItem::from))
}

/// Writes an existing item back to the database.
///
/// # Errors
/// Returns an error if the row does not exist or the update fails.
#[instrument(skip(db, inventory_item), fields(id = %inventory_item.id))]
pub async fn save_item<C>(db: &C, inventory_item: &InventoryItem, position: usize) -> Result<()>
where
    C: ConnectionTrait,
{
    inventory_item
        .to_active_model(to_position(position)?)
        .update(db)
        .await?;
    debug!(
        "Saved item {} (stock {}, consumed {})",
        inventory_item.id, inventory_item.current_stock, inventory_item.monthly_consumption
    );
    Ok(())
}

/// Writes every item back, in collection order.
pub async fn save_all_items<C>(db: &C, items: &[InventoryItem]) -> Result<()>
where
    C: ConnectionTrait,
{
    for (position, inventory_item) in items.iter().enumerate() {
        save_item(db, inventory_item, position).await?;
    }
    Ok(())
}

/// Seeds the configured items if the table is empty.
///
/// Returns the number of items inserted; zero means the inventory already existed.
#[instrument(skip(db, config))]
pub async fn seed_initial_items<C>(db: &C, config: &Config, now: DateTime<Utc>) -> Result<usize>
where
    C: ConnectionTrait,
{
    let existing = Item::find().count(db).await?;
    if existing > 0 {
        debug!("Inventory already holds {} items, skipping seed", existing);
        return Ok(0);
    }

    config.validate()?;
    for (position, seed) in config.items.iter().enumerate() {
        let inventory_item = InventoryItem {
            id: seed.id.clone(),
            name: seed.name.clone(),
            category: seed.category.clone(),
            current_stock: seed.current_stock,
            recommended_stock: seed.recommended_stock,
            unit: seed.unit.clone(),
            monthly_consumption: 0.0,
            last_updated: now,
            last_month_reset: now,
        };
        inventory_item
            .to_active_model(to_position(position)?)
            .insert(db)
            .await?;
    }

    info!("Seeded {} inventory items", config.items.len());
    Ok(config.items.len())
}

fn to_position(position: usize) -> Result<i32> {
    i32::try_from(position).map_err(|e| Error::Config {
        message: format!("Item position {position} out of range: {e}"),
    })
}

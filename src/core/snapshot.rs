//! The persisted record - the item collection as a JSON array.
//!
//! Field names are camelCase and timestamps are RFC 3339 strings, so a record
//! written here can be read back by any tool that speaks ISO-8601.

use crate::{core::item::InventoryItem, errors::Result};
use std::{fs, path::Path};
use tracing::{debug, info};

/// Serializes the collection to the persisted JSON form.
pub fn to_json(items: &[InventoryItem]) -> Result<String> {
    serde_json::to_string_pretty(items).map_err(Into::into)
}

/// Parses a persisted record and checks the item invariants.
///
/// # Errors
/// Returns `Error::Snapshot` on malformed JSON, or `Error::InvalidAmount` if an
/// item has a negative stock or consumption or a non-positive recommended stock.
pub fn from_json(json: &str) -> Result<Vec<InventoryItem>> {
    let items: Vec<InventoryItem> = serde_json::from_str(json)?;
    for item in &items {
        item.validate()?;
    }
    debug!("Parsed {} items from snapshot", items.len());
    Ok(items)
}

/// Writes the collection to `path`.
pub fn write_snapshot<P: AsRef<Path>>(path: P, items: &[InventoryItem]) -> Result<()> {
    fs::write(path.as_ref(), to_json(items)?)?;
    info!("Wrote {} items to {}", items.len(), path.as_ref().display());
    Ok(())
}

/// Reads and validates a record from `path`.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryItem>> {
    let contents = fs::read_to_string(path.as_ref())?;
    from_json(&contents)
}

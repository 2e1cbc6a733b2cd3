//! Core business logic - framework-agnostic inventory rules, persistence and
//! presentation data.

/// Item persistence in the `inventory_items` table
pub mod inventory;
/// `InventoryItem`, stock adjustments and their pure mutation rules
pub mod item;
/// Category filtering and sorting
pub mod listing;
/// Monthly consumption rollover
pub mod monthly;
/// View model and text rendering
pub mod report;
/// JSON export/import of the persisted record
pub mod snapshot;
/// Stock ratio and status classification
pub mod status;
/// The explicit inventory store
pub mod store;

pub use item::{InventoryItem, StockAdjustment, StockChange};
pub use listing::{CategoryFilter, SortKey};
pub use status::StockStatus;
pub use store::InventoryStore;

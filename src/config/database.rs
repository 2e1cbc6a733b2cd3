//! Database configuration module for `PantryBuddy`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Item, SystemState};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::env::{self, VarError};
use tracing::{debug, info};

/// Database used when `DATABASE_URL` is not set. `mode=rwc` creates the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://pantry_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file next to the working directory.
///
/// # Errors
/// Returns an error if `DATABASE_URL` is set but not valid unicode.
pub fn get_database_url() -> Result<String> {
    match env::var("DATABASE_URL") {
        Ok(url) => Ok(url),
        Err(VarError::NotPresent) => Ok(DEFAULT_DATABASE_URL.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Establishes a connection to the configured database.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `inventory_items` and `system_state` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let item_table = schema.create_table_from_entity(Item).if_not_exists().to_owned();
    let system_state_table = schema
        .create_table_from_entity(SystemState)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&system_state_table)).await?;

    info!("Database tables ready");
    Ok(())
}

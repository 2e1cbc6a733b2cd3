/// Database configuration and connection management
pub mod database;

/// Seed item configuration loading from config.toml
pub mod items;

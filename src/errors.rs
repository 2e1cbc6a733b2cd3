//! Unified error types and result handling for `PantryBuddy`.

use thiserror::Error;

/// All errors that can surface from the inventory store, its persistence layer,
/// or the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration (seed items, stored state).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Failure reported by the database layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stock quantity that is not finite or falls outside the allowed range.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// The same item id appears more than once in a restored record.
    #[error("Duplicate item id in record: {id}")]
    DuplicateItem {
        /// The repeated id
        id: String,
    },

    /// The persisted JSON record could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Filesystem failure while reading config or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable could not be read.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

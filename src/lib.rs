//! `PantryBuddy` - A household inventory tracker
//!
//! This crate tracks household stock items against recommended levels, records how
//! much of each item is used per calendar month, and flags items that are running
//! low. State lives in a local `SQLite` database and the monthly counters reset
//! automatically when a new month begins.

#![deny(
    unsafe_code,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::float_cmp,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::dbg_macro,
    clippy::todo,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Configuration management for the database and seed items
pub mod config;
/// Core business logic - inventory rules, persistence and presentation data
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;

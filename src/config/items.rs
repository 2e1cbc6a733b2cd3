//! Seed item configuration loading from config.toml
//!
//! The items listed here populate the inventory on first run. Once the database
//! holds items the configuration is no longer consulted, since items are never
//! created or removed afterwards.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Items to seed, in display order
    pub items: Vec<ItemConfig>,
}

/// Configuration for a single seed item
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Stable identifier for the item
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label used for filtering
    pub category: String,
    /// Quantity on hand when seeded
    #[serde(default)]
    pub current_stock: f64,
    /// Target quantity
    pub recommended_stock: f64,
    /// Display unit
    pub unit: String,
}

impl ItemConfig {
    fn new(id: &str, name: &str, category: &str, current: f64, recommended: f64, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            current_stock: current,
            recommended_stock: recommended,
            unit: unit.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: vec![
                ItemConfig::new("1", "キャノーラ油", "調味料", 8.0, 10.0, "L"),
                ItemConfig::new("2", "えのき", "野菜", 15.0, 20.0, "パック"),
                ItemConfig::new("3", "卵（10個入り）", "食材", 12.0, 15.0, "パック"),
            ],
        }
    }
}

impl Config {
    /// Checks that every seed item satisfies the inventory invariants.
    ///
    /// # Errors
    /// Returns `Error::Config` on an empty or duplicate id, a non-positive
    /// recommended stock, or a negative or non-finite current stock.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(Error::Config {
                    message: format!("Item '{}' has an empty id", item.name),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate item id '{}'", item.id),
                });
            }
            if !item.recommended_stock.is_finite() || item.recommended_stock <= 0.0 {
                return Err(Error::Config {
                    message: format!(
                        "Item '{}' must have a positive recommended_stock, got {}",
                        item.id, item.recommended_stock
                    ),
                });
            }
            if !item.current_stock.is_finite() || item.current_stock < 0.0 {
                return Err(Error::Config {
                    message: format!(
                        "Item '{}' must have a non-negative current_stock, got {}",
                        item.id, item.current_stock
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Loads and validates seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
/// - An item violates the inventory invariants
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads seed configuration from `path`, or the built-in defaults when the file
/// does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read, parsed or validated.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        info!(
            "No config at {}, using built-in seed items",
            path.as_ref().display()
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_item_config() {
        let toml_str = r#"
            [[items]]
            id = "rice"
            name = "Rice"
            category = "staples"
            current_stock = 4
            recommended_stock = 10.0
            unit = "kg"

            [[items]]
            id = "soap"
            name = "Dish soap"
            category = "cleaning"
            recommended_stock = 2
            unit = "bottle"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[0].id, "rice");
        assert_eq!(config.items[0].current_stock, 4.0);
        assert_eq!(config.items[0].recommended_stock, 10.0);

        // current_stock defaults to zero when omitted
        assert_eq!(config.items[1].current_stock, 0.0);
        assert_eq!(config.items[1].recommended_stock, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.items.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let config = Config {
            items: vec![
                ItemConfig::new("a", "One", "x", 1.0, 2.0, "u"),
                ItemConfig::new("a", "Two", "x", 1.0, 2.0, "u"),
            ],
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_non_positive_recommended() {
        let config = Config {
            items: vec![ItemConfig::new("a", "One", "x", 1.0, 0.0, "u")],
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_negative_current() {
        let config = Config {
            items: vec![ItemConfig::new("a", "One", "x", -1.0, 5.0, "u")],
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.items.len(), 3);
    }
}

//! Application settings loaded from config.toml
//!
//! The file holds display settings, the balance rule, and optional groups that are
//! seeded into the store on startup when no group of that name exists yet.

use crate::core::balance::BalanceMode;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
    /// Groups to seed
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Symbol placed before displayed amounts
    pub currency_symbol: String,
    /// How balances are computed from expenses
    pub balance_mode: BalanceMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            balance_mode: BalanceMode::default(),
        }
    }
}

/// A group to create on startup
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSeed {
    /// Group name, also used to detect an existing group
    pub name: String,
    /// Member usernames
    pub members: Vec<String>,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type or an unknown balance mode
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `SPLIT_BUDDY_CONFIG` (default `./config.toml`).
///
/// A missing file is not an error: defaults are used instead.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("SPLIT_BUDDY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        info!("No configuration file at {path}, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [settings]
            currency_symbol = "$"
            balance_mode = "recorded_shares"

            [[groups]]
            name = "Flat"
            members = ["alice", "bob"]

            [[groups]]
            name = "Climbing"
            members = ["carol"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.settings.currency_symbol, "$");
        assert_eq!(config.settings.balance_mode, BalanceMode::RecordedShares);
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[0].members, vec!["alice", "bob"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.settings.currency_symbol, "₹");
        assert_eq!(config.settings.balance_mode, BalanceMode::GroupEqual);
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_unknown_balance_mode_rejected() {
        let err = parse_config("[settings]\nbalance_mode = \"magic\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

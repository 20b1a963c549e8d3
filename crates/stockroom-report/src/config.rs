//! Report configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

use serde::{Deserialize, Serialize};
use stockroom_core::{InventoryPolicy, PriceRule, ValidationPolicy, LOW_STOCK_THRESHOLD};

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Reject zero prices (`STOCKROOM_STRICT_PRICE`)
    pub strict_price: bool,

    /// Currency symbol for displayed amounts (`STOCKROOM_CURRENCY_SYMBOL`)
    pub currency_symbol: String,

    /// Low-stock threshold (`STOCKROOM_LOW_STOCK_THRESHOLD`)
    pub low_stock_threshold: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            strict_price: false,
            currency_symbol: "$".to_string(),
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ReportConfig::default();

        let config = ReportConfig {
            strict_price: match lookup("STOCKROOM_STRICT_PRICE") {
                Some(value) => parse_flag(&value)
                    .ok_or_else(|| ConfigError::InvalidValue("STOCKROOM_STRICT_PRICE".to_string()))?,
                None => defaults.strict_price,
            },

            currency_symbol: lookup("STOCKROOM_CURRENCY_SYMBOL")
                .unwrap_or(defaults.currency_symbol),

            low_stock_threshold: match lookup("STOCKROOM_LOW_STOCK_THRESHOLD") {
                Some(value) => value.trim().parse().map_err(|_| {
                    ConfigError::InvalidValue("STOCKROOM_LOW_STOCK_THRESHOLD".to_string())
                })?,
                None => defaults.low_stock_threshold,
            },
        };

        if config.currency_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_CURRENCY_SYMBOL".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            price_rule: if self.strict_price {
                PriceRule::RequirePositive
            } else {
                PriceRule::AllowZero
            },
            ..ValidationPolicy::default()
        }
    }

    pub fn inventory_policy(&self) -> InventoryPolicy {
        InventoryPolicy {
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ReportConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        ReportConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.validation_policy().price_rule, PriceRule::AllowZero);
        assert_eq!(config.inventory_policy().low_stock_threshold, 20);
    }

    #[test]
    fn test_strict_price_flag() {
        let config = load(&[("STOCKROOM_STRICT_PRICE", "TRUE")]).unwrap();
        assert!(config.strict_price);
        assert_eq!(
            config.validation_policy().price_rule,
            PriceRule::RequirePositive
        );

        assert!(!load(&[("STOCKROOM_STRICT_PRICE", "0")]).unwrap().strict_price);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("STOCKROOM_STRICT_PRICE", "maybe")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STOCKROOM_STRICT_PRICE");

        assert!(load(&[("STOCKROOM_LOW_STOCK_THRESHOLD", "-5")]).is_err());
        assert!(load(&[("STOCKROOM_CURRENCY_SYMBOL", " ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOCKROOM_CURRENCY_SYMBOL", "€"),
            ("STOCKROOM_LOW_STOCK_THRESHOLD", "5"),
        ])
        .unwrap();

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.inventory_policy().low_stock_threshold, 5);
    }
}

//! # Policy Configuration
//!
//! Business policy values handed to the validator and the status calculator.
//!
//! Both structs default to the crate-level constants and deserialize with
//! `#[serde(default)]`, so a partial settings object only overrides what it
//! names. Loading from the environment is the application's job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DESCRIPTION_MAX_CHARS, LOW_STOCK_THRESHOLD};

/// How a zero price is treated.
///
/// The shared product schema accepts `0` while the create form and the API
/// model require a positive price. Until that is settled both are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceRule {
    /// `price >= 0` (free items allowed).
    #[default]
    AllowZero,

    /// `price > 0`.
    RequirePositive,
}

/// Rules applied by [`crate::validation::ProductValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationPolicy {
    pub price_rule: PriceRule,

    /// Maximum description length in characters.
    pub description_max_chars: usize,
}

impl ValidationPolicy {
    /// The stricter variant used by the create form.
    pub fn strict_price() -> Self {
        ValidationPolicy {
            price_rule: PriceRule::RequirePositive,
            ..ValidationPolicy::default()
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            price_rule: PriceRule::AllowZero,
            description_max_chars: DESCRIPTION_MAX_CHARS,
        }
    }
}

/// Rules applied by [`crate::status::StatusCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryPolicy {
    /// Stock strictly below this count is "Low Stock" (zero is "Out of Stock").
    pub low_stock_threshold: u32,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        InventoryPolicy {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_crate_constants() {
        assert_eq!(InventoryPolicy::default().low_stock_threshold, 20);
        assert_eq!(ValidationPolicy::default().description_max_chars, 500);
        assert_eq!(ValidationPolicy::default().price_rule, PriceRule::AllowZero);
    }

    #[test]
    fn test_partial_policy_deserializes() {
        let policy: ValidationPolicy =
            serde_json::from_str(r#"{"priceRule":"require_positive"}"#).unwrap();
        assert_eq!(policy, ValidationPolicy::strict_price());

        let policy: InventoryPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, InventoryPolicy::default());
    }
}

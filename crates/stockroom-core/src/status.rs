//! # Inventory Status
//!
//! Derives the stock status badge for a product and the dashboard summary
//! for a product list.
//!
//! ## Status Bands
//! ```text
//! stock:   0        1 ──────────────── 19       20 ─────────────────►
//!          │        │                   │        │
//!          ▼        ▼                   ▼        ▼
//!     Out of Stock          Low Stock               In Stock
//!       (alert)             (warning)               (normal)
//!
//!  low_stock_items counts everything left of the threshold, zero included
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::InventoryPolicy;
use crate::money::Money;
use crate::types::ProductRecord;

// =============================================================================
// Stock Status
// =============================================================================

/// Display status of a product's stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    /// Badge text.
    pub const fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    pub const fn tone(&self) -> StatusTone {
        match self {
            StockStatus::OutOfStock => StatusTone::Alert,
            StockStatus::LowStock => StatusTone::Warning,
            StockStatus::InStock => StatusTone::Normal,
        }
    }

    /// Restock banner shown on the product detail page.
    pub const fn alert(&self) -> Option<&'static str> {
        match self {
            StockStatus::OutOfStock => Some("Out of stock"),
            StockStatus::LowStock => Some("Low stock alert"),
            StockStatus::InStock => None,
        }
    }

    /// True for both `LowStock` and `OutOfStock`.
    pub const fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour level of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Alert,
    Warning,
    Normal,
}

impl StatusTone {
    /// Badge CSS classes used by the dashboard.
    pub const fn badge_class(&self) -> &'static str {
        match self {
            StatusTone::Alert => "bg-red-100 text-red-800 hover:bg-red-100/80",
            StatusTone::Warning => "bg-yellow-100 text-yellow-800 hover:bg-yellow-100/80",
            StatusTone::Normal => "bg-green-100 text-green-800 hover:bg-green-100/80",
        }
    }
}

// =============================================================================
// Inventory Stats
// =============================================================================

/// Dashboard summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub total_stock: u64,
    /// Products below the low-stock threshold, out-of-stock included.
    pub low_stock_items: usize,
    /// Σ stock × price, exact in cents; dollars on the wire.
    #[ts(type = "number")]
    pub total_value: Money,
}

// =============================================================================
// Status Calculator
// =============================================================================

/// Applies an [`InventoryPolicy`] to stock levels and product lists.
///
/// ```rust
/// use stockroom_core::status::{StatusCalculator, StockStatus};
///
/// let calculator = StatusCalculator::default();
/// assert_eq!(calculator.status_of(0), StockStatus::OutOfStock);
/// assert_eq!(calculator.status_of(19), StockStatus::LowStock);
/// assert_eq!(calculator.status_of(20), StockStatus::InStock);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCalculator {
    policy: InventoryPolicy,
}

impl StatusCalculator {
    pub fn new(policy: InventoryPolicy) -> Self {
        StatusCalculator { policy }
    }

    pub fn status_of(&self, stock: u32) -> StockStatus {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock < self.policy.low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Uses the same threshold as the `Low Stock` label boundary.
    pub fn is_low_stock(&self, stock: u32) -> bool {
        stock < self.policy.low_stock_threshold
    }

    /// Summarizes `products` in a single pass. Empty input gives all zeros.
    ///
    /// Value is summed in `i128` cents and stock in `u64`; both saturate
    /// instead of wrapping.
    pub fn aggregate<'a, I>(&self, products: I) -> InventoryStats
    where
        I: IntoIterator<Item = &'a ProductRecord>,
    {
        let stats = products
            .into_iter()
            .fold(InventoryStats::default(), |mut stats, product| {
                stats.total_products += 1;
                stats.total_stock = stats.total_stock.saturating_add(u64::from(product.stock));
                if self.is_low_stock(product.stock) {
                    stats.low_stock_items += 1;
                }
                stats.total_value += product_value(product);
                stats
            });

        debug!(
            total_products = stats.total_products,
            total_stock = stats.total_stock,
            low_stock_items = stats.low_stock_items,
            total_value = %stats.total_value,
            "inventory aggregated"
        );

        stats
    }
}

/// Inventory value of one product: `stock × price`.
#[inline]
pub fn product_value(product: &ProductRecord) -> Money {
    product.value()
}

// =============================================================================
// Unit Tests
// =============================================================================

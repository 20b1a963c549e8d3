//! # stockroom-core: Pure Business Logic for the Stockroom Dashboard
//!
//! This crate holds the rules behind the inventory dashboard: whether a
//! product form is valid, what stock status a product shows, and what the
//! summary cards add up to. Everything here is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard UI (external)                         │   │
//! │  │   Products table ──► Create/Edit form ──► Product detail        │   │
//! │  └──────────────┬───────────────────────────────────▲──────────────┘   │
//! │                 │ ProductDraft                      │ FieldErrors,     │
//! │                 ▼                                   │ StockStatus,     │
//! │  ┌──────────────────────────────────────────────────┴──────────────┐   │
//! │  │            ★ stockroom-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │   │ validation │ │  status  │ │ rejection │ │ money, types │   │   │
//! │  │   │  Validator │ │ Calculator│ │ Server →  │ │ search       │   │   │
//! │  │   │            │ │  Stats   │ │ FieldErrs │ │              │   │   │
//! │  │   └────────────┘ └──────────┘ └───────────┘ └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE • PURE FUNCTIONS        │   │
//! │  └──────────────┬───────────────────────────────────▲──────────────┘   │
//! │                 │ NormalizedProduct                 │ ServerRejection  │
//! │                 ▼                                   │                  │
//! │  ┌──────────────────────────────────────────────────┴──────────────┐   │
//! │  │              Product API client (external)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductDraft, NormalizedProduct, ProductRecord, Category)
//! - [`money`] - Money type with integer arithmetic and the dollar wire format
//! - [`error`] - Field errors and their taxonomy
//! - [`validation`] - Product form validation
//! - [`status`] - Stock status and inventory statistics
//! - [`rejection`] - Server error translation
//! - [`search`] - Product table search
//! - [`config`] - Policy values for the validator and calculator
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::status::{StatusCalculator, StockStatus};
//! use stockroom_core::validation::validate_product;
//! use stockroom_core::ProductDraft;
//!
//! let draft = ProductDraft {
//!     name: "USB-C Cable".to_string(),
//!     sku: "123-456-78".to_string(),
//!     category: "Electronics".to_string(),
//!     stock: "12".to_string(),
//!     price: "9.99".to_string(),
//!     description: String::new(),
//! };
//!
//! let product = validate_product(&draft).unwrap();
//! let record = product.into_record(1); // id comes from the store
//!
//! let calculator = StatusCalculator::default();
//! assert_eq!(calculator.status_of(record.stock), StockStatus::LowStock);
//!
//! let stats = calculator.aggregate([&record]);
//! assert_eq!(stats.total_value.to_string(), "$119.88");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod money;
pub mod rejection;
pub mod search;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{InventoryPolicy, PriceRule, ValidationPolicy};
pub use error::{CoreResult, ErrorKind, FieldErrors, FieldMessages, ValidationError};
pub use money::Money;
pub use rejection::ServerRejection;
pub use status::{InventoryStats, StatusCalculator, StatusTone, StockStatus};
pub use types::*;
pub use validation::ProductValidator;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock count below which a product is flagged for restocking.
///
/// ## Business Reason
/// Drives both the `Low Stock` badge and the dashboard's low-stock card, so
/// the two can never disagree.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Largest accepted unit price, in cents ($21,474,836.48).
///
/// ## Business Reason
/// Any accepted price times any stock count (`u32`) still fits the store's
/// `i64` cents, so a product that passed validation always has a value.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / u32::MAX as i64;

/// Maximum product description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

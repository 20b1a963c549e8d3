//! # Domain Types
//!
//! Core domain types shared by the dashboard and the API client.
//!
//! ## Type Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Lifecycle                               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌─────────────────┐     │
//! │  │  ProductDraft   │   │ NormalizedProduct │   │  ProductRecord  │     │
//! │  │  ─────────────  │   │  ───────────────  │   │  ─────────────  │     │
//! │  │  raw strings    │──►│  typed, trimmed   │──►│  + id (server)  │     │
//! │  │  (form state)   │   │  (sent to API)    │   │  (read-only)    │     │
//! │  └─────────────────┘   └───────────────────┘   └─────────────────┘     │
//! │        ▲                                              │                 │
//! │        └────────────── from_record (edit form) ───────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The numeric `id` is assigned by the external store. Nothing in this crate
//! creates or changes it.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Form Field
// =============================================================================

/// A product form field, used as the key of a field error map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Sku,
    Category,
    Stock,
    Price,
    Description,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Sku,
        Field::Category,
        Field::Stock,
        Field::Price,
        Field::Description,
    ];

    /// Wire key, as used by the API and the UI (`"sku"`).
    pub const fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Sku => "sku",
            Field::Category => "category",
            Field::Stock => "stock",
            Field::Price => "price",
            Field::Description => "description",
        }
    }

    /// Human-readable label used in error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::Name => "Product name",
            Field::Sku => "SKU",
            Field::Category => "Category",
            Field::Stock => "Stock",
            Field::Price => "Price",
            Field::Description => "Description",
        }
    }

    /// Looks a field up by its wire key.
    ///
    /// ```rust
    /// use stockroom_core::Field;
    ///
    /// assert_eq!(Field::from_key("sku"), Some(Field::Sku));
    /// assert_eq!(Field::from_key("barcode"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Category
// =============================================================================

/// The fixed set of product categories.
///
/// Serialized by display name (`"Health & Fitness"`), which is also what the
/// category select in the UI submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
    Furniture,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Books,
    #[serde(rename = "Toys & Games")]
    ToysAndGames,
    Sports,
}

impl Category {
    /// Every category, in the order the select lists them.
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::HealthAndFitness,
        Category::Furniture,
        Category::HomeAndGarden,
        Category::Books,
        Category::ToysAndGames,
        Category::Sports,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HealthAndFitness => "Health & Fitness",
            Category::Furniture => "Furniture",
            Category::HomeAndGarden => "Home & Garden",
            Category::Books => "Books",
            Category::ToysAndGames => "Toys & Games",
            Category::Sports => "Sports",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Raw product form state, exactly as typed by the user.
///
/// Every field is a string; numbers are only coerced during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    /// Category display name, empty when nothing is selected.
    pub category: String,
    pub stock: String,
    pub price: String,
    pub description: String,
}

impl Default for ProductDraft {
    /// The state of a freshly opened create form.
    fn default() -> Self {
        ProductDraft {
            name: String::new(),
            sku: String::new(),
            category: String::new(),
            stock: "0".to_string(),
            price: "0.00".to_string(),
            description: String::new(),
        }
    }
}

impl ProductDraft {
    /// Pre-populates an edit form from a fetched record.
    pub fn from_record(record: &ProductRecord) -> Self {
        ProductDraft {
            name: record.name.clone(),
            sku: record.sku.clone(),
            category: record.category.name().to_string(),
            stock: record.stock.to_string(),
            price: record.price().to_decimal_string(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

impl From<&NormalizedProduct> for ProductDraft {
    fn from(product: &NormalizedProduct) -> Self {
        ProductDraft {
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.name().to_string(),
            stock: product.stock.to_string(),
            price: product.price().to_decimal_string(),
            description: product.description.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Normalized Product
// =============================================================================

/// A validated product, ready for a create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalizedProduct {
    /// Trimmed display name.
    pub name: String,

    /// Trimmed, upper-cased SKU in `123-456-78` form.
    pub sku: String,

    pub category: Category,

    pub stock: u32,

    /// Unit price in cents; `price` in dollars on the wire.
    #[serde(rename = "price", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub price_cents: i64,

    pub description: Option<String>,
}

impl NormalizedProduct {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Attaches the identifier the store assigned on create.
    pub fn into_record(self, id: i64) -> ProductRecord {
        ProductRecord {
            id,
            name: self.name,
            sku: self.sku,
            category: self.category,
            stock: self.stock,
            price_cents: self.price_cents,
            description: self.description,
        }
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// A product as returned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRecord {
    /// Store-assigned identifier.
    pub id: i64,

    pub name: String,

    /// Stock Keeping Unit - business identifier, unique case-insensitively.
    pub sku: String,

    pub category: Category,

    /// Units on hand.
    pub stock: u32,

    /// Unit price in cents; `price` in dollars on the wire.
    #[serde(rename = "price", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub price_cents: i64,

    pub description: Option<String>,
}

impl ProductRecord {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Inventory value of this line: `stock × price`, exact in cents.
    #[inline]
    pub fn value(&self) -> Money {
        self.price().multiply_quantity(self.stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

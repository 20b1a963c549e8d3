//! # Product Search
//!
//! The products table's search box: a case-insensitive substring match on
//! name, SKU, and category.

use crate::types::ProductRecord;

/// True when `term` is blank or occurs in the product's name, SKU, or
/// category, ignoring case.
///
/// ```rust
/// use stockroom_core::search::matches_search;
/// use stockroom_core::{Category, ProductRecord};
///
/// let lamp = ProductRecord {
///     id: 1,
///     name: "Desk Lamp".to_string(),
///     sku: "123-456-78".to_string(),
///     category: Category::HomeAndGarden,
///     stock: 4,
///     price_cents: 2999,
///     description: None,
/// };
///
/// assert!(matches_search(&lamp, "lamp"));
/// assert!(matches_search(&lamp, "456"));
/// assert!(matches_search(&lamp, "garden"));
/// assert!(!matches_search(&lamp, "chair"));
/// ```
pub fn matches_search(product: &ProductRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    [product.name.as_str(), product.sku.as_str(), product.category.name()]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&term))
}

/// Products matching `term`, in their original order.
pub fn filter_products<'a>(products: &'a [ProductRecord], term: &str) -> Vec<&'a ProductRecord> {
    products
        .iter()
        .filter(|product| matches_search(product, term))
        .collect()
}

//! Plain-text rendering of the dashboard views.
//!
//! Each view borrows its data and implements `Display`, so `main` decides
//! where the text goes.

use std::fmt;

use stockroom_core::status::StatusCalculator;
use stockroom_core::{CoreResult, InventoryStats, NormalizedProduct, ProductRecord};

/// The four dashboard summary cards.
pub struct StatsView<'a> {
    pub stats: &'a InventoryStats,
    pub symbol: &'a str,
}

impl fmt::Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total products:   {}", self.stats.total_products)?;
        writeln!(f, "Total stock:      {}", self.stats.total_stock)?;
        writeln!(f, "Low stock items:  {}", self.stats.low_stock_items)?;
        writeln!(
            f,
            "Total value:      {}",
            self.stats.total_value.format_with_symbol(self.symbol)
        )
    }
}

/// Products table with a status column.
pub struct StatusTable<'a> {
    pub products: &'a [&'a ProductRecord],
    pub calculator: &'a StatusCalculator,
    pub symbol: &'a str,
}

impl fmt::Display for StatusTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<6} {:<10} {:<28} {:<18} {:>7} {:>12}  {}",
            "ID", "SKU", "Name", "Category", "Stock", "Price", "Status"
        )?;

        for product in self.products {
            let status = self.calculator.status_of(product.stock);
            write!(
                f,
                "{:<6} {:<10} {:<28} {:<18} {:>7} {:>12}  {}",
                product.id,
                product.sku,
                product.name,
                product.category.name(),
                product.stock,
                product.price().format_with_symbol(self.symbol),
                status
            )?;
            if let Some(alert) = status.alert() {
                write!(f, " ({})", alert)?;
            }
            writeln!(f)?;
        }

        if self.products.is_empty() {
            writeln!(f, "(no products)")?;
        }

        Ok(())
    }
}

/// Result of checking a draft.
pub struct DraftOutcome<'a> {
    pub outcome: &'a CoreResult<NormalizedProduct>,
    pub symbol: &'a str,
}

impl fmt::Display for DraftOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Ok(product) => {
                writeln!(f, "Draft is valid:")?;
                writeln!(f, "  name:        {}", product.name)?;
                writeln!(f, "  sku:         {}", product.sku)?;
                writeln!(f, "  category:    {}", product.category)?;
                writeln!(f, "  stock:       {}", product.stock)?;
                writeln!(f, "  price:       {}", product.price().format_with_symbol(self.symbol))?;
                writeln!(
                    f,
                    "  description: {}",
                    product.description.as_deref().unwrap_or("-")
                )
            }
            Err(errors) => {
                writeln!(f, "Draft has {} problem(s):", errors.len() + errors.form_messages().len())?;
                for (field, error) in errors.iter() {
                    writeln!(f, "  {}: {}", field.key(), error)?;
                }
                for message in errors.form_messages() {
                    writeln!(f, "  {}", message)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::validation::validate_product;
    use stockroom_core::{Category, Field, FieldErrors, ProductDraft, ValidationError};

    fn record(id: i64, name: &str, stock: u32, price_cents: i64) -> ProductRecord {
        ProductRecord {
            id,
            name: name.to_string(),
            sku: format!("100-200-{:02}", id),
            category: Category::Clothing,
            stock,
            price_cents,
            description: None,
        }
    }

    #[test]
    fn test_stats_view_uses_symbol() {
        let products = vec![record(1, "Scarf", 3, 1250), record(2, "Hat", 40, 500)];
        let stats = StatusCalculator::default().aggregate(&products);
        let text = StatsView {
            stats: &stats,
            symbol: "€",
        }
        .to_string();

        assert!(text.contains("Total products:   2"));
        assert!(text.contains("Low stock items:  1"));
        assert!(text.contains("Total value:      €237.50"));
    }

    #[test]
    fn test_status_table_rows() {
        let products = vec![record(1, "Scarf", 0, 1250), record(2, "Hat", 40, 500)];
        let rows: Vec<&ProductRecord> = products.iter().collect();
        let calculator = StatusCalculator::default();
        let text = StatusTable {
            products: &rows,
            calculator: &calculator,
            symbol: "$",
        }
        .to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Scarf"));
        assert!(lines[1].ends_with("Out of Stock (Out of stock)"));
        assert!(lines[2].contains("$5.00"));
        assert!(lines[2].ends_with("In Stock"));
    }

    #[test]
    fn test_empty_table() {
        let calculator = StatusCalculator::default();
        let text = StatusTable {
            products: &[],
            calculator: &calculator,
            symbol: "$",
        }
        .to_string();

        assert!(text.contains("(no products)"));
    }

    #[test]
    fn test_draft_outcome_lists_errors() {
        let outcome = validate_product(&ProductDraft {
            name: String::new(),
            sku: "ABC".to_string(),
            category: "Books".to_string(),
            ..ProductDraft::default()
        });
        let text = DraftOutcome {
            outcome: &outcome,
            symbol: "$",
        }
        .to_string();

        assert!(text.starts_with("Draft has 2 problem(s):"));
        assert!(text.contains("  name: Product name is required"));
        assert!(text.contains("  sku: SKU must be in the format 123-456-78"));
    }

    #[test]
    fn test_draft_outcome_includes_form_messages() {
        let mut errors = FieldErrors::from(ValidationError::Required { field: Field::Category });
        errors.push_form_message("Product not found");
        let outcome = Err(errors);
        let text = DraftOutcome {
            outcome: &outcome,
            symbol: "$",
        }
        .to_string();

        assert!(text.contains("  category: Category is required"));
        assert!(text.contains("  Product not found"));
    }

    #[test]
    fn test_valid_draft_outcome() {
        let outcome = validate_product(&ProductDraft {
            name: "Novel".to_string(),
            sku: "123-456-78".to_string(),
            category: "Books".to_string(),
            stock: "3".to_string(),
            price: "7.5".to_string(),
            description: String::new(),
        });
        let text = DraftOutcome {
            outcome: &outcome,
            symbol: "$",
        }
        .to_string();

        assert!(text.starts_with("Draft is valid:"));
        assert!(text.contains("price:       $7.50"));
        assert!(text.contains("description: -"));
    }
}

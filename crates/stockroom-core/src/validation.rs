//! # Validation Module
//!
//! Turns a raw [`ProductDraft`] into a [`NormalizedProduct`], or into a
//! [`FieldErrors`] map with every problem found.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  └── Input masks, maxLength, select options                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every field checked independently, all errors collected           │
//! │  ├── Text coerced to numbers                                           │
//! │  └── Name/SKU normalized                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Product API                                                  │
//! │  └── SKU uniqueness  ──► ServerRejection ──► same FieldErrors shape    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::validate_product;
//! use stockroom_core::{Field, ProductDraft};
//!
//! let draft = ProductDraft {
//!     name: "  Widget ".to_string(),
//!     sku: "123-456-78".to_string(),
//!     category: "Books".to_string(),
//!     stock: "5".to_string(),
//!     price: "10".to_string(),
//!     description: String::new(),
//! };
//!
//! let product = validate_product(&draft).unwrap();
//! assert_eq!(product.name, "Widget");
//! assert_eq!(product.price_cents, 1000);
//!
//! let broken = ProductDraft { sku: "ABC-123".to_string(), ..draft };
//! let errors = validate_product(&broken).unwrap_err();
//! assert!(errors.contains(Field::Sku));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::{PriceRule, ValidationPolicy};
use crate::error::{CoreResult, FieldErrors, ValidationError};
use crate::money::{Money, MoneyParseError};
use crate::MAX_PRICE_CENTS;
use crate::types::{Category, Field, NormalizedProduct, ProductDraft, ProductRecord};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Expected SKU shape, as shown to the user.
pub const SKU_FORMAT_HINT: &str = "in the format 123-456-78";

/// `[0-9]` rather than `\d`: `\d` also matches non-ASCII digits.
static SKU_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{2}$").expect("SKU pattern is a valid regex")
});

// =============================================================================
// Product Validator
// =============================================================================

/// Validates product drafts against a [`ValidationPolicy`].
///
/// Stateless apart from its policy; cheap to copy and safe to share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductValidator {
    policy: ValidationPolicy,
}

impl ProductValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        ProductValidator { policy }
    }

    /// Validates every field of `draft` independently.
    ///
    /// ## Rules
    /// | Field         | Failure                                        |
    /// |---------------|------------------------------------------------|
    /// | `name`        | blank → `Required`                             |
    /// | `sku`         | blank → `Required`, bad shape → `InvalidFormat`|
    /// | `category`    | not in [`Category::ALL`] → `Required`          |
    /// | `stock`       | negative / fractional / too large              |
    /// | `price`       | negative (or zero under `RequirePositive`), or |
    /// |               | above [`MAX_PRICE_CENTS`]                      |
    /// | `description` | longer than the policy limit → `TooLong`       |
    ///
    /// Empty or unparseable numbers count as `0`.
    pub fn validate(&self, draft: &ProductDraft) -> CoreResult<NormalizedProduct> {
        let name = validate_name(&draft.name);
        let sku = validate_sku(&draft.sku);
        let category = validate_category(&draft.category);
        let stock = parse_stock(&draft.stock);
        let price = parse_price(&draft.price, self.policy.price_rule)
            .and_then(|price| price.to_i64_cents().ok_or_else(price_too_large));
        let description = validate_description(&draft.description, self.policy.description_max_chars);

        match (name, sku, category, stock, price, description) {
            (Ok(name), Ok(sku), Ok(category), Ok(stock), Ok(price), Ok(description)) => {
                debug!(sku = %sku, "product draft is valid");
                Ok(NormalizedProduct {
                    name,
                    sku,
                    category,
                    stock,
                    price_cents: price,
                    description,
                })
            }
            (name, sku, category, stock, price, description) => {
                let errors: FieldErrors = [
                    name.err(),
                    sku.err(),
                    category.err(),
                    stock.err(),
                    price.err(),
                    description.err(),
                ]
                .into_iter()
                .flatten()
                .collect();

                let fields: Vec<&str> = errors.fields().map(|field| field.key()).collect();
                debug!(fields = ?fields, "product draft rejected");
                Err(errors)
            }
        }
    }

    /// Validates `draft` and checks its SKU against the records already
    /// loaded, skipping `editing` (the id of the product being edited).
    ///
    /// The store enforces the same rule; this only lets the form flag the
    /// duplicate before a round trip.
    pub fn validate_for_submit(
        &self,
        draft: &ProductDraft,
        existing: &[ProductRecord],
        editing: Option<i64>,
    ) -> CoreResult<NormalizedProduct> {
        let outcome = self.validate(draft);
        if matches!(&outcome, Err(errors) if errors.contains(Field::Sku)) {
            return outcome;
        }

        let sku = match &outcome {
            Ok(product) => product.sku.clone(),
            Err(_) => draft.sku.trim().to_string(),
        };

        let Some(conflict) = find_sku_conflict(existing, &sku, editing) else {
            return outcome;
        };

        debug!(sku = %sku, existing_id = conflict.id, "duplicate SKU in loaded products");
        let duplicate = ValidationError::Duplicate {
            field: Field::Sku,
            value: conflict.sku.clone(),
        };

        match outcome {
            Ok(_) => Err(FieldErrors::from(duplicate)),
            Err(mut errors) => {
                errors.insert(duplicate);
                Err(errors)
            }
        }
    }
}

/// Validates with the default policy (zero price allowed).
pub fn validate_product(draft: &ProductDraft) -> CoreResult<NormalizedProduct> {
    ProductValidator::default().validate(draft)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: Field::Name });
    }

    Ok(name.to_string())
}

/// Validates a SKU and returns it trimmed and upper-cased.
///
/// ## Rules
/// - Must not be blank
/// - Must be `NNN-NNN-NN` (ASCII digits)
///
/// ```rust
/// use stockroom_core::validation::validate_sku;
///
/// assert_eq!(validate_sku(" 123-456-78 ").unwrap(), "123-456-78");
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("12-3456-78").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<String> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required { field: Field::Sku });
    }

    let sku = sku.to_uppercase();
    if !SKU_PATTERN.is_match(&sku) {
        return Err(ValidationError::InvalidFormat {
            field: Field::Sku,
            expected: SKU_FORMAT_HINT,
        });
    }

    Ok(sku)
}

/// Resolves a category display name.
pub fn validate_category(category: &str) -> ValidationResult<Category> {
    Category::from_name(category.trim()).ok_or(ValidationError::Required {
        field: Field::Category,
    })
}

/// Validates an optional description. Blank becomes `None`.
pub fn validate_description(description: &str, max_chars: usize) -> ValidationResult<Option<String>> {
    if description.chars().count() > max_chars {
        return Err(ValidationError::TooLong {
            field: Field::Description,
            max: max_chars,
        });
    }

    if description.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(description.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Coerces stock text to a unit count.
///
/// Uses the same number syntax as [`parse_price`] (sign, decimals,
/// exponent); text with no digits at all counts as `0`.
///
/// ## Coercion
/// ```text
/// ""      → 0          "abc"  → 0
/// "12"    → 12         "-1"   → Negative
/// "12.0"  → 12         "2.5"  → InvalidFormat (whole number)
/// "1e3"   → 1000       "5e9"  → TooLarge
/// ```
pub fn parse_stock(stock: &str) -> ValidationResult<u32> {
    let stock = stock.trim();

    if let Ok(count) = stock.parse::<i64>() {
        return stock_from_integer(count);
    }

    // Keeps "inf" and "NaN" in the not-a-number bucket, as for prices.
    if !stock.bytes().any(|b| b.is_ascii_digit()) {
        return Ok(0);
    }

    match stock.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(0),
        Ok(value) => {
            if value < 0.0 {
                Err(ValidationError::Negative { field: Field::Stock })
            } else if value > f64::from(u32::MAX) {
                Err(stock_too_large())
            } else if value.fract() != 0.0 {
                Err(ValidationError::InvalidFormat {
                    field: Field::Stock,
                    expected: "a whole number",
                })
            } else {
                Ok(value as u32)
            }
        }
        // Not a number.
        Err(_) => Ok(0),
    }
}

fn stock_from_integer(count: i64) -> ValidationResult<u32> {
    if count < 0 {
        return Err(ValidationError::Negative { field: Field::Stock });
    }

    u32::try_from(count).map_err(|_| stock_too_large())
}

fn stock_too_large() -> ValidationError {
    ValidationError::TooLarge {
        field: Field::Stock,
        max: u64::from(u32::MAX),
    }
}

/// Coerces price text to [`Money`] and applies the price rule.
///
/// Text that is not a number counts as `0`. Amounts above
/// [`MAX_PRICE_CENTS`] fail with `TooLarge`, including ones too large to
/// parse at all.
///
/// ```rust
/// use stockroom_core::config::PriceRule;
/// use stockroom_core::validation::parse_price;
///
/// assert_eq!(parse_price("12.50", PriceRule::AllowZero).unwrap().cents(), 1250);
/// assert!(parse_price("0", PriceRule::AllowZero).is_ok());
/// assert!(parse_price("0", PriceRule::RequirePositive).is_err());
/// assert!(parse_price("-1", PriceRule::AllowZero).is_err());
/// assert!(parse_price("100000000000000000", PriceRule::AllowZero).is_err());
/// ```
pub fn parse_price(price: &str, rule: PriceRule) -> ValidationResult<Money> {
    let price = match Money::parse(price) {
        Ok(price) => price,
        Err(MoneyParseError::NotANumber) => Money::zero(),
        Err(MoneyParseError::Overflow) => return Err(price_too_large()),
    };

    if price.is_negative() {
        return Err(ValidationError::Negative { field: Field::Price });
    }

    if price.cents() > i128::from(MAX_PRICE_CENTS) {
        return Err(price_too_large());
    }

    if rule == PriceRule::RequirePositive && price.is_zero() {
        return Err(ValidationError::MustBePositive { field: Field::Price });
    }

    Ok(price)
}

fn price_too_large() -> ValidationError {
    ValidationError::TooLarge {
        field: Field::Price,
        max: MAX_PRICE_CENTS.unsigned_abs() / 100,
    }
}

// =============================================================================
// Collection Checks
// =============================================================================

/// Finds a record whose SKU equals `sku` case-insensitively, ignoring the
/// record with id `ignore_id`.
pub fn find_sku_conflict<'a>(
    records: &'a [ProductRecord],
    sku: &str,
    ignore_id: Option<i64>,
) -> Option<&'a ProductRecord> {
    let sku = sku.trim();
    if sku.is_empty() {
        return None;
    }

    records
        .iter()
        .filter(|record| Some(record.id) != ignore_id)
        .find(|record| record.sku.eq_ignore_ascii_case(sku))
}

// =============================================================================
// Unit Tests
// =============================================================================

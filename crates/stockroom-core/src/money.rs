//! # Money Module
//!
//! Provides the `Money` type for prices and inventory value.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing stock × price in floating point:                               │
//! │    3 × 0.1 + 0.2 = 0.5000000000000001  ❌                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3 × 10 + 20 = 50 cents, exact                                        │
//! │    Rounding happens once, when "$0.50" is rendered                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Range
//! Store prices are `i64` cents and stock is `u32`, so one product's value
//! always fits in the `i128` held by `Money`. Totals saturate instead of
//! wrapping.
//!
//! ## Wire Format
//! The product API and the dashboard exchange amounts as JSON numbers in
//! dollars (`24.99`). `Money` and the [`dollars`] adapter convert at the
//! serde boundary; everything inside the crate stays in cents.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::parse("19.99").unwrap();
//! assert_eq!(price.cents(), 1999);
//!
//! let line_value = price.multiply_quantity(3);
//! assert_eq!(line_value.to_string(), "$59.97");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::IntErrorKind;
use std::ops::AddAssign;
use thiserror::Error;

/// Cent digits beyond this many always overflow `i128`.
const MAX_CENT_DIGITS: i64 = 40;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Price input "24.50" ──► Money::parse ──► NormalizedProduct.price_cents
///                                                 │
/// ProductRecord.price_cents × stock ──► value ──► InventoryStats.total_value
///                                                 │
///                                                 └──► "$1234.50" at display
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i128);

/// Why a price string could not become [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("not a number")]
    NotANumber,

    #[error("amount is too large")]
    Overflow,
}

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents as i128)
    }

    /// Parses a decimal amount as typed into a price input.
    ///
    /// Accepts an optional leading `$`, a sign, and an exponent (`1e3`).
    /// The amount is rounded half away from zero to whole cents. Values
    /// that do not fit are reported as [`MoneyParseError::Overflow`], never
    /// as zero.
    ///
    /// ```rust
    /// use stockroom_core::money::{Money, MoneyParseError};
    ///
    /// assert_eq!(Money::parse("10").map(|m| m.cents()), Ok(1000));
    /// assert_eq!(Money::parse("$0.5").map(|m| m.cents()), Ok(50));
    /// assert_eq!(Money::parse("1.005").map(|m| m.cents()), Ok(101));
    /// assert_eq!(Money::parse("-2.50").map(|m| m.cents()), Ok(-250));
    /// assert_eq!(Money::parse("1e3").map(|m| m.cents()), Ok(100_000));
    /// assert_eq!(Money::parse("ten"), Err(MoneyParseError::NotANumber));
    /// ```
    pub fn parse(text: &str) -> Result<Money, MoneyParseError> {
        let text = text.trim();
        let text = text.strip_prefix('$').unwrap_or(text);

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exponent) => (mantissa, exponent),
                Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
                    (mantissa, i32::MAX)
                }
                Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
                    (mantissa, i32::MIN)
                }
                Err(_) => return Err(MoneyParseError::NotANumber),
            },
            None => (unsigned, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyParseError::NotANumber);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::NotANumber);
        }

        let whole = whole.trim_start_matches('0');
        let digits: Vec<u8> = whole.bytes().chain(fraction.bytes()).map(|b| b - b'0').collect();
        if digits.iter().all(|&digit| digit == 0) {
            return Ok(Money::zero());
        }

        // Index into `digits` of the first digit below one cent.
        let cut = i64::try_from(whole.len())
            .map_err(|_| MoneyParseError::Overflow)?
            .saturating_add(i64::from(exponent))
            .saturating_add(2);
        if cut > MAX_CENT_DIGITS {
            return Err(MoneyParseError::Overflow);
        }

        let digit_at = |index: i64| {
            usize::try_from(index)
                .ok()
                .and_then(|index| digits.get(index))
                .copied()
        };

        let mut cents: i128 = 0;
        for index in 0..cut.max(0) {
            let digit = i128::from(digit_at(index).unwrap_or(0));
            cents = cents
                .checked_mul(10)
                .and_then(|cents| cents.checked_add(digit))
                .ok_or(MoneyParseError::Overflow)?;
        }

        if digit_at(cut).is_some_and(|digit| digit >= 5) {
            cents = cents.checked_add(1).ok_or(MoneyParseError::Overflow)?;
        }

        Ok(Money(if negative { -cents } else { cents }))
    }

    #[inline]
    pub const fn cents(&self) -> i128 {
        self.0
    }

    /// The amount in cents when it fits a store price (`i64`).
    pub fn to_i64_cents(&self) -> Option<i64> {
        i64::try_from(self.0).ok()
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i128 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a stock count.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    ///
    /// // A store price times any stock count stays exact.
    /// let worst = Money::from_cents(i64::MAX).multiply_quantity(u32::MAX);
    /// assert_eq!(worst.cents(), i128::from(i64::MAX) * i128::from(u32::MAX));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i128::from(qty)))
    }

    /// Two-decimal amount without a currency symbol (`"24.50"`).
    ///
    /// This is the form used to pre-fill a price input.
    pub fn to_decimal_string(&self) -> String {
        self.format_with_symbol("")
    }

    /// Display string with a caller-supplied currency symbol.
    ///
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("€"), "-€5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            (self.0 / 100).unsigned_abs(),
            self.cents_part()
        )
    }

    /// Amount in dollars as sent over the wire.
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Rounds a wire amount in dollars to whole cents.
    pub fn from_dollars(dollars: f64) -> Option<Money> {
        let cents = (dollars * 100.0).round();
        if !cents.is_finite() || cents.abs() >= 1e36 {
            return None;
        }
        Some(Money(cents as i128))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

/// Saturates at the `i128` bounds.
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Money::from_dollars(dollars)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {}", dollars)))
    }
}

// =============================================================================
// Wire Adapter
// =============================================================================

/// Serde adapter for `i64` cent fields that travel as dollar amounts.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(rename = "price", with = "stockroom_core::money::dollars")]
///     price_cents: i64,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 24.99}"#).unwrap();
/// assert_eq!(line.price_cents, 2499);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"price":24.99}"#);
/// ```
pub mod dollars {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(Money::from_cents(*cents).to_dollars())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Money::from_dollars(dollars)
            .and_then(|money| money.to_i64_cents())
            .ok_or_else(|| serde::de::Error::custom(format!("price out of range: {}", dollars)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(money.to_i64_cents(), Some(1099));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(2450).to_decimal_string(), "24.50");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!(Money::parse("0"), Ok(Money::zero()));
        assert_eq!(Money::parse("0.00"), Ok(Money::zero()));
        assert_eq!(Money::parse("12.3"), Ok(Money::from_cents(1230)));
        assert_eq!(Money::parse(" 12.34 "), Ok(Money::from_cents(1234)));
        assert_eq!(Money::parse(".75"), Ok(Money::from_cents(75)));
        assert_eq!(Money::parse("5."), Ok(Money::from_cents(500)));
        assert_eq!(Money::parse("+3"), Ok(Money::from_cents(300)));
        assert_eq!(Money::parse("007.10"), Ok(Money::from_cents(710)));
    }

    #[test]
    fn test_parse_exponent_form() {
        assert_eq!(Money::parse("1e3"), Ok(Money::from_cents(100_000)));
        assert_eq!(Money::parse("2.5E1"), Ok(Money::from_cents(2500)));
        assert_eq!(Money::parse("1.5e-2"), Ok(Money::from_cents(2)));
        assert_eq!(Money::parse("4e-3"), Ok(Money::zero()));
        assert_eq!(Money::parse("0e99999999999"), Ok(Money::zero()));
        assert_eq!(Money::parse("1e-99999999999"), Ok(Money::zero()));
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Money::parse("0.994"), Ok(Money::from_cents(99)));
        assert_eq!(Money::parse("0.995"), Ok(Money::from_cents(100)));
        assert_eq!(Money::parse("-0.995"), Ok(Money::from_cents(-100)));
        assert_eq!(Money::parse("1.23999"), Ok(Money::from_cents(124)));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for text in ["", ".", "-", "abc", "1,000", "1.2.3", "e5", "1e", "1e2.5", "inf"] {
            assert_eq!(Money::parse(text), Err(MoneyParseError::NotANumber), "{:?}", text);
        }
    }

    #[test]
    fn test_parse_reports_overflow() {
        assert_eq!(
            Money::parse("99999999999999999999").map(|m| m.cents()),
            Ok(99_999_999_999_999_999_999 * 100)
        );
        assert_eq!(Money::parse("1e400"), Err(MoneyParseError::Overflow));
        assert_eq!(Money::parse("1e99999999999"), Err(MoneyParseError::Overflow));
        assert_eq!(
            Money::parse(&"9".repeat(45)),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_totals_saturate() {
        let mut total = Money(i128::MAX - 1);
        total += Money::from_cents(10);
        assert_eq!(total.cents(), i128::MAX);
    }

    #[test]
    fn test_wire_dollars() {
        assert_eq!(serde_json::to_value(Money::from_cents(2499)).unwrap(), 24.99);
        let parsed: Money = serde_json::from_str("19.5").unwrap();
        assert_eq!(parsed.cents(), 1950);
        let parsed: Money = serde_json::from_str("3").unwrap();
        assert_eq!(parsed.cents(), 300);
        assert_eq!(Money::from_dollars(f64::NAN), None);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }
}

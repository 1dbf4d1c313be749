//! # Validation Module
//!
//! Input parsing and validation for quote construction.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Inputs Are Checked                           │
//! │                                                                         │
//! │  Product::new / DiscountRequest::amount / Quote::set_tax ...            │
//! │  ├── Magnitudes: must read as a decimal (THIS MODULE)                  │
//! │  ├── Quantity: 1..=MAX_QUANTITY (THIS MODULE)                          │
//! │  └── Precision: 0..=28 decimal places (THIS MODULE)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Quote::add_product / add_discount / set_tax                            │
//! │  ├── Values, amounts: |x| <= MAX_MAGNITUDE (THIS MODULE)               │
//! │  ├── Percents, rates: |x| <= MAX_PERCENT (THIS MODULE)                 │
//! │  └── Lines: at most MAX_QUOTE_LINES of each kind (THIS MODULE)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Quote::to_result()                                                     │
//! │  └── Nothing left to check: the bounds keep every sum in range         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Negative and zero magnitudes are accepted; the pipeline is well-defined
//! for them. The bounds only exist so that no product, sum or quotient in
//! the pipeline can leave the range of the decimal type.
//!
//! ## Usage
//! ```rust
//! use pricequote_core::validation::IntoMagnitude;
//! use rust_decimal::Decimal;
//!
//! assert_eq!("13.20".into_magnitude("value").unwrap(), Decimal::new(1320, 2));
//! assert!("abc".into_magnitude("value").is_err());
//! ```

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::MAX_DECIMAL_PLACES;
use crate::{MAX_MAGNITUDE, MAX_PERCENT, MAX_QUANTITY, MAX_QUOTE_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Magnitudes
// =============================================================================

/// Conversion of caller input into an exact decimal magnitude.
///
/// `field` names the input in the error (`"value"`, `"amount"`, `"rate"`...).
pub trait IntoMagnitude {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal>;
}

impl IntoMagnitude for Decimal {
    fn into_magnitude(self, _field: &str) -> ValidationResult<Decimal> {
        Ok(self)
    }
}

impl IntoMagnitude for &str {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        parse_magnitude(field, self)
    }
}

impl IntoMagnitude for String {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        parse_magnitude(field, &self)
    }
}

impl IntoMagnitude for &String {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        parse_magnitude(field, self)
    }
}

/// Floats go through their shortest decimal representation, so `13.2_f64`
/// becomes exactly `13.2`. NaN and infinities are rejected.
impl IntoMagnitude for f64 {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        if !self.is_finite() {
            return Err(invalid(field, self.to_string()));
        }
        parse_magnitude(field, &self.to_string())
            .or_else(|_| Decimal::from_f64(self).ok_or_else(|| invalid(field, self.to_string())))
    }
}

macro_rules! impl_integer_magnitude {
    ($($ty:ty),*) => {
        $(
            impl IntoMagnitude for $ty {
                fn into_magnitude(self, _field: &str) -> ValidationResult<Decimal> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_integer_magnitude!(i32, i64, u32, u64);

/// JSON numbers are read from their textual form; numeric strings are
/// accepted too. Anything else (null, bool, arrays...) is invalid.
impl IntoMagnitude for &serde_json::Value {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        match self {
            serde_json::Value::Number(n) => parse_magnitude(field, &n.to_string()),
            serde_json::Value::String(s) => parse_magnitude(field, s),
            other => Err(invalid(field, other.to_string())),
        }
    }
}

impl IntoMagnitude for serde_json::Value {
    fn into_magnitude(self, field: &str) -> ValidationResult<Decimal> {
        (&self).into_magnitude(field)
    }
}

/// Parses a decimal from text, accepting plain (`"13.20"`) and scientific
/// (`"1.5e-3"`) notation. Surrounding whitespace is ignored.
pub fn parse_magnitude(field: &str, text: &str) -> ValidationResult<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, text.to_string()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid(field, text.to_string()))
}

fn invalid(field: &str, value: String) -> ValidationError {
    ValidationError::InvalidMagnitude {
        field: field.to_string(),
        value,
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUANTITY (1,000,000)
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a unit value or a discount amount.
///
/// ## Rules
/// - Absolute value must not exceed MAX_MAGNITUDE (one trillion)
/// - Negative and zero are allowed
pub fn validate_magnitude(field: &str, value: Decimal) -> ValidationResult<()> {
    check_bound(field, value, MAX_MAGNITUDE)
}

/// Validates a discount percent or a tax rate, in percent units.
///
/// ## Rules
/// - Absolute value must not exceed MAX_PERCENT (10,000%)
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    check_bound(field, percent, MAX_PERCENT)
}

fn check_bound(field: &str, value: Decimal, bound: i64) -> ValidationResult<()> {
    if value.abs() > Decimal::from(bound) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -bound,
            max: bound,
        });
    }

    Ok(())
}

/// Validates a quote precision.
///
/// ## Rules
/// - Between 0 and 28 (the scale limit of the decimal type)
pub fn validate_decimal_places(decimal_places: u32) -> ValidationResult<()> {
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(ValidationError::OutOfRange {
            field: "decimal_places".to_string(),
            min: 0,
            max: MAX_DECIMAL_PLACES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits on a quote.
///
/// ## Rules
/// - `current_lines` must be below MAX_QUOTE_LINES (1,000)
pub fn validate_line_count(field: &str, current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_QUOTE_LINES {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_QUOTE_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

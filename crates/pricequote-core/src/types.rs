//! # Domain Types
//!
//! Core domain types used throughout PriceQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (built by the caller)        OUTPUTS (built by the pipeline)    │
//! │  ┌─────────────────┐                 ┌─────────────────┐                │
//! │  │    Product      │ ──totaled──►    │    LineItem     │                │
//! │  │  label, value   │                 │  ... + total    │                │
//! │  │  quantity?      │                 └─────────────────┘                │
//! │  └─────────────────┘                                                    │
//! │  ┌─────────────────┐                 ┌─────────────────┐                │
//! │  │ DiscountRequest │ ──allocated──►  │ AppliedDiscount │                │
//! │  │ Amount|Percent  │                 │ value, total    │                │
//! │  └─────────────────┘                 └─────────────────┘                │
//! │  ┌─────────────────┐                 ┌─────────────────┐                │
//! │  │    TaxSpec      │ ──derived──►    │    TaxLine      │                │
//! │  │  label, rate    │                 │  rate, value    │                │
//! │  └─────────────────┘                 └─────────────────┘                │
//! │                                                                         │
//! │                QuoteResult { products, discounts, taxes?, totals }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Extras
//! Products and discounts carry an opaque [`Extras`] map (ids, SKUs, notes...)
//! that is copied to the output entity untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_percent, validate_quantity, IntoMagnitude};

/// Opaque caller data carried from input to output, key order preserved.
pub type Extras = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage expressed in percent units: `20` means 20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Percentage(#[ts(type = "string")] Decimal);

impl Percentage {
    #[inline]
    pub const fn new(percent: Decimal) -> Self {
        Percentage(percent)
    }

    /// Returns the percent value (`20` for 20%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// `amount × percent / 100`, unrounded.
    pub fn of(&self, amount: Money) -> Money {
        Money::new(self.0 * amount.amount() / Decimal::ONE_HUNDRED)
    }

    /// `1 + percent / 100`, the multiplier that adds this percentage.
    pub fn growth_factor(&self) -> Decimal {
        Decimal::ONE + self.0 / Decimal::ONE_HUNDRED
    }

    pub(crate) fn round_dp(self, decimal_places: u32) -> Self {
        Percentage(Money::new(self.0).round_dp(decimal_places).amount())
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product line as supplied by the caller, before totaling.
///
/// ## Example
/// ```rust
/// use pricequote_core::Product;
///
/// let pizza = Product::new("Pizza", "13.20")?
///     .with_quantity(2)?
///     .with_extra("id", "ce0b9");
/// assert_eq!(pizza.quantity, Some(2));
/// # Ok::<(), pricequote_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub label: String,
    /// Unit value. Rounded to the quote precision when added to a quote.
    pub value: Decimal,
    pub quantity: Option<u32>,
    pub extras: Extras,
}

impl Product {
    /// Creates a product; fails if `value` is not a number.
    pub fn new(label: impl Into<String>, value: impl IntoMagnitude) -> CoreResult<Self> {
        Ok(Product {
            label: label.into(),
            value: value.into_magnitude("value")?,
            quantity: None,
            extras: Extras::new(),
        })
    }

    /// Sets the quantity. Zero is rejected.
    pub fn with_quantity(mut self, quantity: u32) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        self.quantity = Some(quantity);
        Ok(self)
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras.extend(extras);
        self
    }
}

/// A totaled product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub label: String,
    /// Unit value at quote precision.
    pub value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    #[ts(type = "Record<string, unknown>")]
    pub extras: Extras,
    /// `value × quantity` rounded, or `value` when no quantity was given.
    pub total: Money,
}

// =============================================================================
// Discounts
// =============================================================================

/// How a discount's magnitude is expressed.
///
/// Serialized as a single key: `{"amount": "10"}` or `{"percent": "20"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum DiscountKind {
    /// A fixed amount off the remaining balance.
    Amount(Money),
    /// A percentage of the ORIGINAL product subtotal.
    Percent(Percentage),
}

impl DiscountKind {
    pub(crate) fn round_dp(self, decimal_places: u32) -> Self {
        match self {
            DiscountKind::Amount(amount) => DiscountKind::Amount(amount.round_dp(decimal_places)),
            DiscountKind::Percent(percent) => DiscountKind::Percent(percent.round_dp(decimal_places)),
        }
    }
}

/// A discount as supplied by the caller.
///
/// Requests are applied in the order they were added to the quote.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRequest {
    pub label: String,
    pub kind: DiscountKind,
    pub extras: Extras,
}

impl DiscountRequest {
    /// A fixed-amount discount.
    pub fn amount(label: impl Into<String>, amount: impl IntoMagnitude) -> CoreResult<Self> {
        Ok(Self::with_kind(
            label,
            DiscountKind::Amount(Money::new(amount.into_magnitude("amount")?)),
        ))
    }

    /// A percentage discount computed against the product subtotal.
    pub fn percent(label: impl Into<String>, percent: impl IntoMagnitude) -> CoreResult<Self> {
        Ok(Self::with_kind(
            label,
            DiscountKind::Percent(Percentage::new(percent.into_magnitude("percent")?)),
        ))
    }

    pub fn with_kind(label: impl Into<String>, kind: DiscountKind) -> Self {
        DiscountRequest {
            label: label.into(),
            kind,
            extras: Extras::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras.extend(extras);
        self
    }
}

/// A discount after allocation against the remaining balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppliedDiscount {
    pub label: String,
    #[serde(flatten)]
    pub kind: DiscountKind,
    /// Realized value: what the discount actually took off.
    pub value: Money,
    /// Always `-value`.
    pub total: Money,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    #[ts(type = "Record<string, unknown>")]
    pub extras: Extras,
}

// =============================================================================
// Tax
// =============================================================================

/// Smallest accepted `|1 + rate/100|`. Dividing by anything smaller could
/// push a before-taxes amount out of the decimal range.
pub const MIN_TAX_FACTOR: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// The single tax configured on a quote.
///
/// The rate is kept exactly as given; it is never rounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSpec {
    label: String,
    rate: Percentage,
}

impl TaxSpec {
    /// Creates a tax; fails if `rate` is not a number, is beyond
    /// ±[`MAX_PERCENT`](crate::MAX_PERCENT), or brings `1 + rate/100` within
    /// [`MIN_TAX_FACTOR`] of zero (-101% < rate < -99%).
    pub fn new(label: impl Into<String>, rate: impl IntoMagnitude) -> CoreResult<Self> {
        let rate = rate.into_magnitude("rate")?;
        validate_percent("rate", rate)?;

        let rate = Percentage::new(rate);
        if rate.growth_factor().abs() < MIN_TAX_FACTOR {
            return Err(CoreError::TaxDivisorZero {
                rate: rate.value().to_string(),
            });
        }

        Ok(TaxSpec {
            label: label.into(),
            rate,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rate(&self) -> Percentage {
        self.rate
    }
}

/// The tax line reported in a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxLine {
    pub label: String,
    pub rate: Percentage,
    /// `after_taxes - before_taxes`.
    pub value: Money,
}

// =============================================================================
// Quote Result
// =============================================================================

/// Aggregated totals of a quote.
///
/// The three tax fields are either all present or all absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub products: Money,
    /// Sum of applied discount totals (zero or negative).
    pub discounts: Money,
    pub after_discounts: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub before_taxes: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub after_taxes: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub taxes: Option<Money>,
}

/// Read-only snapshot produced by [`crate::Quote::to_result`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteResult {
    /// ISO 4217 code, or empty when the quote has no currency.
    pub currency: String,
    pub products: Vec<LineItem>,
    pub discounts: Vec<AppliedDiscount>,
    /// Present iff a tax was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub taxes: Option<Vec<TaxLine>>,
    pub totals: Totals,
}

impl QuoteResult {
    /// True when the quote had a tax configured.
    pub fn has_tax(&self) -> bool {
        self.taxes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_of_amount() {
        let pct = Percentage::new(dec!(20));
        assert_eq!(pct.of(Money::new(dec!(28.90))).amount(), dec!(5.78));
        assert_eq!(pct.growth_factor(), dec!(1.2));
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("Pizza", dec!(13.20))
            .unwrap()
            .with_quantity(2)
            .unwrap()
            .with_extra("id", "ce0b9");
        assert_eq!(product.value, dec!(13.20));
        assert_eq!(product.quantity, Some(2));
        assert_eq!(product.extras["id"], "ce0b9");
    }

    #[test]
    fn test_product_rejects_zero_quantity() {
        let result = Product::new("Pizza", 1).unwrap().with_quantity(0);
        assert!(result.is_err());
    }

    #[test]
    fn test_discount_request_rejects_garbage() {
        assert!(DiscountRequest::amount("PROMO", "ten").is_err());
        assert!(DiscountRequest::percent("PROMO", "").is_err());
    }

    #[test]
    fn test_tax_spec_rejects_minus_hundred() {
        assert!(TaxSpec::new("VAT", dec!(20)).is_ok());
        assert!(matches!(
            TaxSpec::new("VAT", dec!(-100)),
            Err(CoreError::TaxDivisorZero { .. })
        ));
        assert!(TaxSpec::new("VAT", "twenty").is_err());
    }

    #[test]
    fn test_tax_spec_rejects_rates_near_minus_hundred() {
        assert!(matches!(
            TaxSpec::new("VAT", dec!(-99.9999)),
            Err(CoreError::TaxDivisorZero { .. })
        ));
        assert!(matches!(
            TaxSpec::new("VAT", dec!(-100.5)),
            Err(CoreError::TaxDivisorZero { .. })
        ));
        assert!(TaxSpec::new("VAT", dec!(-99)).is_ok());
        assert!(TaxSpec::new("VAT", dec!(-101)).is_ok());
    }

    #[test]
    fn test_tax_spec_rejects_huge_rates() {
        assert!(TaxSpec::new("VAT", dec!(10000)).is_ok());
        assert!(matches!(
            TaxSpec::new("VAT", dec!(10001)),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_applied_discount_serializes_kind_as_key() {
        let applied = AppliedDiscount {
            label: "PROMO10".to_string(),
            kind: DiscountKind::Amount(Money::new(dec!(10))),
            value: Money::new(dec!(10)),
            total: Money::new(dec!(-10)),
            extras: Extras::new(),
        };
        let json = serde_json::to_value(&applied).unwrap();
        assert_eq!(json["amount"], "10");
        assert_eq!(json["total"], "-10");
        assert!(json.get("extras").is_none());
    }

    #[test]
    fn test_totals_omit_absent_tax_fields() {
        let json = serde_json::to_value(Totals::default()).unwrap();
        assert!(json.get("beforeTaxes").is_none());
        assert!(json.get("taxes").is_none());
        assert_eq!(json["afterDiscounts"], "0");
    }
}

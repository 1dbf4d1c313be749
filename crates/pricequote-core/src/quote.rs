//! # Quote Assembler
//!
//! The [`Quote`] aggregate: collects products, discounts and a tax, then runs
//! the calculation pipeline on demand.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote::to_result()                                │
//! │                                                                         │
//! │  products ──► total_products() ──► totals.products                     │
//! │                                          │                              │
//! │  discounts ─► allocate_discounts(totals.products) ──► totals.discounts │
//! │                                          │                              │
//! │               after_discounts = products + discounts                   │
//! │                                          │                              │
//! │  tax? ──────► calculate_tax(after_discounts)   (only if a tax is set)  │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                     QuoteResult                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Quote` is built by a single owner through `&mut self` calls. Computing
//! a result borrows it immutably and has no side effects, so `to_result()`
//! can be called any number of times.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::discounts::allocate_discounts;
use crate::error::CoreResult;
use crate::products::total_products;
use crate::tax::calculate_tax;
use crate::money::Money;
use crate::types::{DiscountKind, DiscountRequest, Product, QuoteResult, TaxSpec, Totals};
use crate::validation::{
    validate_decimal_places, validate_line_count, validate_magnitude, validate_percent, validate_quantity,
    IntoMagnitude,
};
use crate::{DEFAULT_DECIMAL_PLACES, DEFAULT_LOCALE};

// =============================================================================
// Configuration
// =============================================================================

/// Options fixed when a quote is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteConfig {
    /// Fractional digits every monetary value is rounded to.
    pub decimal_places: u32,

    /// True when product values exclude tax.
    pub is_before_taxes: bool,

    /// ISO 4217 code reported in the result. Empty means "no currency".
    pub currency: String,

    /// BCP 47 tag, used only by the presentation layer.
    pub locale: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            is_before_taxes: false,
            currency: String::new(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl QuoteConfig {
    pub fn validate(&self) -> CoreResult<()> {
        validate_decimal_places(self.decimal_places)?;
        Ok(())
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A quote under construction.
///
/// ## Example
/// ```rust
/// use pricequote_core::{Product, Quote, QuoteConfig};
///
/// let mut quote = Quote::new(QuoteConfig { currency: "EUR".into(), ..Default::default() })?;
/// quote
///     .add_product(Product::new("Pizza", "13.20")?.with_quantity(2)?)?
///     .add_product(Product::new("Delivery fee", "2.50")?)?;
/// quote.add_discount_percent("PROMO20", 20)?;
/// quote.set_tax("VAT", 20)?;
///
/// let result = quote.to_result();
/// assert_eq!(result.totals.after_discounts.to_string(), "23.12");
/// assert_eq!(result.totals.before_taxes.unwrap().to_string(), "19.27");
/// # Ok::<(), pricequote_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quote {
    config: QuoteConfig,
    products: Vec<Product>,
    discounts: Vec<DiscountRequest>,
    tax: Option<TaxSpec>,
}

impl Quote {
    /// Creates an empty quote; fails if the configuration is invalid.
    pub fn new(config: QuoteConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Quote {
            config,
            ..Quote::default()
        })
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn discounts(&self) -> &[DiscountRequest] {
        &self.discounts
    }

    pub fn tax(&self) -> Option<&TaxSpec> {
        self.tax.as_ref()
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Appends a product. Its unit value is rounded to the quote precision.
    ///
    /// Fails when the quote already holds [`MAX_QUOTE_LINES`](crate::MAX_QUOTE_LINES) products, or
    /// when the value or quantity is out of bounds.
    pub fn add_product(&mut self, mut product: Product) -> CoreResult<&mut Self> {
        validate_line_count("products", self.products.len())?;
        product.value = Money::new(product.value)
            .round_dp(self.config.decimal_places)
            .amount();
        validate_magnitude("value", product.value)?;
        if let Some(quantity) = product.quantity {
            validate_quantity(quantity)?;
        }

        self.products.push(product);
        Ok(self)
    }

    /// Appends a product with no quantity and no extras.
    pub fn add_product_value(
        &mut self,
        label: impl Into<String>,
        value: impl IntoMagnitude,
    ) -> CoreResult<&mut Self> {
        let product = Product::new(label, value)?;
        self.add_product(product)
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    /// Appends a discount; it is applied after every discount already added.
    /// The magnitude is rounded to the quote precision.
    ///
    /// Fails when the quote already holds [`MAX_QUOTE_LINES`](crate::MAX_QUOTE_LINES) discounts, or
    /// when the amount or percent is out of bounds.
    pub fn add_discount(&mut self, mut discount: DiscountRequest) -> CoreResult<&mut Self> {
        validate_line_count("discounts", self.discounts.len())?;
        discount.kind = discount.kind.round_dp(self.config.decimal_places);
        match discount.kind {
            DiscountKind::Amount(amount) => validate_magnitude("amount", amount.amount())?,
            DiscountKind::Percent(percent) => validate_percent("percent", percent.value())?,
        }

        self.discounts.push(discount);
        Ok(self)
    }

    /// Appends a fixed-amount discount.
    pub fn add_discount_amount(
        &mut self,
        label: impl Into<String>,
        amount: impl IntoMagnitude,
    ) -> CoreResult<&mut Self> {
        let discount = DiscountRequest::amount(label, amount)?;
        self.add_discount(discount)
    }

    /// Appends a percentage discount (of the product subtotal).
    pub fn add_discount_percent(
        &mut self,
        label: impl Into<String>,
        percent: impl IntoMagnitude,
    ) -> CoreResult<&mut Self> {
        let discount = DiscountRequest::percent(label, percent)?;
        self.add_discount(discount)
    }

    // -------------------------------------------------------------------------
    // Tax
    // -------------------------------------------------------------------------

    /// Sets the quote's tax, replacing any previous one.
    pub fn set_tax(&mut self, label: impl Into<String>, rate: impl IntoMagnitude) -> CoreResult<&mut Self> {
        self.tax = Some(TaxSpec::new(label, rate)?);
        Ok(self)
    }

    pub fn clear_tax(&mut self) -> &mut Self {
        self.tax = None;
        self
    }

    // -------------------------------------------------------------------------
    // Result
    // -------------------------------------------------------------------------

    /// Runs the pipeline over the current state.
    pub fn to_result(&self) -> QuoteResult {
        let decimal_places = self.config.decimal_places;

        let products = total_products(&self.products, decimal_places);
        let discounts = allocate_discounts(products.total, &self.discounts, decimal_places);
        let after_discounts = products.total + discounts.total;

        let mut totals = Totals {
            products: products.total,
            discounts: discounts.total,
            after_discounts,
            ..Totals::default()
        };

        let taxes = self.tax.as_ref().map(|tax| {
            let breakdown = calculate_tax(after_discounts, tax, self.config.is_before_taxes, decimal_places);
            totals.before_taxes = Some(breakdown.before_taxes);
            totals.after_taxes = Some(breakdown.after_taxes);
            totals.taxes = Some(breakdown.taxes);
            vec![breakdown.line]
        });

        debug!(
            products = products.items.len(),
            discounts = discounts.applied.len(),
            after_discounts = %after_discounts,
            has_tax = taxes.is_some(),
            "Quote computed"
        );

        QuoteResult {
            currency: self.config.currency.clone(),
            products: products.items,
            discounts: discounts.applied,
            taxes,
            totals,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

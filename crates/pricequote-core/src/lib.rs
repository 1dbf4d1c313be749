//! # pricequote-core: Pure Quote Calculation
//!
//! This crate is the **heart** of PriceQuote. It turns products, discounts
//! and a tax into exact decimal totals, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PriceQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`pricequote`)                       │   │
//! │  │    settings ──► read document ──► compute ──► print JSON         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pricequote-present (formatting, shaping)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pricequote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────┐ ┌───────┐  │   │
//! │  │   │  money   │ │ products │ │ discounts │ │ tax  │ │ quote │  │   │
//! │  │   │  Money   │ │ Totaler  │ │ Allocator │ │ Calc │ │ Quote │  │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └──────┘ └───────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FORMATTING • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type over exact decimals
//! - [`types`] - Inputs (Product, DiscountRequest, TaxSpec) and outputs
//! - [`products`] - Product totaler
//! - [`discounts`] - Discount allocator
//! - [`tax`] - Tax calculator
//! - [`quote`] - Quote aggregate and pipeline
//! - [`document`] - Quotes described as JSON
//! - [`validation`] - Input parsing and checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same quote in, same result out
//! 2. **No I/O**: reading files and printing belong to the app
//! 3. **Decimal Money**: no binary floating point in any calculation
//! 4. **Explicit Errors**: construction errors are typed; calculation never fails
//!
//! ## Example Usage
//!
//! ```rust
//! use pricequote_core::{Product, Quote};
//!
//! let mut quote = Quote::default();
//! quote.add_product(Product::new("Pizza", "13.20")?.with_quantity(2)?)?;
//! quote.add_product_value("Delivery fee", "2.50")?;
//! quote
//!     .add_discount_amount("PROMO10", 10)?
//!     .add_discount_amount("PROMO20", 20)?
//!     .add_discount_amount("PROMO15", 15)?;
//!
//! let result = quote.to_result();
//! // The balance ran out on PROMO20, so PROMO15 is not listed at all
//! assert_eq!(result.discounts.len(), 2);
//! assert!(result.totals.after_discounts.is_zero());
//! # Ok::<(), pricequote_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discounts;
pub mod document;
pub mod error;
pub mod money;
pub mod products;
pub mod quote;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::QuoteDocument;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{Quote, QuoteConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Precision used when a quote does not ask for one.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Locale used when a quote does not ask for one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Maximum number of products, and separately of discounts, on one quote.
pub const MAX_QUOTE_LINES: usize = 1_000;

/// Maximum quantity on a single product line.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest absolute unit value or discount amount accepted.
pub const MAX_MAGNITUDE: i64 = 1_000_000_000_000;

/// Largest absolute discount percent or tax rate accepted.
pub const MAX_PERCENT: i64 = 10_000;

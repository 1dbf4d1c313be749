//! # Product Totaler
//!
//! Turns product inputs into totaled [`LineItem`]s and sums them.
//!
//! ```text
//! Pizza         13.20 × 2  ──► round(26.400) = 26.40
//! Delivery fee   2.50      ──►                  2.50
//!                                             ───────
//!                               totals.products 28.90
//! ```

use tracing::debug;

use crate::money::Money;
use crate::types::{LineItem, Product};

/// Output of [`total_products`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTotals {
    pub items: Vec<LineItem>,
    /// Exact sum of the line totals.
    pub total: Money,
}

/// Totals every product line.
///
/// Each line is rounded on its own; the sum is not rounded again. Product
/// values are expected to already be at `decimal_places` (the quote rounds
/// them when they are added).
pub fn total_products(products: &[Product], decimal_places: u32) -> ProductTotals {
    let items: Vec<LineItem> = products
        .iter()
        .map(|product| total_line(product, decimal_places))
        .collect();
    let total = items.iter().map(|item| item.total).sum();

    debug!(lines = items.len(), total = %total, "Products totaled");

    ProductTotals { items, total }
}

fn total_line(product: &Product, decimal_places: u32) -> LineItem {
    let value = Money::new(product.value);
    let total = match product.quantity {
        Some(quantity) => value.times_quantity(quantity).round_dp(decimal_places),
        None => value,
    };

    LineItem {
        label: product.label.clone(),
        value,
        quantity: product.quantity,
        extras: product.extras.clone(),
        total,
    }
}

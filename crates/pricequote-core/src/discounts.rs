//! # Discount Allocator
//!
//! Applies discount requests, in order, against a depleting balance.
//!
//! ## Allocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal 28.90, requests: PROMO10 (10), PROMO20 (20), PROMO15 (15)     │
//! │                                                                         │
//! │  remaining 28.90 ── PROMO10: min(10, 28.90)    = 10.00 ──► 18.90        │
//! │  remaining 18.90 ── PROMO20: min(20, 18.90)    = 18.90 ──►  0.00        │
//! │  remaining  0.00 ── HALT: PROMO15 is not in the output at all          │
//! │                                                                         │
//! │  totals.discounts = -10.00 + -18.90 = -28.90                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The halt test is `remaining <= 0`, checked BEFORE each request. A
//!   zero-valued discount reached while money remains is still reported.
//! - Percentages are taken of the ORIGINAL subtotal, never of what is left,
//!   so 60% then 70% do not compound; the second one is clamped instead.
//! - Caller order is authoritative; nothing is sorted.

use tracing::debug;

use crate::money::Money;
use crate::types::{AppliedDiscount, DiscountKind, DiscountRequest};

/// Output of [`allocate_discounts`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountAllocation {
    /// Only the discounts that were reached before the balance ran out.
    pub applied: Vec<AppliedDiscount>,
    /// Sum of the applied totals (zero or negative).
    pub total: Money,
}

/// Allocates `requests` against `subtotal`.
pub fn allocate_discounts(
    subtotal: Money,
    requests: &[DiscountRequest],
    decimal_places: u32,
) -> DiscountAllocation {
    let mut applied = Vec::with_capacity(requests.len());
    let mut total = Money::zero();
    let mut remaining = subtotal;

    for request in requests {
        if !remaining.is_positive() {
            debug!(
                label = %request.label,
                dropped = requests.len() - applied.len(),
                "Balance exhausted, remaining discounts dropped"
            );
            break;
        }

        let value = realized_value(&request.kind, subtotal, remaining, decimal_places);
        let discount = AppliedDiscount {
            label: request.label.clone(),
            kind: request.kind,
            value,
            total: -value,
            extras: request.extras.clone(),
        };

        debug!(label = %discount.label, value = %value, remaining = %remaining, "Discount applied");

        total += discount.total;
        remaining -= value;
        applied.push(discount);
    }

    DiscountAllocation { applied, total }
}

/// What a single request takes off, clamped to the remaining balance.
fn realized_value(kind: &DiscountKind, subtotal: Money, remaining: Money, decimal_places: u32) -> Money {
    let requested = match kind {
        DiscountKind::Amount(amount) => *amount,
        DiscountKind::Percent(percent) => percent.of(subtotal),
    };
    requested.min(remaining).round_dp(decimal_places)
}

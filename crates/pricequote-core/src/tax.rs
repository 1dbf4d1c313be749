//! # Tax Calculator
//!
//! Derives the missing side of {before taxes, after taxes} from the other.
//!
//! ## Two Pricing Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_before_taxes = true  (prices exclude tax, US style)                 │
//! │    before = after_discounts                                             │
//! │    after  = round(after_discounts × (1 + rate/100))                     │
//! │                                                                         │
//! │  is_before_taxes = false (prices include tax, EU style)                 │
//! │    after  = after_discounts                                             │
//! │    before = round(after_discounts ÷ (1 + rate/100))                     │
//! │                                                                         │
//! │  tax = after - before   (from the ROUNDED figures)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax line is derived from the two rounded totals rather than as
//! `before × rate`, so it can differ from the latter by one rounding unit
//! but always reconciles exactly with the totals shown next to it.

use tracing::debug;

use crate::money::Money;
use crate::types::{TaxLine, TaxSpec};

/// Output of [`calculate_tax`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub line: TaxLine,
    pub before_taxes: Money,
    pub after_taxes: Money,
    /// Equal to `line.value`.
    pub taxes: Money,
}

/// Applies `tax` to the post-discount amount.
pub fn calculate_tax(
    after_discounts: Money,
    tax: &TaxSpec,
    is_before_taxes: bool,
    decimal_places: u32,
) -> TaxBreakdown {
    let factor = tax.rate().growth_factor();

    let (before_taxes, after_taxes) = if is_before_taxes {
        let after = Money::new(after_discounts.amount() * factor).round_dp(decimal_places);
        (after_discounts, after)
    } else {
        // factor is never zero: TaxSpec::new rejects -100%
        let before = Money::new(after_discounts.amount() / factor).round_dp(decimal_places);
        (before, after_discounts)
    };
    let taxes = after_taxes - before_taxes;

    debug!(
        label = tax.label(),
        rate = %tax.rate(),
        before = %before_taxes,
        after = %after_taxes,
        "Tax derived"
    );

    TaxBreakdown {
        line: TaxLine {
            label: tax.label().to_string(),
            rate: tax.rate(),
            value: taxes,
        },
        before_taxes,
        after_taxes,
        taxes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vat() -> TaxSpec {
        TaxSpec::new("VAT", dec!(20)).unwrap()
    }

    #[test]
    fn test_prices_include_tax() {
        let breakdown = calculate_tax(Money::new(dec!(23.12)), &vat(), false, 2);

        assert_eq!(breakdown.before_taxes.amount(), dec!(19.27));
        assert_eq!(breakdown.after_taxes.amount(), dec!(23.12));
        assert_eq!(breakdown.taxes.amount(), dec!(3.85));
        assert_eq!(breakdown.line.value, breakdown.taxes);
        assert_eq!(breakdown.line.label, "VAT");
    }

    #[test]
    fn test_prices_exclude_tax() {
        let breakdown = calculate_tax(Money::new(dec!(19.27)), &vat(), true, 2);

        assert_eq!(breakdown.before_taxes.amount(), dec!(19.27));
        // 19.27 × 1.2 = 23.124
        assert_eq!(breakdown.after_taxes.amount(), dec!(23.12));
        assert_eq!(breakdown.taxes.amount(), dec!(3.85));
    }

    #[test]
    fn test_tax_reconciles_with_rounded_totals() {
        // 10.00 / 1.0825 = 9.2378... → 9.24, tax = 0.76
        let rate = TaxSpec::new("Sales tax", dec!(8.25)).unwrap();
        let breakdown = calculate_tax(Money::new(dec!(10.00)), &rate, false, 2);

        assert_eq!(breakdown.before_taxes.amount(), dec!(9.24));
        assert_eq!(breakdown.taxes.amount(), dec!(0.76));
        assert_eq!(breakdown.before_taxes + breakdown.taxes, breakdown.after_taxes);
    }

    #[test]
    fn test_unrounded_rate_is_used() {
        let rate = TaxSpec::new("Odd", dec!(7.125)).unwrap();
        let breakdown = calculate_tax(Money::new(dec!(100)), &rate, true, 2);
        // 100 × 1.07125 = 107.125 → 107.13
        assert_eq!(breakdown.after_taxes.amount(), dec!(107.13));
        assert_eq!(breakdown.line.rate.value(), dec!(7.125));
    }

    #[test]
    fn test_zero_amount() {
        let breakdown = calculate_tax(Money::zero(), &vat(), false, 2);
        assert!(breakdown.before_taxes.is_zero());
        assert!(breakdown.taxes.is_zero());
    }
}

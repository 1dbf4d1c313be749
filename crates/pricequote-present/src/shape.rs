//! # Output Shaping
//!
//! A pure transform from the immutable [`QuoteResult`] to the JSON document
//! callers consume. Nothing is recomputed here: every number is read from
//! the result and only its representation changes.
//!
//! ## Output Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OutputOptions        totals keys                 extra display keys   │
//! │  ─────────────        ───────────                 ──────────────────   │
//! │  default              afterDiscounts              (none)               │
//! │  display              afterDiscounts              displayValue, ...    │
//! │  snake_case           after_discounts             (none)               │
//! │  display+snake_case   after_discounts             display_value, ...   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decimals become JSON numbers: integral values as integers, the rest as
//! the nearest `f64`. Extras are merged into their product or discount
//! object after the computed keys; a computed key is never overwritten.

use pricequote_core::{AppliedDiscount, DiscountKind, LineItem, Money, QuoteResult, TaxLine, Totals};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::error::PresentResult;
use crate::formatter::DisplayFormatter;

/// How the result should be shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Add formatted `display*` strings next to the numbers.
    pub display: bool,
    /// Use snake_case for multi-word keys.
    pub snake_case: bool,
}

/// Shapes `result` into its output document.
///
/// ## Example
/// ```rust
/// use pricequote_core::Quote;
/// use pricequote_present::{shape, LocaleFormatter, OutputOptions};
///
/// let mut quote = Quote::default();
/// quote.add_product_value("Delivery fee", "2.50")?;
///
/// let formatter = LocaleFormatter::new("en-US", "")?;
/// let options = OutputOptions { display: true, snake_case: true };
/// let json = shape(&quote.to_result(), &options, &formatter);
///
/// assert_eq!(json["totals"]["after_discounts"], 2.5);
/// assert_eq!(json["totals"]["display_after_discounts"], "2.5");
/// assert!(json.get("taxes").is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn shape(result: &QuoteResult, options: &OutputOptions, formatter: &dyn DisplayFormatter) -> Value {
    let shaper = Shaper { options, formatter };

    let mut root = Map::new();
    root.insert("currency".into(), Value::String(result.currency.clone()));
    root.insert(
        "products".into(),
        result.products.iter().map(|p| shaper.product(p)).collect(),
    );
    root.insert(
        "discounts".into(),
        result.discounts.iter().map(|d| shaper.discount(d)).collect(),
    );
    if let Some(taxes) = &result.taxes {
        root.insert("taxes".into(), taxes.iter().map(tax_line).collect());
    }
    root.insert("totals".into(), shaper.totals(&result.totals));

    Value::Object(root)
}

/// Serializes a shaped document, pretty-printed or compact.
pub fn render(document: &Value, pretty: bool) -> PresentResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(text)
}

/// Converts an exact decimal to a JSON number.
pub fn to_json_number(value: Decimal) -> Value {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(int) = normalized.to_i64() {
            return Value::from(int);
        }
    }
    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

// =============================================================================
// Shaper
// =============================================================================

struct Shaper<'a> {
    options: &'a OutputOptions,
    formatter: &'a dyn DisplayFormatter,
}

impl Shaper<'_> {
    fn key(&self, camel: &'static str, snake: &'static str) -> String {
        let key = if self.options.snake_case { snake } else { camel };
        key.to_string()
    }

    fn money(&self, object: &mut Map<String, Value>, key: &str, display: (&'static str, &'static str), value: Money) {
        object.insert(key.to_string(), to_json_number(value.amount()));
        if self.options.display {
            object.insert(
                self.key(display.0, display.1),
                Value::String(self.formatter.format(value.amount())),
            );
        }
    }

    fn product(&self, item: &LineItem) -> Value {
        let mut object = Map::new();
        object.insert("label".into(), Value::String(item.label.clone()));
        self.money(&mut object, "value", ("displayValue", "display_value"), item.value);
        if let Some(quantity) = item.quantity {
            object.insert("quantity".into(), Value::from(quantity));
        }
        self.money(&mut object, "total", ("displayTotal", "display_total"), item.total);
        merge_extras(&mut object, &item.extras);
        Value::Object(object)
    }

    fn discount(&self, discount: &AppliedDiscount) -> Value {
        let mut object = Map::new();
        object.insert("label".into(), Value::String(discount.label.clone()));
        match discount.kind {
            DiscountKind::Amount(amount) => {
                object.insert("amount".into(), to_json_number(amount.amount()));
            }
            DiscountKind::Percent(percent) => {
                object.insert("percent".into(), to_json_number(percent.value()));
            }
        }
        self.money(&mut object, "value", ("displayValue", "display_value"), discount.value);
        self.money(&mut object, "total", ("displayTotal", "display_total"), discount.total);
        merge_extras(&mut object, &discount.extras);
        Value::Object(object)
    }

    fn totals(&self, totals: &Totals) -> Value {
        let mut object = Map::new();
        self.money(&mut object, "products", ("displayProducts", "display_products"), totals.products);
        self.money(&mut object, "discounts", ("displayDiscounts", "display_discounts"), totals.discounts);
        self.money(
            &mut object,
            &self.key("afterDiscounts", "after_discounts"),
            ("displayAfterDiscounts", "display_after_discounts"),
            totals.after_discounts,
        );

        if let (Some(before), Some(after), Some(taxes)) = (totals.before_taxes, totals.after_taxes, totals.taxes) {
            object.insert(self.key("beforeTaxes", "before_taxes"), to_json_number(before.amount()));
            object.insert(self.key("afterTaxes", "after_taxes"), to_json_number(after.amount()));
            object.insert("taxes".into(), to_json_number(taxes.amount()));
        }

        Value::Object(object)
    }
}

fn tax_line(line: &TaxLine) -> Value {
    let mut object = Map::new();
    object.insert("label".into(), Value::String(line.label.clone()));
    object.insert("rate".into(), to_json_number(line.rate.value()));
    object.insert("value".into(), to_json_number(line.value.amount()));
    Value::Object(object)
}

fn merge_extras(object: &mut Map<String, Value>, extras: &Map<String, Value>) {
    for (key, value) in extras {
        if !object.contains_key(key) {
            object.insert(key.clone(), value.clone());
        }
    }
}

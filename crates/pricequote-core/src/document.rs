//! # Quote Documents
//!
//! A serializable description of a quote, so callers can hand over a JSON
//! document instead of driving the builder API.
//!
//! ## Format
//! ```json
//! {
//!   "options":   { "currency": "EUR", "decimalPlaces": 2, "isBeforeTaxes": false },
//!   "products":  [ { "label": "Pizza", "value": 13.20, "quantity": 2, "id": "ce0b9" } ],
//!   "discounts": [ { "label": "PROMO20", "percent": 20 } ],
//!   "tax":       { "label": "VAT", "rate": 20 }
//! }
//! ```
//!
//! Any key on a product or discount that is not part of the format is kept
//! as an extra and shows up again on the result line.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::quote::{Quote, QuoteConfig};
use crate::types::{DiscountRequest, Extras, Product};

/// Per-document overrides of a [`QuoteConfig`]. Absent keys keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_before_taxes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl QuoteOptions {
    /// Overlays the options that are set onto `config`.
    pub fn apply_to(&self, config: &mut QuoteConfig) {
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
        if let Some(decimal_places) = self.decimal_places {
            config.decimal_places = decimal_places;
        }
        if let Some(is_before_taxes) = self.is_before_taxes {
            config.is_before_taxes = is_before_taxes;
        }
        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
    }
}

/// A product line. `value` may be a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub label: String,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// A discount line. Exactly one of `amount` / `percent` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountEntry {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxEntry {
    pub label: String,
    pub rate: serde_json::Value,
}

/// A whole quote as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    #[serde(default)]
    pub options: QuoteOptions,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub discounts: Vec<DiscountEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxEntry>,
}

impl QuoteDocument {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Builds a [`Quote`], with the document's options layered over
    /// `defaults`. Fails on the first invalid entry.
    pub fn into_quote(self, mut defaults: QuoteConfig) -> CoreResult<Quote> {
        self.options.apply_to(&mut defaults);
        let mut quote = Quote::new(defaults)?;

        for entry in self.products {
            let mut product = Product::new(entry.label, &entry.value)?.with_extras(entry.extras);
            if let Some(quantity) = entry.quantity {
                product = product.with_quantity(quantity)?;
            }
            quote.add_product(product)?;
        }

        for entry in self.discounts {
            quote.add_discount(entry.into_request()?)?;
        }

        if let Some(tax) = self.tax {
            quote.set_tax(tax.label, &tax.rate)?;
        }

        Ok(quote)
    }
}

impl DiscountEntry {
    fn into_request(self) -> CoreResult<DiscountRequest> {
        let request = match (&self.amount, &self.percent) {
            (Some(amount), None) => DiscountRequest::amount(self.label, amount)?,
            (None, Some(percent)) => DiscountRequest::percent(self.label, percent)?,
            (Some(_), Some(_)) => {
                return Err(ValidationError::ConflictingFields {
                    field: format!("discount '{}'", self.label),
                    options: discount_options(),
                }
                .into())
            }
            (None, None) => {
                return Err(ValidationError::MissingField {
                    field: format!("discount '{}'", self.label),
                    options: discount_options(),
                }
                .into())
            }
        };
        Ok(request.with_extras(self.extras))
    }
}

fn discount_options() -> Vec<String> {
    vec!["amount".to_string(), "percent".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal_macros::dec;

    const PIZZA: &str = r#"{
        "options": { "currency": "EUR" },
        "products": [
            { "label": "Pizza", "value": 13.20, "quantity": 2, "id": "ce0b9" },
            { "label": "Delivery fee", "value": "2.50", "id": "caa93" }
        ],
        "discounts": [ { "label": "PROMO20", "percent": 20, "code": "SPRING" } ],
        "tax": { "label": "VAT", "rate": 20 }
    }"#;

    #[test]
    fn test_document_builds_quote() {
        let quote = QuoteDocument::from_json(PIZZA)
            .unwrap()
            .into_quote(QuoteConfig::default())
            .unwrap();
        let result = quote.to_result();

        assert_eq!(result.currency, "EUR");
        assert_eq!(result.products[0].extras["id"], "ce0b9");
        assert_eq!(result.discounts[0].extras["code"], "SPRING");
        assert_eq!(result.totals.after_discounts.amount(), dec!(23.12));
        assert_eq!(result.totals.before_taxes.unwrap().amount(), dec!(19.27));
    }

    #[test]
    fn test_known_keys_are_not_extras() {
        let doc = QuoteDocument::from_json(PIZZA).unwrap();
        assert!(!doc.products[0].extras.contains_key("quantity"));
        assert!(!doc.products[0].extras.contains_key("value"));
        assert!(!doc.discounts[0].extras.contains_key("percent"));
    }

    #[test]
    fn test_options_override_defaults() {
        let doc = QuoteDocument::from_json(r#"{ "options": { "decimalPlaces": 3 } }"#).unwrap();
        let defaults = QuoteConfig {
            currency: "USD".to_string(),
            ..QuoteConfig::default()
        };
        let quote = doc.into_quote(defaults).unwrap();
        assert_eq!(quote.config().decimal_places, 3);
        assert_eq!(quote.config().currency, "USD");
    }

    #[test]
    fn test_discount_needs_exactly_one_kind() {
        let both = r#"{ "discounts": [ { "label": "X", "amount": 1, "percent": 2 } ] }"#;
        let err = QuoteDocument::from_json(both)
            .unwrap()
            .into_quote(QuoteConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ConflictingFields { .. })
        ));

        let neither = r#"{ "discounts": [ { "label": "X" } ] }"#;
        let err = QuoteDocument::from_json(neither)
            .unwrap()
            .into_quote(QuoteConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_unparsable_value_is_rejected() {
        let doc = r#"{ "products": [ { "label": "Pizza", "value": "cheap" } ] }"#;
        let err = QuoteDocument::from_json(doc)
            .unwrap()
            .into_quote(QuoteConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn test_out_of_range_documents_fail_to_build() {
        let cases = [
            r#"{ "products": [ { "label": "A", "value": "50000000000000000000000000000", "quantity": 2 } ] }"#,
            r#"{ "products": [ { "label": "A", "value": "50000000000000000000000000000" },
                               { "label": "B", "value": "50000000000000000000000000000" } ] }"#,
            r#"{ "products": [ { "label": "A", "value": 1e24 } ], "tax": { "label": "T", "rate": 1 } }"#,
            r#"{ "products": [ { "label": "A", "value": 1 } ], "discounts": [ { "label": "D", "percent": 1e20 } ] }"#,
            r#"{ "products": [ { "label": "A", "value": 1, "quantity": 4000000000 } ] }"#,
        ];
        for case in cases {
            let err = QuoteDocument::from_json(case)
                .unwrap()
                .into_quote(QuoteConfig::default())
                .unwrap_err();
            assert!(
                matches!(err, CoreError::Validation(ValidationError::OutOfRange { .. })),
                "{case}: {err}"
            );
        }

        let near_minus_hundred = r#"{ "products": [ { "label": "A", "value": 1000 } ],
                                      "tax": { "label": "T", "rate": -99.9999 } }"#;
        let err = QuoteDocument::from_json(near_minus_hundred)
            .unwrap()
            .into_quote(QuoteConfig::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::TaxDivisorZero { .. }));
    }
}

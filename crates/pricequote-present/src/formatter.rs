//! # Display Formatter
//!
//! Renders exact decimals as human-readable, locale-aware strings for the
//! `display*` fields of the output.
//!
//! ## Formatting Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    LocaleFormatter::format(value)                       │
//! │                                                                         │
//! │  NO CURRENCY                         WITH CURRENCY                      │
//! │  ───────────                         ─────────────                      │
//! │  round to at most 3 digits           round to the currency's minor      │
//! │  trailing zeros trimmed              units (EUR 2, JPY 0, BHD 3)        │
//! │                                      symbol placed per locale           │
//! │                                                                         │
//! │  en-US: 1234.5  →  1,234.5           en-US: €1,234.50                   │
//! │  de-DE: 1234.5  →  1.234,5           fr-FR: 1 234,50 €                  │
//! │                                                                         │
//! │  Rounding is half away from zero, same as the calculation itself.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Currency symbols come from the ISO 4217 table in `rusty-money`, so a
//! locale never changes the symbol itself (CAD is `$` everywhere).

use pricequote_core::money::ROUNDING;
use pricequote_core::{QuoteConfig, DEFAULT_LOCALE};
use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use tracing::{debug, warn};

use crate::error::{PresentError, PresentResult};

/// Digits kept when formatting a plain number.
pub const MAX_PLAIN_FRACTION_DIGITS: u32 = 3;

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

// =============================================================================
// DisplayFormatter Trait
// =============================================================================

/// Turns a decimal into its display string.
pub trait DisplayFormatter {
    fn format(&self, value: Decimal) -> String;
}

impl<F> DisplayFormatter for F
where
    F: Fn(Decimal) -> String,
{
    fn format(&self, value: Decimal) -> String {
        self(value)
    }
}

// =============================================================================
// Locale Table
// =============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    /// `€1,234.50`
    Before,
    /// `R$ 1.234,50`
    BeforeSpaced,
    /// `€ -1.234,50`: the sign sits between symbol and number.
    BeforeSpacedSignInside,
    /// `1.234,50 €`
    AfterSpaced,
}

/// Number conventions of one supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSpec {
    tag: &'static str,
    group: char,
    decimal: char,
    /// Integer digits needed before grouping kicks in, minus three.
    /// es-ES writes `1234` but `12.345`.
    min_grouping: usize,
    placement: SymbolPlacement,
}

impl LocaleSpec {
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    fn language(&self) -> &'static str {
        self.tag.split('-').next().unwrap_or(self.tag)
    }
}

/// Supported locales. The first entry of each language is its primary
/// region, and the first entry overall is the fallback.
const LOCALES: &[LocaleSpec] = &[
    LocaleSpec { tag: "en-US", group: ',', decimal: '.', min_grouping: 1, placement: SymbolPlacement::Before },
    LocaleSpec { tag: "en-GB", group: ',', decimal: '.', min_grouping: 1, placement: SymbolPlacement::Before },
    LocaleSpec { tag: "fr-FR", group: NARROW_NBSP, decimal: ',', min_grouping: 1, placement: SymbolPlacement::AfterSpaced },
    LocaleSpec { tag: "de-DE", group: '.', decimal: ',', min_grouping: 1, placement: SymbolPlacement::AfterSpaced },
    LocaleSpec { tag: "es-ES", group: '.', decimal: ',', min_grouping: 2, placement: SymbolPlacement::AfterSpaced },
    LocaleSpec { tag: "it-IT", group: '.', decimal: ',', min_grouping: 1, placement: SymbolPlacement::AfterSpaced },
    LocaleSpec { tag: "nl-NL", group: '.', decimal: ',', min_grouping: 1, placement: SymbolPlacement::BeforeSpacedSignInside },
    LocaleSpec { tag: "pt-BR", group: '.', decimal: ',', min_grouping: 1, placement: SymbolPlacement::BeforeSpaced },
    LocaleSpec { tag: "ja-JP", group: ',', decimal: '.', min_grouping: 1, placement: SymbolPlacement::Before },
];

/// Finds the closest supported locale for a BCP 47 tag.
///
/// Exact tag first (case-insensitive, `_` accepted for `-`), then the
/// language's primary region, then en-US.
pub fn resolve_locale(tag: &str) -> &'static LocaleSpec {
    let normalized = tag.trim().replace('_', "-");

    if let Some(spec) = LOCALES.iter().find(|l| l.tag.eq_ignore_ascii_case(&normalized)) {
        return spec;
    }

    let language = normalized.split('-').next().unwrap_or_default();
    if let Some(spec) = LOCALES.iter().find(|l| l.language().eq_ignore_ascii_case(language)) {
        debug!(requested = tag, resolved = spec.tag, "Locale resolved by language");
        return spec;
    }

    warn!(requested = tag, fallback = DEFAULT_LOCALE, "Unsupported locale, using fallback");
    &LOCALES[0]
}

// =============================================================================
// LocaleFormatter
// =============================================================================

/// [`DisplayFormatter`] for a locale and an optional ISO 4217 currency.
///
/// ## Example
/// ```rust
/// use pricequote_present::{DisplayFormatter, LocaleFormatter};
/// use rust_decimal::Decimal;
///
/// let eur = LocaleFormatter::new("en-US", "EUR")?;
/// assert_eq!(eur.format(Decimal::new(12345, 1)), "€1,234.50");
///
/// let plain = LocaleFormatter::new("en-US", "")?;
/// assert_eq!(plain.format(Decimal::new(12345, 1)), "1,234.5");
/// # Ok::<(), pricequote_present::PresentError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: &'static LocaleSpec,
    currency: Option<&'static Currency>,
}

impl LocaleFormatter {
    /// Creates a formatter. An empty `currency` formats plain numbers.
    pub fn new(locale: &str, currency: &str) -> PresentResult<Self> {
        let code = currency.trim();
        let currency = if code.is_empty() {
            None
        } else {
            let found = iso::find(&code.to_ascii_uppercase()).ok_or_else(|| {
                PresentError::UnknownCurrency {
                    code: code.to_string(),
                }
            })?;
            Some(found)
        };

        Ok(LocaleFormatter {
            locale: resolve_locale(locale),
            currency,
        })
    }

    /// Formatter for a quote's own locale and currency.
    pub fn for_config(config: &QuoteConfig) -> PresentResult<Self> {
        Self::new(&config.locale, &config.currency)
    }

    /// The resolved locale tag (after fallback).
    pub fn locale(&self) -> &'static str {
        self.locale.tag
    }

    pub fn currency_code(&self) -> Option<&'static str> {
        self.currency.map(|c| c.iso_alpha_code)
    }

    fn fraction_digits(&self) -> u32 {
        match self.currency {
            Some(currency) => currency.exponent,
            None => MAX_PLAIN_FRACTION_DIGITS,
        }
    }

    fn decorate(&self, number: String, negative: bool) -> String {
        let sign = if negative { "-" } else { "" };
        let Some(currency) = self.currency else {
            return format!("{sign}{number}");
        };
        let symbol = currency.symbol;

        match self.locale.placement {
            SymbolPlacement::Before => format!("{sign}{symbol}{number}"),
            SymbolPlacement::BeforeSpaced => format!("{sign}{symbol}{NBSP}{number}"),
            SymbolPlacement::BeforeSpacedSignInside => format!("{symbol}{NBSP}{sign}{number}"),
            SymbolPlacement::AfterSpaced => format!("{sign}{number}{NBSP}{symbol}"),
        }
    }
}

impl DisplayFormatter for LocaleFormatter {
    fn format(&self, value: Decimal) -> String {
        let digits = self.fraction_digits();
        let rounded = value.round_dp_with_strategy(digits, ROUNDING);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let magnitude = rounded.abs();

        let digits_text = match self.currency {
            Some(_) => format!("{:.*}", digits as usize, magnitude),
            None => magnitude.normalize().to_string(),
        };
        let (integer, fraction) = match digits_text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits_text.as_str(), None),
        };

        let mut number = group_digits(integer, self.locale.group, self.locale.min_grouping);
        if let Some(fraction) = fraction {
            number.push(self.locale.decimal);
            number.push_str(fraction);
        }

        self.decorate(number, negative)
    }
}

/// Inserts `separator` every three digits from the right.
fn group_digits(integer: &str, separator: char, min_grouping: usize) -> String {
    if integer.len() < 3 + min_grouping {
        return integer.to_string();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 * separator.len_utf8());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Subcommand execution.

use std::io::{Read, Write};

use pricequote_core::QuoteDocument;
use pricequote_present::{render, shape, LocaleFormatter};
use tracing::{debug, info};

use crate::cli::{Cli, Command, QuoteArgs, SettingsArgs};
use crate::config::CliSettings;
use crate::error::{CliError, CliResult};

/// Runs the parsed command line, writing results to stdout.
pub fn run(cli: Cli) -> CliResult<()> {
    let mut settings = CliSettings::load(cli.config)?;

    let output = match cli.command {
        Command::Quote(args) => {
            let input = read_input(&args.input)?;
            quote_command(&mut settings, &args, &input)?
        }
        Command::Config(args) => config_command(&mut settings, &args)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).map_err(CliError::Output)?;
    Ok(())
}

/// Applies the flags, then computes `input` and renders the result.
pub fn quote_command(settings: &mut CliSettings, args: &QuoteArgs, input: &str) -> CliResult<String> {
    settings.apply_args(&args.settings);
    settings.validate()?;
    compute(settings, input)
}

/// Applies the flags and renders the effective settings.
pub fn config_command(settings: &mut CliSettings, args: &SettingsArgs) -> CliResult<String> {
    settings.apply_args(args);
    settings.validate()?;
    Ok(settings.to_toml()?)
}

/// Computes one quote document with `settings` as defaults.
pub fn compute(settings: &CliSettings, input: &str) -> CliResult<String> {
    let document = QuoteDocument::from_json(input)?;
    debug!(
        products = document.products.len(),
        discounts = document.discounts.len(),
        has_tax = document.tax.is_some(),
        "Document parsed"
    );

    let quote = document.into_quote(settings.quote_config())?;
    let formatter = LocaleFormatter::for_config(quote.config())?;
    let result = quote.to_result();

    info!(
        currency = %result.currency,
        after_discounts = %result.totals.after_discounts,
        "Quote computed"
    );

    let shaped = shape(&result, &settings.output_options(), &formatter);
    Ok(render(&shaped, settings.output.pretty)?)
}

/// Reads the whole document from a file, or stdin for `-`.
pub fn read_input(source: &str) -> CliResult<String> {
    let read = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(source)
    };

    read.map_err(|err| CliError::Input {
        source_name: if source == "-" { "<stdin>".to_string() } else { source.to_string() },
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const PIZZA: &str = r#"{
        "products": [
            { "label": "Pizza", "value": 13.20, "quantity": 2 },
            { "label": "Delivery fee", "value": 2.50 }
        ],
        "discounts": [ { "label": "PROMO20", "percent": 20 } ],
        "tax": { "label": "VAT", "rate": 20 }
    }"#;

    fn compute_json(settings: &CliSettings, input: &str) -> Value {
        serde_json::from_str(&compute(settings, input).unwrap()).unwrap()
    }

    #[test]
    fn test_compute_with_defaults() {
        let json = compute_json(&CliSettings::default(), PIZZA);
        assert_eq!(json["currency"], "");
        assert_eq!(json["totals"]["afterDiscounts"], 23.12);
        assert_eq!(json["totals"]["beforeTaxes"], 19.27);
        assert_eq!(json["taxes"][0]["value"], 3.85);
    }

    #[test]
    fn test_settings_shape_the_output() {
        let mut settings = CliSettings::default();
        settings.quote.currency = "EUR".to_string();
        settings.output.display = true;
        settings.output.snake_case = true;

        let json = compute_json(&settings, PIZZA);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["totals"]["after_discounts"], 23.12);
        assert_eq!(json["totals"]["display_after_discounts"], "€23.12");
    }

    #[test]
    fn test_document_options_win_over_settings() {
        let mut settings = CliSettings::default();
        settings.quote.currency = "USD".to_string();
        let input = r#"{ "options": { "currency": "EUR", "decimalPlaces": 0 },
                         "products": [ { "label": "A", "value": 2.5 } ] }"#;

        let json = compute_json(&settings, input);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["totals"]["products"], 3);
    }

    #[test]
    fn test_compact_output() {
        let mut settings = CliSettings::default();
        settings.output.pretty = false;
        let text = compute(&settings, r#"{ "products": [] }"#).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_flags_are_applied_and_validated() {
        let mut settings = CliSettings::default();
        let args = QuoteArgs {
            input: "-".to_string(),
            settings: SettingsArgs {
                decimal_places: Some(40),
                ..SettingsArgs::default()
            },
        };
        let err = quote_command(&mut settings, &args, PIZZA).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_bad_documents() {
        let settings = CliSettings::default();
        assert!(matches!(compute(&settings, "not json"), Err(CliError::Document(_))));
        assert!(matches!(
            compute(&settings, r#"{ "tax": { "label": "X", "rate": -100 } }"#),
            Err(CliError::Core(_))
        ));
        assert!(matches!(
            compute(&settings, r#"{ "options": { "currency": "ABC" } }"#),
            Err(CliError::Present(_))
        ));
    }

    #[test]
    fn test_config_command_prints_toml() {
        let mut settings = CliSettings::default();
        let args = SettingsArgs {
            locale: Some("de-DE".to_string()),
            ..SettingsArgs::default()
        };
        let text = config_command(&mut settings, &args).unwrap();
        assert!(text.contains("locale = \"de-DE\""));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input("/nonexistent/quote.json").unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
    }
}

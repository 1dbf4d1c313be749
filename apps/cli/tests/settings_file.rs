//! Settings loaded from real files.

use std::io::Write;

use pricequote_cli::cli::{QuoteArgs, SettingsArgs};
use pricequote_cli::commands::{compute, quote_command, read_input};
use pricequote_cli::{CliError, CliSettings, ConfigError};
use serde_json::Value;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_settings_are_used() {
    let file = write_temp(
        r#"
        [quote]
        currency = "EUR"
        locale = "fr-FR"

        [output]
        display = true
        "#,
    );

    let settings = CliSettings::from_file(file.path()).unwrap();
    let text = compute(
        &settings,
        r#"{ "products": [ { "label": "Pizza", "value": "1234.5" } ] }"#,
    )
    .unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["totals"]["displayProducts"], "1\u{202f}234,50\u{a0}€");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = CliSettings::from_file(std::path::Path::new("/nonexistent/pricequote.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn invalid_file_is_an_error() {
    let file = write_temp("[quote]\ndecimal_places = \"two\"\n");
    let err = CliSettings::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn flags_override_file() {
    let file = write_temp("[quote]\ncurrency = \"EUR\"\ndecimal_places = 3\n");
    let mut settings = CliSettings::from_file(file.path()).unwrap();
    let args = QuoteArgs {
        input: "-".to_string(),
        settings: SettingsArgs {
            currency: Some("GBP".to_string()),
            compact: true,
            ..SettingsArgs::default()
        },
    };

    let text = quote_command(
        &mut settings,
        &args,
        r#"{ "products": [ { "label": "Tea", "value": 1.23456 } ] }"#,
    )
    .unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["currency"], "GBP");
    assert_eq!(json["totals"]["products"], 1.235);
    assert!(!text.contains('\n'));
}

#[test]
fn document_read_from_file() {
    let file = write_temp(r#"{ "products": [ { "label": "A", "value": 1 } ] }"#);
    let input = read_input(file.path().to_str().unwrap()).unwrap();
    let text = compute(&CliSettings::default(), &input).unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["totals"]["afterDiscounts"], 1);
}

#[test]
fn unknown_currency_in_settings_is_rejected() {
    let file = write_temp("[quote]\ncurrency = \"ABC\"\n");
    let mut settings = CliSettings::from_file(file.path()).unwrap();
    let args = QuoteArgs {
        input: "-".to_string(),
        settings: SettingsArgs::default(),
    };
    let err = quote_command(&mut settings, &args, "{}").unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Invalid(_))));
}

#[test]
fn flags_can_replace_an_invalid_file_currency() {
    let file = write_temp("[quote]\ncurrency = \"ABC\"\n");
    let mut settings = CliSettings::load(Some(file.path().to_path_buf())).unwrap();
    let args = QuoteArgs {
        input: "-".to_string(),
        settings: SettingsArgs {
            currency: Some("EUR".to_string()),
            ..SettingsArgs::default()
        },
    };

    let text = quote_command(
        &mut settings,
        &args,
        r#"{ "products": [ { "label": "A", "value": 1 } ] }"#,
    )
    .unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["currency"], "EUR");
}

#[test]
fn no_display_flag_overrides_file() {
    let file = write_temp("[output]\ndisplay = true\n");
    let mut settings = CliSettings::load(Some(file.path().to_path_buf())).unwrap();
    let args = QuoteArgs {
        input: "-".to_string(),
        settings: SettingsArgs {
            no_display: true,
            ..SettingsArgs::default()
        },
    };

    let text = quote_command(
        &mut settings,
        &args,
        r#"{ "products": [ { "label": "A", "value": 1 } ] }"#,
    )
    .unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    assert!(json["totals"].get("displayProducts").is_none());
}

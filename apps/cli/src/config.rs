//! # CLI Settings
//!
//! Defaults for every quote the CLI computes, and how its output is shaped.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. The document's own "options" (highest priority)                    │
//! │                                                                         │
//! │  2. Command line flags                                                  │
//! │     --currency EUR --decimal-places 3 --display                        │
//! │                                                                         │
//! │  3. Environment Variables                                               │
//! │     PRICEQUOTE_CURRENCY=EUR                                            │
//! │     PRICEQUOTE_DISPLAY=true                                            │
//! │                                                                         │
//! │  4. TOML Config File                                                    │
//! │     --config <PATH>, or ./pricequote.toml when present                 │
//! │                                                                         │
//! │  5. Default Values (lowest priority)                                   │
//! │     no currency, 2 decimal places, en-US, pretty JSON                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [quote]
//! currency = "EUR"
//! decimal_places = 2
//! is_before_taxes = false
//! locale = "fr-FR"
//!
//! [output]
//! display = true
//! snake_case = false
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use pricequote_core::validation::validate_decimal_places;
use pricequote_core::{QuoteConfig, DEFAULT_DECIMAL_PLACES, DEFAULT_LOCALE};
use pricequote_present::{LocaleFormatter, OutputOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::SettingsArgs;
use crate::error::{ConfigError, ConfigResult};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pricequote.toml";

// =============================================================================
// Quote Settings
// =============================================================================

/// Defaults applied to every quote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// ISO 4217 code; empty means plain numbers.
    #[serde(default)]
    pub currency: String,

    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// True when product values exclude tax.
    #[serde(default)]
    pub is_before_taxes: bool,

    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            currency: String::new(),
            decimal_places: default_decimal_places(),
            is_before_taxes: false,
            locale: default_locale(),
        }
    }
}

// =============================================================================
// Output Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Add formatted display strings.
    #[serde(default)]
    pub display: bool,

    /// snake_case keys instead of camelCase.
    #[serde(default)]
    pub snake_case: bool,

    /// Indented JSON.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            display: false,
            snake_case: false,
            pretty: default_true(),
        }
    }
}

// =============================================================================
// CLI Settings
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default)]
    pub quote: QuoteSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliSettings {
    /// Loads settings from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or `pricequote.toml` if it exists)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that cannot be read is an error; a missing
    /// `pricequote.toml` is not. The result is not validated: flags still
    /// apply on top, so call [`validate`](Self::validate) after
    /// [`apply_args`](Self::apply_args).
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        settings.apply_env_overrides()?;

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading settings from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the settings.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_decimal_places(self.quote.decimal_places)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // Surfaces an unknown currency before any document is read
        LocaleFormatter::new(&self.quote.locale, &self.quote.currency)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies `PRICEQUOTE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed by environment
    /// variable name.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup("PRICEQUOTE_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.quote.currency = currency;
        }

        if let Some(locale) = lookup("PRICEQUOTE_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            self.quote.locale = locale;
        }

        if let Some(value) = lookup("PRICEQUOTE_DECIMAL_PLACES") {
            self.quote.decimal_places = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PRICEQUOTE_DECIMAL_PLACES",
                value,
            })?;
        }

        if let Some(value) = lookup("PRICEQUOTE_BEFORE_TAXES") {
            self.quote.is_before_taxes = parse_flag("PRICEQUOTE_BEFORE_TAXES", value)?;
        }

        if let Some(value) = lookup("PRICEQUOTE_DISPLAY") {
            self.output.display = parse_flag("PRICEQUOTE_DISPLAY", value)?;
        }

        if let Some(value) = lookup("PRICEQUOTE_SNAKE_CASE") {
            self.output.snake_case = parse_flag("PRICEQUOTE_SNAKE_CASE", value)?;
        }

        Ok(())
    }

    /// Applies command line flags. Flags that were not given leave the
    /// current value alone.
    pub fn apply_args(&mut self, args: &SettingsArgs) {
        if let Some(currency) = &args.currency {
            self.quote.currency = currency.clone();
        }
        if let Some(locale) = &args.locale {
            self.quote.locale = locale.clone();
        }
        if let Some(decimal_places) = args.decimal_places {
            self.quote.decimal_places = decimal_places;
        }
        if let Some(is_before_taxes) = args.before_taxes() {
            self.quote.is_before_taxes = is_before_taxes;
        }
        if let Some(display) = args.display() {
            self.output.display = display;
        }
        if let Some(snake_case) = args.snake_case() {
            self.output.snake_case = snake_case;
        }
        if let Some(pretty) = args.pretty() {
            self.output.pretty = pretty;
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Quote defaults, before a document's own options are layered on.
    pub fn quote_config(&self) -> QuoteConfig {
        QuoteConfig {
            decimal_places: self.quote.decimal_places,
            is_before_taxes: self.quote.is_before_taxes,
            currency: self.quote.currency.clone(),
            locale: self.quote.locale.clone(),
        }
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            display: self.output.display,
            snake_case: self.output.snake_case,
        }
    }
}

fn parse_flag(key: &'static str, value: String) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { key, value }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = CliSettings::default();
        assert_eq!(settings.quote.currency, "");
        assert_eq!(settings.quote.decimal_places, 2);
        assert_eq!(settings.quote.locale, "en-US");
        assert!(!settings.output.display);
        assert!(settings.output.pretty);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = CliSettings::from_toml("[quote]\ncurrency = \"EUR\"\n").unwrap();
        assert_eq!(settings.quote.currency, "EUR");
        assert_eq!(settings.quote.decimal_places, 2);
        assert_eq!(settings.output, OutputSettings::default());
    }

    #[test]
    fn test_full_toml() {
        let settings = CliSettings::from_toml(
            r#"
            [quote]
            currency = "EUR"
            decimal_places = 3
            is_before_taxes = true
            locale = "fr-FR"

            [output]
            display = true
            snake_case = true
            pretty = false
            "#,
        )
        .unwrap();

        let config = settings.quote_config();
        assert_eq!(config.decimal_places, 3);
        assert!(config.is_before_taxes);
        assert_eq!(config.locale, "fr-FR");
        assert_eq!(
            settings.output_options(),
            OutputOptions { display: true, snake_case: true }
        );
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_malformed_toml() {
        let err = CliSettings::from_toml("[quote\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = CliSettings::default();
        settings
            .apply_overrides_from(env(&[
                ("PRICEQUOTE_CURRENCY", "USD"),
                ("PRICEQUOTE_DECIMAL_PLACES", "4"),
                ("PRICEQUOTE_BEFORE_TAXES", "yes"),
                ("PRICEQUOTE_DISPLAY", "1"),
                ("PRICEQUOTE_SNAKE_CASE", "false"),
            ]))
            .unwrap();

        assert_eq!(settings.quote.currency, "USD");
        assert_eq!(settings.quote.decimal_places, 4);
        assert!(settings.quote.is_before_taxes);
        assert!(settings.output.display);
        assert!(!settings.output.snake_case);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut settings = CliSettings::default();
        let err = settings
            .apply_overrides_from(env(&[("PRICEQUOTE_DECIMAL_PLACES", "two")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { key: "PRICEQUOTE_DECIMAL_PLACES", .. }
        ));
    }

    #[test]
    fn test_validation() {
        let mut settings = CliSettings::default();
        settings.quote.decimal_places = 29;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let mut settings = CliSettings::default();
        settings.quote.currency = "ABC".to_string();
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_args_override() {
        let mut settings = CliSettings::default();
        settings.apply_args(&SettingsArgs {
            currency: Some("EUR".to_string()),
            decimal_places: Some(0),
            display: true,
            compact: true,
            ..SettingsArgs::default()
        });

        assert_eq!(settings.quote.currency, "EUR");
        assert_eq!(settings.quote.decimal_places, 0);
        assert_eq!(settings.quote.locale, "en-US");
        assert!(settings.output.display);
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_negated_args_switch_file_settings_off() {
        let mut settings = CliSettings::from_toml(
            "[quote]\nis_before_taxes = true\n\n[output]\ndisplay = true\nsnake_case = true\npretty = false\n",
        )
        .unwrap();
        settings.apply_args(&SettingsArgs {
            no_before_taxes: true,
            no_display: true,
            no_snake_case: true,
            pretty: true,
            ..SettingsArgs::default()
        });

        assert!(!settings.quote.is_before_taxes);
        assert!(!settings.output.display);
        assert!(!settings.output.snake_case);
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_absent_args_keep_file_settings() {
        let mut settings = CliSettings::from_toml("[output]\ndisplay = true\n").unwrap();
        settings.apply_args(&SettingsArgs::default());
        assert!(settings.output.display);
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut settings = CliSettings::default();
        settings.quote.currency = "GBP".to_string();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("[quote]"));
        assert_eq!(CliSettings::from_toml(&text).unwrap(), settings);
    }
}

//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pricequote",
    about = "Compute price quotes with products, discounts and taxes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults to ./pricequote.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a quote document and print the result as JSON
    Quote(QuoteArgs),

    /// Print the effective settings as TOML
    Config(SettingsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Quote document to read, or "-" for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Flags that override the loaded settings.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// ISO 4217 currency code
    #[arg(long)]
    pub currency: Option<String>,

    /// Locale for display strings, e.g. fr-FR
    #[arg(long)]
    pub locale: Option<String>,

    /// Fractional digits every value is rounded to (0-28)
    #[arg(long, value_name = "N")]
    pub decimal_places: Option<u32>,

    /// Product values exclude tax
    #[arg(long, overrides_with = "no_before_taxes")]
    pub before_taxes: bool,

    /// Product values include tax
    #[arg(long, overrides_with = "before_taxes")]
    pub no_before_taxes: bool,

    /// Add formatted display strings
    #[arg(long, overrides_with = "no_display")]
    pub display: bool,

    /// Omit formatted display strings
    #[arg(long, overrides_with = "display")]
    pub no_display: bool,

    /// Use snake_case keys
    #[arg(long, overrides_with = "no_snake_case")]
    pub snake_case: bool,

    /// Use camelCase keys
    #[arg(long, overrides_with = "snake_case")]
    pub no_snake_case: bool,

    /// Print compact JSON
    #[arg(long, overrides_with = "pretty")]
    pub compact: bool,

    /// Print indented JSON
    #[arg(long, overrides_with = "compact")]
    pub pretty: bool,
}

impl SettingsArgs {
    /// `Some(true)` for `--before-taxes`, `Some(false)` for
    /// `--no-before-taxes`, `None` when neither was given.
    pub fn before_taxes(&self) -> Option<bool> {
        switch(self.before_taxes, self.no_before_taxes)
    }

    pub fn display(&self) -> Option<bool> {
        switch(self.display, self.no_display)
    }

    pub fn snake_case(&self) -> Option<bool> {
        switch(self.snake_case, self.no_snake_case)
    }

    pub fn pretty(&self) -> Option<bool> {
        switch(self.pretty, self.compact)
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

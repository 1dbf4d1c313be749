//! # pricequote CLI
//!
//! Library half of the `pricequote` binary, so the settings layer and the
//! commands can be tested without spawning a process.
//!
//! ## Commands
//! - `pricequote quote <FILE|->` - compute a quote document, print JSON
//! - `pricequote config` - print the effective settings as TOML

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use commands::run;
pub use config::CliSettings;
pub use error::{CliError, ConfigError};

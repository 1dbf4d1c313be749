//! # CLI Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CliError                                                               │
//! │   ├── Config ──► ConfigError { Read, Parse, Serialize, InvalidEnv,     │
//! │   │                            Invalid }                                │
//! │   ├── Input     (file or stdin unreadable)                              │
//! │   ├── Document  (not a quote document)                                  │
//! │   ├── Core      (invalid product, discount, tax or option)              │
//! │   ├── Present   (unknown currency, rendering)                           │
//! │   └── Output    (stdout closed)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use pricequote_core::CoreError;
use pricequote_present::PresentError;
use thiserror::Error;

/// Result type alias for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for command execution.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    /// Settings parsed but make no sense together.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read input {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quote document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Present(#[from] PresentError),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

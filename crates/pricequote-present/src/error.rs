//! # Presentation Errors

use thiserror::Error;

/// Result type alias for presentation operations.
pub type PresentResult<T> = Result<T, PresentError>;

#[derive(Debug, Error)]
pub enum PresentError {
    /// The quote's currency is not an ISO 4217 code.
    #[error("Unknown currency code: {code:?}")]
    UnknownCurrency { code: String },

    /// Rendering the shaped result failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

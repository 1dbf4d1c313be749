//! # Error Types
//!
//! Domain-specific error types for pricequote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricequote-core errors (this file)                                    │
//! │  ├── CoreError        - Quote construction failures                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pricequote-present errors (separate crate)                            │
//! │  └── PresentError     - Formatting/shaping failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Errors Happen
//! Every error is raised while a quote is being BUILT (adding a product,
//! a discount, setting the tax). Computing a result never fails: once a
//! `Quote` exists, `to_result()` is a total function.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quote construction errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The tax rate would bring `1 + rate/100` to zero or within 0.01 of
    /// it, so a before-taxes amount cannot be derived from an after-taxes one.
    #[error("Tax rate {rate}% cannot be used: 1 + rate/100 must be at least 0.01 away from zero")]
    TaxDivisorZero { rate: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised immediately by the call that received the bad input; nothing is
/// deferred to calculation time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A numeric input could not be read as a decimal.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_discount_amount("PROMO", "ten")
    ///      │
    ///      ▼
    /// parse "ten" as decimal → fails
    ///      │
    ///      ▼
    /// InvalidMagnitude { field: "amount", value: "ten" }
    /// ```
    #[error("{field} is not a valid number: {value:?}")]
    InvalidMagnitude { field: String, value: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Two mutually exclusive fields were both supplied.
    #[error("{field} accepts only one of: {options:?}")]
    ConflictingFields { field: String, options: Vec<String> },

    /// None of the alternatives for a field was supplied.
    #[error("{field} requires one of: {options:?}")]
    MissingField { field: String, options: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

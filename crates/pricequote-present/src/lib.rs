//! # pricequote-present: Presentation Layer
//!
//! Everything that happens to a [`pricequote_core::QuoteResult`] after it
//! is computed: locale-aware display strings and the output JSON shape.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   QuoteResult (exact decimals)                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   shape(result, &OutputOptions, &dyn DisplayFormatter)                  │
//! │        │          camelCase | snake_case     LocaleFormatter            │
//! │        │          display on | off           (locale, ISO 4217)         │
//! │        ▼                                                                │
//! │   serde_json::Value (JSON numbers + optional display strings)          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   render(value, pretty) ──► String                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod formatter;
pub mod shape;

pub use error::{PresentError, PresentResult};
pub use formatter::{DisplayFormatter, LocaleFormatter};
pub use shape::{render, shape, OutputOptions};

//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod keys;
pub mod log;
pub mod prefs;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, convert, format_amount};
pub use currency::{CurrencyCatalog, CurrencyCode, ExchangeRateProvider, RateTable};
pub use error::{FxError, FxResult};
pub use prefs::{PreferenceStore, Selection};

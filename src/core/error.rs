//! Error taxonomy for fetching rates and converting amounts

use thiserror::Error;

/// Failures surfaced to the user while computing a conversion.
///
/// None of these are retried. The CLI reports them as a transient message
/// next to an empty result.
#[derive(Error, Debug)]
pub enum FxError {
    /// No active connection; the fetch was not attempted.
    #[error("Network unavailable: cannot reach {host}")]
    NetworkUnavailable { host: String },

    /// The GET failed or returned nothing usable.
    #[error("Network error: {0}")]
    Network(String),

    /// The response lacked `rates` or the requested code.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The amount could not be read as a decimal number.
    #[error("Invalid amount: {0:?}")]
    NumberFormat(String),
}

impl From<reqwest::Error> for FxError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the app id
        let err = err.without_url();
        if err.is_decode() {
            FxError::Parse(err.to_string())
        } else {
            FxError::Network(err.to_string())
        }
    }
}

pub type FxResult<T> = std::result::Result<T, FxError>;

//! Currency codes, rate tables and the provider abstraction

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt::Display;

use super::error::{FxError, FxResult};

/// Reference currency for every rate in a [`RateTable`].
pub const PIVOT: &str = "USD";

/// Separator between code and name in a display label.
pub const LABEL_SEPARATOR: &str = " | ";

/// A three letter currency identifier such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Extracts the code from a display label like `"EUR | Euro"`.
    ///
    /// Only the first three characters are looked at. Labels shorter than that
    /// are taken whole.
    pub fn from_label(label: &str) -> Self {
        let code: String = label.trim().chars().take(3).collect();
        CurrencyCode(code.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_pivot(&self) -> bool {
        self.0.eq_ignore_ascii_case(PIVOT)
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        CurrencyCode::from_label(s)
    }
}

/// Rates of one unit of USD expressed in each currency.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    pub base: Option<String>,
    pub timestamp: Option<i64>,
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (code.to_uppercase(), rate))
            .collect();
        RateTable {
            base: None,
            timestamp: None,
            rates,
        }
    }

    /// Looks up the rate of `code`, USD being 1.0 whether listed or not.
    pub fn rate(&self, code: &CurrencyCode) -> FxResult<f64> {
        if let Some(rate) = self.rates.get(code.as_str()) {
            return Ok(*rate);
        }
        if code.is_pivot() {
            return Ok(1.0);
        }
        Err(FxError::Parse(format!("No rate found for currency: {code}")))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }
}

/// Currency codes with their human readable names, sorted by code.
#[derive(Debug, Clone, Default)]
pub struct CurrencyCatalog {
    entries: Vec<(CurrencyCode, String)>,
}

impl CurrencyCatalog {
    pub fn new(names: HashMap<String, String>) -> Self {
        let mut entries: Vec<_> = names
            .into_iter()
            .map(|(code, name)| (CurrencyCode::from_label(&code), name))
            .collect();
        entries.sort();
        CurrencyCatalog { entries }
    }

    pub fn entries(&self) -> &[(CurrencyCode, String)] {
        &self.entries
    }

    /// Labels in the form `"EUR | Euro"`, in code order.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(code, name)| format!("{code}{LABEL_SEPARATOR}{name}"))
            .collect()
    }
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fails with [`FxError::NetworkUnavailable`] when a fetch cannot succeed.
    async fn is_online(&self) -> FxResult<()> {
        Ok(())
    }

    async fn fetch_rates(&self) -> FxResult<RateTable>;

    async fn fetch_currencies(&self) -> FxResult<CurrencyCatalog>;
}

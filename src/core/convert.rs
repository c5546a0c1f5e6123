//! USD pivoted conversion between two currencies

use std::fmt::Display;
use tracing::debug;

use super::currency::{CurrencyCode, RateTable};
use super::error::{FxError, FxResult};

const FRACTION_DIGITS: usize = 5;

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(source: CurrencyCode, target: CurrencyCode, amount: f64) -> Self {
        ConversionRequest {
            source,
            target,
            amount,
        }
    }

    /// Builds a request from raw user input, failing on an unparseable amount.
    pub fn parse(amount: &str, source: CurrencyCode, target: CurrencyCode) -> FxResult<Self> {
        Ok(Self::new(source, target, parse_amount(amount)?))
    }

    pub fn evaluate(&self, rates: &RateTable) -> FxResult<ConversionResult> {
        let value = convert(self.amount, &self.source, &self.target, rates)?;
        Ok(ConversionResult {
            value,
            code: self.target.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub value: f64,
    pub code: CurrencyCode,
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", format_amount(self.value), self.code)
    }
}

pub fn parse_amount(input: &str) -> FxResult<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FxError::NumberFormat(trimmed.to_string())),
    }
}

/// Converts `amount` of `source` into `target`.
///
/// Every cross rate goes through USD: rates are USD relative, so a non-USD
/// pair divides out the source rate after applying the target one.
pub fn convert(
    amount: f64,
    source: &CurrencyCode,
    target: &CurrencyCode,
    rates: &RateTable,
) -> FxResult<f64> {
    let value = if target.is_pivot() {
        amount / rates.rate(source)?
    } else if source.is_pivot() {
        amount * rates.rate(target)?
    } else {
        amount * rates.rate(target)? / rates.rate(source)?
    };
    if !value.is_finite() {
        return Err(FxError::Parse(format!(
            "Rates for {source} and {target} give no finite result"
        )));
    }
    debug!(%source, %target, amount, value, "Converted amount");
    Ok(value)
}

/// Formats with the `#,##0.00000` pattern.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.*}", FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

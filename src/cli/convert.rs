use super::ui;
use crate::core::{
    ConversionRequest, ConversionResult, ExchangeRateProvider, FxError, PreferenceStore,
    Selection, format_amount,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use tracing::{debug, info, warn};

/// What became of one calculation.
#[derive(Debug)]
pub enum Outcome {
    Converted {
        result: ConversionResult,
        as_of: Option<DateTime<Utc>>,
    },
    Failed(FxError),
    Cancelled,
}

/// Fetches rates and converts `amount` for the selected pair.
///
/// The amount is parsed before any request goes out. If `cancel` resolves
/// first the in-flight fetch is dropped and its result discarded.
pub async fn calculate<C>(
    provider: &dyn ExchangeRateProvider,
    selection: &Selection,
    amount: &str,
    cancel: C,
) -> Outcome
where
    C: Future<Output = ()>,
{
    let request =
        match ConversionRequest::parse(amount, selection.source.clone(), selection.target.clone()) {
            Ok(request) => request,
            Err(e) => return Outcome::Failed(e),
        };

    if let Err(e) = provider.is_online().await {
        return Outcome::Failed(e);
    }

    let rates = tokio::select! {
        biased;
        _ = cancel => {
            info!("Rate fetch cancelled");
            return Outcome::Cancelled;
        }
        rates = provider.fetch_rates() => rates,
    };

    match rates.and_then(|rates| Ok((request.evaluate(&rates)?, rates.as_of()))) {
        Ok((result, as_of)) => {
            debug!(%result, "Conversion done");
            Outcome::Converted { result, as_of }
        }
        Err(e) => Outcome::Failed(e),
    }
}

pub async fn run(
    provider: &dyn ExchangeRateProvider,
    store: &dyn PreferenceStore,
    amount: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let mut selection = Selection::load(store)?;
    if let Some(code) = from {
        selection.set_source(store, code.as_str().into())?;
    }
    if let Some(code) = to {
        selection.set_target(store, code.as_str().into())?;
    }

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler; never cancel
            std::future::pending::<()>().await;
        }
    };

    match calculate(provider, &selection, amount, cancel).await {
        Outcome::Converted { result, as_of } => {
            let source_amount = request_amount_text(amount);
            println!(
                "{source_amount} {} = {}",
                selection.source,
                ui::style_text(&result.to_string(), ui::StyleType::Value)
            );
            if let Some(as_of) = as_of {
                let note = format!("Rates as of {}", as_of.format("%Y-%m-%d %H:%M UTC"));
                println!("{}", ui::style_text(&note, ui::StyleType::Subtle));
            }
        }
        Outcome::Failed(e) => {
            warn!(error = %e, "Conversion failed");
            println!();
            eprintln!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        }
        Outcome::Cancelled => {
            eprintln!("{}", ui::style_text("Cancelled", ui::StyleType::Subtle));
        }
    }

    Ok(())
}

fn request_amount_text(amount: &str) -> String {
    crate::core::convert::parse_amount(amount)
        .map(format_amount)
        .unwrap_or_else(|_| amount.trim().to_string())
}

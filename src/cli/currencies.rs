use super::ui;
use crate::core::{
    CurrencyCatalog, ExchangeRateProvider, PreferenceStore, RateTable, Selection,
};
use anyhow::Result;
use comfy_table::{Cell, Color};
use tracing::debug;

/// Lists every known currency with its rate against USD.
pub async fn run(provider: &dyn ExchangeRateProvider, store: &dyn PreferenceStore) -> Result<()> {
    let selection = Selection::load(store)?;
    provider.is_online().await?;

    // Names and rates are independent requests
    let (catalog, rates) =
        futures::try_join!(provider.fetch_currencies(), provider.fetch_rates())?;
    debug!(currencies = catalog.entries().len(), rates = rates.len(), "Fetched listing");

    println!("{}", render_table(&catalog, &rates, &selection));
    if let Some(as_of) = rates.as_of() {
        let note = format!("Rates as of {}", as_of.format("%Y-%m-%d %H:%M UTC"));
        println!("{}", ui::style_text(&note, ui::StyleType::Subtle));
    }
    Ok(())
}

pub fn render_table(catalog: &CurrencyCatalog, rates: &RateTable, selection: &Selection) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Per USD"),
        ui::header_cell(""),
    ]);

    for (label, (code, _)) in catalog.labels().into_iter().zip(catalog.entries()) {
        let marker = if *code == selection.source {
            Cell::new("from").fg(Color::Yellow)
        } else if *code == selection.target {
            Cell::new("to").fg(Color::Yellow)
        } else {
            Cell::new("")
        };

        table.add_row(vec![
            Cell::new(label),
            ui::format_optional_cell(rates.rate(code).ok(), |r| format!("{r:.5}")),
            marker,
        ]);
    }

    table.to_string()
}

use super::ui;
use crate::core::{PreferenceStore, Selection};
use anyhow::Result;

/// Updates the stored pair and prints the resulting selection.
pub fn run(store: &dyn PreferenceStore, from: Option<String>, to: Option<String>) -> Result<()> {
    let selection = select(store, from, to)?;
    println!("{}", ui::pair_text(selection.source.as_str(), selection.target.as_str()));
    Ok(())
}

pub fn select(
    store: &dyn PreferenceStore,
    from: Option<String>,
    to: Option<String>,
) -> Result<Selection> {
    let mut selection = Selection::load(store)?;
    if let Some(code) = from {
        selection.set_source(store, code.as_str().into())?;
    }
    if let Some(code) = to {
        selection.set_target(store, code.as_str().into())?;
    }
    Ok(selection)
}

/// Swaps the stored pair.
pub fn invert(store: &dyn PreferenceStore) -> Result<()> {
    let mut selection = Selection::load(store)?;
    selection.invert(store)?;
    println!("{}", ui::pair_text(selection.source.as_str(), selection.target.as_str()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::{FOR_CURRENCY, HOM_CURRENCY};
    use crate::store::memory::MemoryPreferences;

    #[test]
    fn test_select_takes_code_from_label() -> Result<()> {
        let store = MemoryPreferences::new();
        let selection = select(&store, Some("eur | Euro".to_string()), None)?;

        assert_eq!(selection.source.as_str(), "EUR");
        assert_eq!(selection.target.as_str(), "CNY");
        assert_eq!(store.get_string(FOR_CURRENCY)?.as_deref(), Some("EUR"));
        Ok(())
    }

    #[test]
    fn test_invert_swaps_stored_pair() -> Result<()> {
        let store = MemoryPreferences::new();
        select(&store, Some("GBP".to_string()), Some("JPY".to_string()))?;

        invert(&store)?;

        assert_eq!(store.get_string(FOR_CURRENCY)?.as_deref(), Some("JPY"));
        assert_eq!(store.get_string(HOM_CURRENCY)?.as_deref(), Some("GBP"));
        Ok(())
    }
}

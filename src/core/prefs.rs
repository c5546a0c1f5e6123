//! Persisted currency selection

use anyhow::Result;
use tracing::debug;

use super::currency::CurrencyCode;

/// Key of the source ("foreign") currency preference.
pub const FOR_CURRENCY: &str = "FOR_CURRENCY";
/// Key of the target ("home") currency preference.
pub const HOM_CURRENCY: &str = "HOM_CURRENCY";

pub const DEFAULT_FOR: &str = "USD";
pub const DEFAULT_HOM: &str = "CNY";

/// String key-value preferences. Writes are durable once `set_string` returns.
pub trait PreferenceStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>>;
    fn set_string(&self, key: &str, value: &str) -> Result<()>;
}

/// The pair of currencies the user converts between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl Selection {
    /// Restores the last selection, seeding USD to CNY on first launch.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let source = store.get_string(FOR_CURRENCY)?;
        let target = store.get_string(HOM_CURRENCY)?;

        if source.is_none() && target.is_none() {
            debug!("No stored selection, using defaults");
            let selection = Selection {
                source: DEFAULT_FOR.into(),
                target: DEFAULT_HOM.into(),
            };
            selection.save(store)?;
            return Ok(selection);
        }

        Ok(Selection {
            source: source.as_deref().unwrap_or(DEFAULT_FOR).into(),
            target: target.as_deref().unwrap_or(DEFAULT_HOM).into(),
        })
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        store.set_string(FOR_CURRENCY, self.source.as_str())?;
        store.set_string(HOM_CURRENCY, self.target.as_str())
    }

    pub fn set_source(&mut self, store: &dyn PreferenceStore, code: CurrencyCode) -> Result<()> {
        store.set_string(FOR_CURRENCY, code.as_str())?;
        self.source = code;
        Ok(())
    }

    pub fn set_target(&mut self, store: &dyn PreferenceStore, code: CurrencyCode) -> Result<()> {
        store.set_string(HOM_CURRENCY, code.as_str())?;
        self.target = code;
        Ok(())
    }

    /// Swaps source and target and persists both.
    pub fn invert(&mut self, store: &dyn PreferenceStore) -> Result<()> {
        std::mem::swap(&mut self.source, &mut self.target);
        self.save(store)
    }
}

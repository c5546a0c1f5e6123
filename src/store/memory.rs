use crate::core::prefs::PreferenceStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory preferences, lost when the process exits
#[derive(Default)]
pub struct MemoryPreferences {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let prefs = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("Preference lock poisoned"))?;
        Ok(prefs.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut prefs = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("Preference lock poisoned"))?;
        debug!(key, value, "Preference PUT");
        prefs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

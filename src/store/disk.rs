use crate::core::prefs::PreferenceStore;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "preferences";

/// Preferences persisted in a fjall keyspace
pub struct DiskPreferences {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferences {
    pub fn open(db_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(db_path)
            .with_context(|| format!("Failed to create directory: {}", db_path.display()))?;

        let keyspace = Config::new(db_path.join("prefs"))
            .open()
            .with_context(|| format!("Failed to open preferences at {}", db_path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened preferences at {}", db_path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl PreferenceStore for DiskPreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key)? {
            Some(value) => {
                let value = String::from_utf8(value.to_vec())
                    .with_context(|| format!("Preference {key} is not valid UTF-8"))?;
                debug!(key, value, "Preference HIT");
                Ok(Some(value))
            }
            None => {
                debug!(key, "Preference MISS");
                Ok(None)
            }
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(key, value, "Preference PUT");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disk_get_set() -> Result<()> {
        let dir = tempdir()?;
        let prefs = DiskPreferences::open(dir.path())?;

        assert!(prefs.get_string("FOR_CURRENCY")?.is_none());

        prefs.set_string("FOR_CURRENCY", "EUR")?;
        assert_eq!(prefs.get_string("FOR_CURRENCY")?.as_deref(), Some("EUR"));
        Ok(())
    }

    #[test]
    fn test_disk_survives_reopen() -> Result<()> {
        let dir = tempdir()?;
        {
            let prefs = DiskPreferences::open(dir.path())?;
            prefs.set_string("HOM_CURRENCY", "JPY")?;
        }

        let prefs = DiskPreferences::open(dir.path())?;
        assert_eq!(prefs.get_string("HOM_CURRENCY")?.as_deref(), Some("JPY"));
        Ok(())
    }
}

pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::prefs::PreferenceStore;
use anyhow::Result;
use disk::DiskPreferences;
use memory::MemoryPreferences;

/// Opens the preference store for this run.
///
/// `ephemeral` keeps selections in memory only.
pub fn open_preferences(config: &AppConfig, ephemeral: bool) -> Result<Box<dyn PreferenceStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryPreferences::new()));
    }
    let path = config.data_path()?;
    Ok(Box::new(DiskPreferences::open(&path)?))
}

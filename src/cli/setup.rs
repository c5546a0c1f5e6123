use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const KEYS_TEMPLATE: &str = "# Get an app id from https://openexchangerates.org/signup\nopen_key=\n";

/// Creates the default configuration and key file at the default location
pub fn setup() -> Result<()> {
    let config_path = AppConfig::default_config_path()?;
    let key_path = AppConfig::default_key_path()?;
    setup_at_path(config_path, key_path)
}

/// Creates the configuration file and, if missing, a key file template
pub fn setup_at_path<P: AsRef<Path>, K: AsRef<Path>>(config_path: P, key_path: K) -> Result<()> {
    let path = config_path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    write_file(path, EXAMPLE_CONFIG)?;
    tracing::info!("Created default configuration at {}", path.display());

    let key_path = key_path.as_ref();
    if !key_path.exists() {
        write_file(key_path, KEYS_TEMPLATE)?;
        tracing::info!("Created key file template at {}", key_path.display());
    }

    println!("Configuration written to {}", path.display());
    println!("Add your app id to {}", key_path.display());
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file to {}", path.display()))
}

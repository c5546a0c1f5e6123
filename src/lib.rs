pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::keys::{KeyFile, OPEN_KEY};
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    Select {
        from: Option<String>,
        to: Option<String>,
    },
    Invert,
    Currencies,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    ephemeral: bool,
) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::open_preferences(&config, ephemeral)?;

    match command {
        AppCommand::Select { from, to } => cli::select::run(store.as_ref(), from, to),
        AppCommand::Invert => cli::select::invert(store.as_ref()),
        AppCommand::Convert { amount, from, to } => {
            let provider = create_provider(&config)?;
            cli::convert::run(&provider, store.as_ref(), &amount, from, to).await
        }
        AppCommand::Currencies => {
            let provider = create_provider(&config)?;
            cli::currencies::run(&provider, store.as_ref()).await
        }
    }
}

fn create_provider(config: &AppConfig) -> Result<providers::OpenExchangeRatesProvider> {
    let key_path = config.key_path()?;
    let keys = KeyFile::load(&key_path)
        .with_context(|| format!("Run `fxconv setup` and add {OPEN_KEY} to the key file"))?;
    let app_id = keys.require(OPEN_KEY)?;
    providers::OpenExchangeRatesProvider::new(config.base_url(), app_id)
}

pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{Amount, Currency, Exchange, RateFetcher, RateStore};
use crate::store::KeyValueStore;
use anyhow::Result;
use tracing::{debug, info};

/// Name of the collection holding the rate snapshot.
pub const RATES_COLLECTION: &str = "rates";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert { amount: Option<Amount> },
    Rates,
    Reverse { currency: Currency },
    Refresh { amount: Option<Amount> },
    Watch { amount: Option<Amount> },
}

/// Wires the persistent cache, the providers and the initial snapshot.
pub async fn build_exchange(config: &AppConfig, amount: Option<Amount>) -> Result<Exchange> {
    let data_path = config.default_data_path()?;
    let store = KeyValueStore::open(&data_path);
    debug!(
        path = %data_path.display(),
        persistent = store.is_persistent(),
        "Opened rate cache"
    );
    let collection = store.get_collection(RATES_COLLECTION, true);
    let rate_store = RateStore::new(collection, &config.cache.key, config.staleness());

    let providers = providers::build_providers(&config.providers, config.request_timeout())?;
    let fetcher = RateFetcher::new(providers);
    debug!(providers = fetcher.provider_count(), "Configured rate providers");

    Ok(Exchange::new(
        rate_store,
        fetcher,
        amount.unwrap_or(config.default_amount),
        config.auto_refresh,
    )
    .await)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("nprx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert { amount } => {
            let exchange = build_exchange(&config, amount).await?;
            cli::convert::run(&exchange);
        }
        AppCommand::Rates => {
            let exchange = build_exchange(&config, None).await?;
            cli::rates::run(&exchange);
        }
        AppCommand::Reverse { currency } => {
            let exchange = build_exchange(&config, None).await?;
            cli::convert::run_reverse(&exchange, currency);
        }
        AppCommand::Refresh { amount } => {
            let mut exchange = build_exchange(&config, amount).await?;
            cli::refresh::run(&mut exchange).await;
        }
        AppCommand::Watch { amount } => {
            let mut exchange = build_exchange(&config, amount).await?;
            cli::watch::run(&mut exchange, config.update_interval()).await?;
        }
    }
    Ok(())
}

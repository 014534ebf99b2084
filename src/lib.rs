pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{AssetClass, PortfolioStore, SnapshotStore};
use anyhow::Result;
use tracing::{debug, info};

/// Commands that operate on the saved portfolio.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Add {
        asset_class: AssetClass,
        symbol: String,
        quantity: f64,
    },
    Remove {
        asset_class: AssetClass,
        symbol: String,
    },
    List {
        asset_class: Option<AssetClass>,
    },
    Refresh,
    Summary,
}

impl AppCommand {
    fn mutates(&self) -> bool {
        matches!(
            self,
            AppCommand::Add { .. } | AppCommand::Remove { .. } | AppCommand::Refresh
        )
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("pfolio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let snapshots = store::DiskSnapshotStore::open(&config.default_data_path()?)?;
    let store = PortfolioStore::new(
        providers::default_sources(&config)?,
        config.refresh.options(),
    );

    execute(command, &store, &snapshots, &config.user).await
}

/// Runs one command against a store restored from `snapshots`, saving the
/// result back when the command changed anything.
pub async fn execute(
    command: AppCommand,
    store: &PortfolioStore,
    snapshots: &dyn SnapshotStore,
    user: &str,
) -> Result<()> {
    store.restore(snapshots.load(user).await?);
    let mutates = command.mutates();

    match command {
        AppCommand::Add {
            asset_class,
            symbol,
            quantity,
        } => cli::positions::add(store, asset_class, &symbol, quantity).await?,
        AppCommand::Remove {
            asset_class,
            symbol,
        } => cli::positions::remove(store, asset_class, &symbol),
        AppCommand::List { asset_class } => cli::positions::list(store, asset_class),
        AppCommand::Refresh => {
            cli::refresh::run(store).await;
        }
        AppCommand::Summary => cli::summary::print_summary(store),
    }

    if mutates {
        if store.is_empty() {
            snapshots.clear(user).await?;
        } else {
            snapshots.save(user, &store.positions()).await?;
        }
    }
    Ok(())
}

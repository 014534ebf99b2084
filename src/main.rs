use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use pfolio::cli::setup::setup_at_path;
use pfolio::core::AssetClass;
use pfolio::core::config::AppConfig;
use pfolio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    /// Indian stock, priced in INR
    Domestic,
    /// US stock, priced in USD
    Foreign,
    /// Cryptocurrency, priced in USD
    Crypto,
}

impl From<ClassArg> for AssetClass {
    fn from(arg: ClassArg) -> AssetClass {
        match arg {
            ClassArg::Domestic => AssetClass::DomesticEquity,
            ClassArg::Foreign => AssetClass::ForeignEquity,
            ClassArg::Crypto => AssetClass::Crypto,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Add a quantity of an asset at its current price
    Add {
        asset_class: ClassArg,
        symbol: String,
        quantity: f64,
    },
    /// Remove an asset from the portfolio
    Remove { asset_class: ClassArg, symbol: String },
    /// List positions
    List {
        /// Only show one asset class
        #[arg(long = "class")]
        asset_class: Option<ClassArg>,
    },
    /// Refresh all prices and show the summary
    Refresh,
    /// Display portfolio totals and allocation
    Summary,
}

impl From<Commands> for pfolio::AppCommand {
    fn from(cmd: Commands) -> pfolio::AppCommand {
        match cmd {
            Commands::Add {
                asset_class,
                symbol,
                quantity,
            } => pfolio::AppCommand::Add {
                asset_class: asset_class.into(),
                symbol,
                quantity,
            },
            Commands::Remove {
                asset_class,
                symbol,
            } => pfolio::AppCommand::Remove {
                asset_class: asset_class.into(),
                symbol,
            },
            Commands::List { asset_class } => pfolio::AppCommand::List {
                asset_class: asset_class.map(Into::into),
            },
            Commands::Refresh => pfolio::AppCommand::Refresh,
            Commands::Summary => pfolio::AppCommand::Summary,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => setup_at_path(path),
            None => AppConfig::default_config_path().and_then(setup_at_path),
        },
        Some(cmd) => pfolio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

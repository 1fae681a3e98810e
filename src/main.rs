use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use nprx::core::log::init_logging;
use nprx::core::{Amount, Currency};

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

impl From<Commands> for nprx::AppCommand {
    fn from(cmd: Commands) -> nprx::AppCommand {
        match cmd {
            Commands::Convert { amount } => nprx::AppCommand::Convert { amount },
            Commands::Rates => nprx::AppCommand::Rates,
            Commands::Reverse { currency } => nprx::AppCommand::Reverse { currency },
            Commands::Refresh { amount } => nprx::AppCommand::Refresh { amount },
            Commands::Watch { amount } => nprx::AppCommand::Watch { amount },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an NPR amount into every supported currency
    Convert {
        /// Amount in NPR, clamped to 100..=1,000,000
        amount: Option<Amount>,
    },
    /// Display simulated buy/sell rates
    Rates,
    /// Show how many NPR one unit of a currency buys
    Reverse {
        /// Currency code, e.g. USD
        currency: Currency,
    },
    /// Fetch the latest rates and display conversions
    Refresh {
        /// Amount in NPR, clamped to 100..=1,000,000
        amount: Option<Amount>,
    },
    /// Keep conversions on screen with periodic auto-refresh
    Watch {
        /// Amount in NPR, clamped to 100..=1,000,000
        amount: Option<Amount>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nprx::cli::setup::setup(),
        Some(cmd) => nprx::run_command(cmd.into(), cli.config_path.as_deref()).await,
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

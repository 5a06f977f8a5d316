use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Tapyrus node query tools
#[derive(Parser)]
#[command(name = "tapyrus-node-tools")]
#[command(about = "Tapyrus node query tools - balance lookup and mempool fee analysis")]
#[command(version)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up the on-chain balance of one or more addresses
    Balance(commands::balance::BalanceCommand),
    /// Chart the fee-rate composition of the node's mempool
    MempoolFees(commands::mempool::MempoolFeesCommand),
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v flags when both are set
    let default_level = match cli.verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Commands::Balance(command) => command.run(),
        Commands::MempoolFees(command) => command.run(),
    }
}

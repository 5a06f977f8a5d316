//! Address balance lookup command
//!
//! One synchronous Electrum round trip per address, sequentially. Each
//! address is independent: a failing lookup is reported for that item and
//! the run continues, exiting non-zero at the end if anything failed.

use clap::Args;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, NetworkKind};
use crate::crypto::{parse_address, script_hash_key};
use crate::electrum::{ElectrumClient, GetBalance};
use crate::errors::{AppError, AppResult};

/// Look up on-chain balances via the Electrum script-hash protocol
#[derive(Args)]
pub struct BalanceCommand {
    /// Use dev network parameters (testnet addresses, port 60001)
    #[arg(long)]
    pub dev: bool,

    /// Electrum server host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Electrum server port (default: 50001 for prod, 60001 for dev)
    #[arg(long)]
    pub port: Option<u16>,

    /// Addresses to look up
    #[arg(required = true)]
    pub addresses: Vec<String>,
}

impl BalanceCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = AppConfig::load().map_err(|e| AppError::Config(e.to_string()))?;
        let network = NetworkKind::from_dev_flag(self.dev);
        let host = self.host.clone().unwrap_or(config.electrum.host);
        let port = self.port.unwrap_or_else(|| network.electrum_port());

        info!("Connecting to Electrum server at {}:{}", host, port);
        let mut client = ElectrumClient::connect(
            &host,
            port,
            Duration::from_secs(config.electrum.timeout_seconds),
        )?;

        let stdout = std::io::stdout();
        let failed = query_balances(
            &mut client,
            network.address_network(),
            &self.addresses,
            &mut stdout.lock(),
        )?;

        if failed > 0 {
            return Err(AppError::LookupFailures {
                failed,
                total: self.addresses.len(),
            });
        }
        Ok(())
    }
}

/// Query every address in turn, writing one report line per success
///
/// Returns the number of failed items. Failures are reported on stderr as
/// they happen and never short-circuit the remaining addresses.
pub fn query_balances(
    client: &mut ElectrumClient,
    network: bitcoin::Network,
    addresses: &[String],
    out: &mut impl Write,
) -> AppResult<usize> {
    let mut failed = 0;
    for address in addresses {
        match query_one(client, network, address) {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(e) => {
                warn!("lookup failed for {}: {}", address, e);
                eprintln!("{}: {}", address, e);
                failed += 1;
            }
        }
    }
    Ok(failed)
}

fn query_one(
    client: &mut ElectrumClient,
    network: bitcoin::Network,
    address: &str,
) -> AppResult<String> {
    let script = parse_address(address, network)?;
    let key = script_hash_key(&script);
    debug!("{} -> script hash {}", address, key);
    let balance = client.script_hash_get_balance(&key)?;
    Ok(balance_line(address, &balance))
}

/// Render the per-address report line
pub fn balance_line(address: &str, balance: &GetBalance) -> String {
    format!("{} has {} tapyrus", address, balance.total())
}

//! Mempool fee analysis command
//!
//! Exactly two node round trips regardless of pool size: one
//! `getrawmempool` listing call and one batched `getmempoolentry` call.
//! The resulting distribution is rendered as a Plotly chart document by
//! default, or as a console/JSON report.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::analysis::{format_distribution, parse_format, FeeDistribution};
use crate::config::{default_cookie_dir, AppConfig, NetworkKind};
use crate::errors::{AppError, AppResult};
use crate::rpc::{CookieSource, NodeRpcClient};

/// Summarise the fee-rate composition of the node's mempool
#[derive(Args)]
pub struct MempoolFeesCommand {
    /// Use dev network parameters (port 18332, dev cookie namespace)
    #[arg(long)]
    pub dev: bool,

    /// Tapyrus network id, used to locate the authentication cookie
    #[arg(long)]
    pub networkid: Option<String>,

    /// Node RPC host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Node RPC port (default: 8332 for prod, 18332 for dev)
    #[arg(long)]
    pub port: Option<u16>,

    /// RPC authentication 'USER:PASSWORD' (default: read from the cookie file)
    #[arg(long)]
    pub cookie: Option<String>,

    /// Directory containing the node's .cookie file
    /// (default: ~/.tapyrus/prod-<networkid> or dev-<networkid>)
    #[arg(long)]
    pub cookie_dir: Option<PathBuf>,

    /// Output format (plotly, console or json)
    #[arg(long, default_value = "plotly")]
    pub format: String,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl MempoolFeesCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = AppConfig::load().map_err(|e| AppError::Config(e.to_string()))?;
        let network = NetworkKind::from_dev_flag(self.dev);
        let networkid = self
            .networkid
            .clone()
            .unwrap_or(config.node_rpc.networkid);
        let host = self.host.clone().unwrap_or(config.node_rpc.host);
        let port = self.port.unwrap_or_else(|| network.rpc_port());

        let cookie = match (&self.cookie, &self.cookie_dir) {
            (Some(value), _) => CookieSource::Static(value.clone()),
            (None, Some(dir)) => CookieSource::File(dir.clone()),
            (None, None) => CookieSource::File(default_cookie_dir(network, &networkid)?),
        };

        let client = NodeRpcClient::new(
            &host,
            port,
            cookie,
            Duration::from_secs(config.node_rpc.timeout_seconds),
        )?;

        info!("Fetching mempool transaction ids from {}:{}", host, port);
        let txids = client.raw_mempool()?;
        info!("Fetching {} mempool entries in one batch", txids.len());
        let entries = client.mempool_entries(&txids)?;

        let distribution = FeeDistribution::build(entries, config.units.per_coin);
        let output = format_distribution(&distribution, &parse_format(&self.format))?;

        match &self.output {
            Some(path) => write_output_to_file(path, &output)?,
            None => print!("{}", output),
        }
        Ok(())
    }
}

/// Write output to file with safe directory creation
fn write_output_to_file(path: &PathBuf, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("Report written to: {}", path.display());
    Ok(())
}

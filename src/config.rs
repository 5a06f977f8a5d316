use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

/// Application configuration loaded from config.toml or environment variables
///
/// CLI flags override these values; the loaded config only provides the
/// baseline for whatever the flags leave unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub electrum: ElectrumConfig,
    pub node_rpc: NodeRpcConfig,
    pub units: UnitsConfig,
}

/// Electrum server connection settings for the balance lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectrumConfig {
    pub host: String,
    pub timeout_seconds: u64,
}

impl Default for ElectrumConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Node JSON-RPC connection settings for the mempool analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRpcConfig {
    pub host: String,
    /// Tapyrus network id, used to locate the authentication cookie
    /// directory (`~/.tapyrus/prod-<networkid>` or `dev-<networkid>`)
    pub networkid: String,
    pub timeout_seconds: u64,
}

impl Default for NodeRpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            networkid: "1".to_string(),
            timeout_seconds: 60,
        }
    }
}

/// On-chain unit ratios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsConfig {
    /// Smallest on-chain units (tapyrus) per display unit (TPC).
    /// The node reports mempool fees in TPC; the analysis works in tapyrus.
    pub per_coin: f64,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self { per_coin: 1e8 }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables (TAPYRUS_* with `__` section separator) take
    /// precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let electrum = ElectrumConfig::default();
        let node_rpc = NodeRpcConfig::default();
        let units = UnitsConfig::default();
        let config = Config::builder()
            .set_default("electrum.host", electrum.host)?
            .set_default("electrum.timeout_seconds", electrum.timeout_seconds)?
            .set_default("node_rpc.host", node_rpc.host)?
            .set_default("node_rpc.networkid", node_rpc.networkid)?
            .set_default("node_rpc.timeout_seconds", node_rpc.timeout_seconds)?
            .set_default("units.per_coin", units.per_coin)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // TAPYRUS_ELECTRUM__HOST etc. override file values
            .add_source(
                Environment::with_prefix("TAPYRUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Network selector: production defaults versus the dev/test network
///
/// Each network carries its own default service ports, its own cookie
/// directory namespace and its own address encoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Prod,
    Dev,
}

impl NetworkKind {
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            NetworkKind::Dev
        } else {
            NetworkKind::Prod
        }
    }

    /// Default Electrum server port for this network
    pub fn electrum_port(self) -> u16 {
        match self {
            NetworkKind::Prod => 50001,
            NetworkKind::Dev => 60001,
        }
    }

    /// Default node JSON-RPC port for this network
    pub fn rpc_port(self) -> u16 {
        match self {
            NetworkKind::Prod => 8332,
            NetworkKind::Dev => 18332,
        }
    }

    /// Address encoding parameters for this network
    ///
    /// Tapyrus reuses the Bitcoin mainnet encoding on production and the
    /// testnet encoding on dev, so address parsing delegates to those.
    pub fn address_network(self) -> bitcoin::Network {
        match self {
            NetworkKind::Prod => bitcoin::Network::Bitcoin,
            NetworkKind::Dev => bitcoin::Network::Testnet,
        }
    }

    /// Cookie directory namespace for a given network id
    pub fn cookie_namespace(self, networkid: &str) -> String {
        match self {
            NetworkKind::Prod => format!("prod-{}", networkid),
            NetworkKind::Dev => format!("dev-{}", networkid),
        }
    }
}

/// Default cookie directory: `~/.tapyrus/<namespace>`
pub fn default_cookie_dir(network: NetworkKind, networkid: &str) -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("home directory not found".to_string()))?;
    Ok(home
        .join(".tapyrus")
        .join(network.cookie_namespace(networkid)))
}

use std::fs;
use std::time::Duration;

use alloy_primitives::Address;
use launchpad_types::{
    LaunchpadError, LaunchpadResult, BASE_SEPOLIA_CHAIN_ID, BASE_SEPOLIA_RPC_URL, CORE_CHAIN_ID,
    CORE_EXPLORER_URL, CORE_NATIVE_SYMBOL, CORE_RPC_URL, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
    DEFAULT_FACTORY_ADDRESS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_RECEIPT_POLL_MS, DEFAULT_SCAN_LIMIT,
};
use serde::{Deserialize, Serialize};

/// Client configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchpadConfig {
    /// Chain and endpoint settings
    pub network: NetworkConfig,

    /// Deployed contract addresses
    pub contracts: ContractsConfig,

    /// Account transactions are sent from
    #[serde(default)]
    pub account: AccountConfig,

    /// Token discovery and watcher settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Confirmation settings
    #[serde(default)]
    pub transactions: TransactionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chain and endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Display name of the chain
    pub name: String,

    /// Expected `eth_chainId`
    pub chain_id: u64,

    /// JSON-RPC endpoint URL
    pub rpc_url: String,

    /// Block explorer base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,

    /// Ticker of the native currency
    pub native_symbol: String,

    /// HTTP read timeout in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractsConfig {
    /// Launchpad factory address
    pub factory: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountConfig {
    /// Sender for `eth_sendTransaction`; the node must hold its key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Maximum number of factory indices to scan
    pub scan_limit: u64,

    /// Read `getSubTokensCount` before scanning
    pub use_count: bool,

    /// Seconds between watcher polls
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionConfig {
    /// Give up waiting for a receipt after this many seconds
    pub confirmation_timeout_secs: u64,

    /// Delay between receipt polls in milliseconds
    pub receipt_poll_ms: u64,

    /// Explicit gas limit; the node estimates when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl LaunchpadConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> LaunchpadResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LaunchpadError::generic(&format!("Failed to read config file {}: {}", path, e)))?;

        let config: LaunchpadConfig = toml::from_str(&content).map_err(|e| {
            LaunchpadError::invalid_configuration("file", &format!("Failed to parse config file {}: {}", path, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> LaunchpadResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            LaunchpadError::invalid_configuration("file", &format!("Failed to serialize config: {}", e))
        })?;
        fs::write(path, content)
            .map_err(|e| LaunchpadError::generic(&format!("Failed to write config file {}: {}", path, e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> LaunchpadResult<()> {
        self.network.validate()?;

        if self.contracts.factory == Address::ZERO {
            return Err(LaunchpadError::invalid_parameter("factory", "0x0", "a deployed factory address"));
        }

        self.discovery.validate()?;
        self.transactions.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.transactions.confirmation_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.transactions.receipt_poll_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.discovery.poll_interval_secs)
    }

    /// Explorer link for a transaction hash, when an explorer is configured
    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.network
            .explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}

impl NetworkConfig {
    /// Core mainnet, where the launchpad factory is deployed
    pub fn core_mainnet() -> Self {
        Self {
            name: "Core Blockchain Mainnet".to_string(),
            chain_id: CORE_CHAIN_ID,
            rpc_url: CORE_RPC_URL.to_string(),
            explorer_url: Some(CORE_EXPLORER_URL.to_string()),
            native_symbol: CORE_NATIVE_SYMBOL.to_string(),
            request_timeout_secs: 30,
        }
    }

    pub fn base_sepolia() -> Self {
        Self {
            name: "Base Sepolia".to_string(),
            chain_id: BASE_SEPOLIA_CHAIN_ID,
            rpc_url: BASE_SEPOLIA_RPC_URL.to_string(),
            explorer_url: Some("https://sepolia.basescan.org".to_string()),
            native_symbol: "ETH".to_string(),
            request_timeout_secs: 30,
        }
    }

    /// Local development node
    pub fn local() -> Self {
        Self {
            name: "Local".to_string(),
            chain_id: 31_337,
            rpc_url: "http://localhost:8545".to_string(),
            explorer_url: None,
            native_symbol: "ETH".to_string(),
            request_timeout_secs: 30,
        }
    }

    fn validate(&self) -> LaunchpadResult<()> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(LaunchpadError::invalid_parameter("rpc_url", &self.rpc_url, "an http(s) URL"));
        }

        if self.chain_id == 0 {
            return Err(LaunchpadError::invalid_parameter("chain_id", "0", "greater than 0"));
        }

        if self.native_symbol.is_empty() {
            return Err(LaunchpadError::invalid_parameter("native_symbol", "empty", "non-empty string"));
        }

        if self.request_timeout_secs == 0 {
            return Err(LaunchpadError::invalid_parameter("request_timeout_secs", "0", "greater than 0"));
        }

        Ok(())
    }
}

impl DiscoveryConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        if self.scan_limit == 0 {
            return Err(LaunchpadError::invalid_parameter("scan_limit", "0", "greater than 0"));
        }

        if self.poll_interval_secs == 0 {
            return Err(LaunchpadError::invalid_parameter("poll_interval_secs", "0", "greater than 0"));
        }

        Ok(())
    }
}

impl TransactionConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        if self.receipt_poll_ms == 0 {
            return Err(LaunchpadError::invalid_parameter("receipt_poll_ms", "0", "greater than 0"));
        }

        if self.confirmation_timeout_secs.saturating_mul(1_000) < self.receipt_poll_ms {
            return Err(LaunchpadError::invalid_parameter(
                "confirmation_timeout_secs",
                &self.confirmation_timeout_secs.to_string(),
                &format!("at least one receipt poll ({} ms)", self.receipt_poll_ms),
            ));
        }

        if self.gas_limit == Some(0) {
            return Err(LaunchpadError::invalid_parameter("gas_limit", "0", "greater than 0 or unset"));
        }

        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        match self.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(LaunchpadError::invalid_parameter(
                "level",
                &self.level,
                "one of trace, debug, info, warn, error",
            )),
        }
    }
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::core_mainnet(),
            contracts: ContractsConfig::default(),
            account: AccountConfig::default(),
            discovery: DiscoveryConfig::default(),
            transactions: TransactionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            factory: DEFAULT_FACTORY_ADDRESS,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scan_limit: DEFAULT_SCAN_LIMIT,
            use_count: false,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
            gas_limit: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> LaunchpadResult<()> {
    let example_config = LaunchpadConfig {
        network: NetworkConfig::core_mainnet(),
        contracts: ContractsConfig::default(),
        account: AccountConfig {
            from: Some(Address::repeat_byte(0x11)),
        },
        discovery: DiscoveryConfig {
            scan_limit: 50,
            use_count: true,
            poll_interval_secs: 15,
        },
        transactions: TransactionConfig::default(),
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    };

    example_config.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        let config = LaunchpadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network.chain_id, 1116);
        assert_eq!(config.discovery.scan_limit, 15);
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_config_validation() {
        let mut config = LaunchpadConfig::default();
        config.discovery.scan_limit = 0;
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::default();
        config.network.rpc_url = "ws://localhost:8546".to_string();
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::default();
        config.contracts.factory = Address::ZERO;
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = LaunchpadConfig::default();
        config.transactions.confirmation_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_confirmation_timeout_is_accepted() {
        let mut config = LaunchpadConfig::default();
        config.transactions.confirmation_timeout_secs = u64::MAX;
        config.transactions.receipt_poll_ms = u64::MAX;
        assert!(config.validate().is_ok());
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_example_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launchpad.toml");
        let path = path.to_str().unwrap();

        create_example_config(path).unwrap();
        let loaded = LaunchpadConfig::load(path).unwrap();
        assert_eq!(loaded.account.from, Some(Address::repeat_byte(0x11)));
        assert!(loaded.discovery.use_count);
        assert_eq!(loaded.contracts.factory, DEFAULT_FACTORY_ADDRESS);
    }

    #[test]
    fn test_sections_default_when_missing() {
        let raw = r#"
            [network]
            name = "Local"
            chain_id = 31337
            rpc_url = "http://localhost:8545"
            native_symbol = "ETH"
            request_timeout_secs = 10

            [contracts]
            factory = "0x80a4A65e0cd7ddcD9E6ad257F0bF7D7CcE66881e"
        "#;
        let config: LaunchpadConfig = toml::from_str(raw).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.account.from, None);
        assert_eq!(config.transactions.receipt_poll_ms, 1_000);
    }

    #[test]
    fn test_explorer_links() {
        let config = LaunchpadConfig::default();
        assert_eq!(
            config.explorer_tx_url("0xabc").as_deref(),
            Some("https://scan.coredao.org/tx/0xabc")
        );

        let mut config = LaunchpadConfig::default();
        config.network = NetworkConfig::local();
        assert!(config.explorer_tx_url("0xabc").is_none());
    }
}

// Utility functions for CLI commands

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use launchpad_math::{format_units_fixed, parse_units};
use launchpad_sdk::{Address, ChainRpc, LaunchpadClient, LaunchpadConfig, U256};
use launchpad_simulation::{SimulationConfig, TestEnvironment};
use launchpad_types::ETHER_DECIMALS;

/// Values given on the command line that win over the configuration file
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub factory: Option<String>,
    pub from: Option<String>,
    pub log_level: Option<String>,
}

/// Load the configuration file, falling back to defaults, then apply overrides
pub fn load_config(path: &str, overrides: &Overrides) -> Result<LaunchpadConfig> {
    let mut config = if Path::new(path).exists() {
        LaunchpadConfig::load(path).with_context(|| format!("Failed to load config {}", path))?
    } else {
        LaunchpadConfig::default()
    };

    if let Some(rpc_url) = &overrides.rpc_url {
        config.network.rpc_url = rpc_url.clone();
    }
    if let Some(factory) = &overrides.factory {
        config.contracts.factory = parse_address(factory)?;
    }
    if let Some(from) = &overrides.from {
        config.account.from = Some(parse_address(from)?);
    }
    if let Some(level) = &overrides.log_level {
        config.logging.level = level.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Everything a command needs
pub struct Context {
    pub client: LaunchpadClient,
    pub config: LaunchpadConfig,
}

impl Context {
    pub async fn connect(mut config: LaunchpadConfig, simulate: bool) -> Result<Self> {
        if !simulate {
            let client = LaunchpadClient::from_config(&config);
            if !client.check_chain().await.context("Failed to reach RPC endpoint")? {
                warn(&format!(
                    "Node chain id differs from configured {} ({})",
                    config.network.name, config.network.chain_id
                ));
            }
            return Ok(Self { client, config });
        }

        let env = TestEnvironment::with_config(SimulationConfig {
            chain_id: config.network.chain_id,
            factory: config.contracts.factory,
            ..SimulationConfig::default()
        })?;
        let tokens = env.seed_demo_tokens().await?;
        info(&format!("Simulated chain seeded with {} demo tokens", tokens.len()));
        info(&format!("Funded accounts: alice {}, bob {}", env.alice, env.bob));

        if config.account.from.is_none() {
            config.account.from = Some(env.alice);
        }

        let rpc: Arc<dyn ChainRpc> = env.chain.clone();
        let client = LaunchpadClient::with_rpc(rpc, &config);
        Ok(Self { client, config })
    }

    /// Configured sender, required by commands that send transactions
    pub fn sender(&self) -> Result<Address> {
        self.client
            .sender()
            .context("No sender account: pass --from or set account.from")
    }

    pub fn native_symbol(&self) -> &str {
        &self.config.network.native_symbol
    }
}

/// Parse a hex address
pub fn parse_address(s: &str) -> Result<Address> {
    Address::from_str(s.trim()).with_context(|| format!("Invalid address: {}", s))
}

/// Parse a decimal amount with 18 decimals (native currency and tokens alike)
pub fn parse_amount(s: &str) -> Result<U256> {
    parse_units(s, ETHER_DECIMALS).with_context(|| format!("Invalid amount: {}", s))
}

/// Format an 18-decimals amount for display
pub fn format_amount(value: U256) -> String {
    format_units_fixed(value, ETHER_DECIMALS, 4)
}

/// Print success message
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    eprintln!("[WARN] {}", msg);
}

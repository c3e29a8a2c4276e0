/// Protocol constants used across the launchpad client

use alloy_primitives::{address, Address, U256};

// ============================================================================
// Unit Constants
// ============================================================================

/// Decimals of the native currency and of every launched token
pub const ETHER_DECIMALS: u8 = 18;

/// 10^18, one whole ether (or one whole token) in base units
pub const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// ============================================================================
// Fee and Curve Constants
// ============================================================================

/// Trading fee charged by the token contracts (0.5%)
pub const TRADE_FEE_BPS: u64 = 50;

/// Progress value at which a token graduates
pub const MAX_PROGRESS: u8 = 100;

/// Share of supply paired with collected ETH at graduation (20.69%)
pub const GRADUATION_LIQUIDITY_BPS: u64 = 2_069;

// ============================================================================
// Discovery Constants
// ============================================================================

/// Number of factory indices probed by a default discovery scan
pub const DEFAULT_SCAN_LIMIT: u64 = 15;

/// Default discovery poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

// ============================================================================
// Transaction Constants
// ============================================================================

/// Default time to wait for a transaction receipt
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// Default delay between receipt polls
pub const DEFAULT_RECEIPT_POLL_MS: u64 = 1_000;

/// Error messages shown to a user are cut to this many characters
pub const ERROR_MESSAGE_LIMIT: usize = 100;

// ============================================================================
// Network Defaults
// ============================================================================

/// Deployed launchpad factory
pub const DEFAULT_FACTORY_ADDRESS: Address = address!("80a4A65e0cd7ddcD9E6ad257F0bF7D7CcE66881e");

/// Core mainnet chain id
pub const CORE_CHAIN_ID: u64 = 1116;

/// Core mainnet public RPC endpoint
pub const CORE_RPC_URL: &str = "https://rpc.coredao.org";

/// Core mainnet block explorer
pub const CORE_EXPLORER_URL: &str = "https://scan.coredao.org";

/// Native currency symbol on Core
pub const CORE_NATIVE_SYMBOL: &str = "CORE";

/// Base Sepolia chain id
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84_532;

/// Base Sepolia public RPC endpoint
pub const BASE_SEPOLIA_RPC_URL: &str = "https://sepolia.base.org";

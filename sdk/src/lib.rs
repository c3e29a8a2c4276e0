/// Bonding-curve launchpad SDK
///
/// A client for the launchpad factory and its per-token bonding curves.
/// Provides high-level abstractions for:
/// - Token launches
/// - Token discovery and watching
/// - Quotes, buys and sells
/// - Trade and launch history
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod rpc;
pub mod types;

pub use client::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use rpc::HttpRpc;
pub use types::*;

// Re-export the shared types callers need alongside the client
pub use launchpad_types::{
    Address, ChainRpc, Launch, LaunchpadError, Progress, TokenInfo, Trade, TradeQuote, TradeSide, U256,
};

/// Shared types for the bonding-curve launchpad client
///
/// This crate provides the contract ABI bindings, JSON-RPC wire types,
/// constants and errors used by the math, simulation and SDK crates.

pub mod constants;
pub mod errors;
pub mod interfaces;
pub mod rpc;
pub mod token;
pub mod trade;

// Re-export all public types
pub use constants::*;
pub use errors::*;
pub use interfaces::*;
pub use rpc::*;
pub use token::*;
pub use trade::*;

pub use alloy_primitives::{Address, Bytes, B256, U256};

/// Mathematical utilities for the launchpad client
///
/// This crate provides checked U256 arithmetic, ether unit conversion,
/// fee estimation and the reference virtual-reserve bonding curve used by
/// the simulation and the SDK.

pub mod curve;
pub mod fees;
pub mod safe;
pub mod units;

// Re-export commonly used functions
pub use curve::*;
pub use fees::*;
pub use safe::*;
pub use units::*;

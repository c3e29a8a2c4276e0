// Command modules for launchpad CLI

pub mod config;
pub mod history;
pub mod market;
pub mod trade;
pub mod utils;
pub mod watch;

// Factory watcher

use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use launchpad_sdk::{TokenWatcher, WatchEvent};

use super::utils::{info, success, Context};

#[derive(Args)]
pub struct WatchCmd {
    /// Seconds between polls
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Maximum number of factory indices to scan
    #[arg(long)]
    limit: Option<u64>,
}

pub async fn execute(cmd: WatchCmd, ctx: &Context) -> Result<()> {
    let interval = cmd
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.config.poll_interval());
    let limit = cmd.limit.unwrap_or(ctx.config.discovery.scan_limit);

    let watcher = TokenWatcher::new(ctx.client.discovery(), limit, interval)
        .context("Invalid watch settings")?
        .counted(ctx.config.discovery.use_count);

    info("Watching for launches, progress and graduations (Ctrl+C to stop)...");
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    watcher
        .run(
            |event| match event {
                WatchEvent::NewToken(token) => info(&format!(
                    "New token {} ({}) at {}, progress {}",
                    token.name, token.symbol, token.address, token.progress
                )),
                WatchEvent::ProgressChanged { symbol, from, to, .. } => {
                    info(&format!("{} progress {} -> {}", symbol, from, to))
                }
                WatchEvent::Graduated { token, symbol } => {
                    success(&format!("{} ({}) graduated", symbol, token))
                }
            },
            shutdown,
        )
        .await;

    Ok(())
}

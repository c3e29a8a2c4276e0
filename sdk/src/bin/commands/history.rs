// Trade and launch history

use anyhow::{Context as _, Result};
use clap::Args;

use super::utils::{format_amount, info, parse_address, Context};

#[derive(Args)]
pub struct TradesCmd {
    /// Token address
    token: String,

    /// Only trades by this account
    #[arg(long)]
    trader: Option<String>,
}

#[derive(Args)]
pub struct LaunchesCmd {
    /// Only launches by this creator
    #[arg(long)]
    creator: Option<String>,
}

pub async fn trades(cmd: TradesCmd, ctx: &Context) -> Result<()> {
    let token = parse_address(&cmd.token)?;
    let trades = match &cmd.trader {
        Some(trader) => ctx.client.history.trades_by(token, parse_address(trader)?).await,
        None => ctx.client.history.trades(token).await,
    }
    .context("Failed to load trade history")?;

    if trades.is_empty() {
        info("No trades yet.");
        return Ok(());
    }

    for trade in &trades {
        println!(
            "{:<4} {:>20} tokens {:>14} {}  {}  block {}  ts {}",
            trade.side,
            format_amount(trade.token_amount()),
            format_amount(trade.eth_amount()),
            ctx.native_symbol(),
            trade.trader,
            trade.block_number.map(|b| b.to_string()).unwrap_or_else(|| "-".into()),
            trade.timestamp.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
        );
    }
    info(&format!("{} trades", trades.len()));
    Ok(())
}

pub async fn launches(cmd: LaunchesCmd, ctx: &Context) -> Result<()> {
    let creator = cmd.creator.as_deref().map(parse_address).transpose()?;
    let launches = ctx
        .client
        .history
        .launches(creator)
        .await
        .context("Failed to load launch history")?;

    for launch in &launches {
        println!(
            "{}  by {}  block {}",
            launch.token,
            launch.creator,
            launch.block_number.map(|b| b.to_string()).unwrap_or_else(|| "-".into()),
        );
    }
    info(&format!("{} launches", launches.len()));
    Ok(())
}

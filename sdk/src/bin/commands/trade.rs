// Launch, buy and sell commands

use anyhow::{anyhow, Result};
use clap::Args;
use launchpad_sdk::{SdkError, Trade, TxOutcome};

use super::utils::{format_amount, info, parse_address, parse_amount, success, Context};

#[derive(Args)]
pub struct LaunchCmd {
    /// Token name
    name: String,

    /// Token symbol (upper-cased)
    symbol: String,
}

#[derive(Args)]
pub struct BuyCmd {
    /// Token address
    token: String,

    /// Native amount to spend, e.g. 0.5
    amount: String,
}

#[derive(Args)]
pub struct SellCmd {
    /// Token address
    token: String,

    /// Token amount to sell, e.g. 1000
    amount: String,
}

/// Surface SDK failures with their one-line message
fn failed(action: &str, err: SdkError) -> anyhow::Error {
    anyhow!("{} failed: {}", action, err.short_message())
}

fn print_outcome(outcome: &TxOutcome, ctx: &Context) {
    info(&format!("Transaction: {}", outcome.tx_hash));
    if let Some(block) = outcome.block_number {
        info(&format!("Block: {}", block));
    }
    if let Some(url) = ctx.config.explorer_tx_url(&outcome.tx_hash.to_string()) {
        info(&format!("Explorer: {}", url));
    }
}

fn print_trade(trade: &Trade, ctx: &Context) {
    success(&format!(
        "{} {} tokens for {} {} (fee {} {})",
        trade.side,
        format_amount(trade.token_amount()),
        format_amount(trade.eth_amount()),
        ctx.native_symbol(),
        format_amount(trade.fee_amount),
        ctx.native_symbol(),
    ));
}

pub async fn launch(cmd: LaunchCmd, ctx: &Context) -> Result<()> {
    info(&format!("Launching {} ({})...", cmd.name, cmd.symbol));

    let result = ctx
        .client
        .factory
        .launch_token(&cmd.name, &cmd.symbol)
        .await
        .map_err(|e| failed("Launch", e))?;

    success(&format!("Token launched! Address: {}", result.token));
    print_outcome(&result.outcome, ctx);
    Ok(())
}

pub async fn buy(cmd: BuyCmd, ctx: &Context) -> Result<()> {
    let token = parse_address(&cmd.token)?;
    let amount = parse_amount(&cmd.amount)?;
    info(&format!("Buying {} with {} {}...", token, format_amount(amount), ctx.native_symbol()));

    let result = ctx
        .client
        .trade
        .buy(token, amount)
        .await
        .map_err(|e| failed("Buy", e))?;

    print_trade(&result.trade, ctx);
    print_outcome(&result.outcome, ctx);
    Ok(())
}

pub async fn sell(cmd: SellCmd, ctx: &Context) -> Result<()> {
    let token = parse_address(&cmd.token)?;
    let amount = parse_amount(&cmd.amount)?;
    info(&format!("Selling {} of {}...", format_amount(amount), token));

    let result = ctx
        .client
        .trade
        .sell(token, amount)
        .await
        .map_err(|e| failed("Sell", e))?;

    print_trade(&result.trade, ctx);
    print_outcome(&result.outcome, ctx);
    Ok(())
}

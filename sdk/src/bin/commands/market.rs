// Token browsing, quotes and balances

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use launchpad_sdk::TokenInfo;

use super::utils::{format_amount, info, parse_address, parse_amount, success, Context};

#[derive(Args)]
pub struct TokensCmd {
    /// Maximum number of factory indices to scan
    #[arg(long)]
    limit: Option<u64>,

    /// Bound the scan by the factory's reported token count
    #[arg(long)]
    counted: bool,
}

#[derive(Args)]
pub struct InfoCmd {
    /// Token address
    token: String,
}

#[derive(Subcommand)]
pub enum QuoteCmd {
    /// Tokens received for an amount of native currency
    Buy {
        /// Token address
        token: String,
        /// Native amount, e.g. 0.5
        amount: String,
    },

    /// Native currency received for an amount of tokens
    Sell {
        /// Token address
        token: String,
        /// Token amount, e.g. 1000
        amount: String,
    },
}

#[derive(Args)]
pub struct BalanceCmd {
    /// Token to report; native balance when omitted
    #[arg(long)]
    token: Option<String>,

    /// Account to report; the configured sender when omitted
    #[arg(long)]
    account: Option<String>,
}

pub async fn tokens(cmd: TokensCmd, ctx: &Context) -> Result<()> {
    let limit = cmd.limit.unwrap_or(ctx.config.discovery.scan_limit);
    let counted = cmd.counted || ctx.config.discovery.use_count;
    info(&format!("Scanning up to {} tokens...", limit));

    let discovery = ctx.client.discovery();
    let tokens = if counted {
        discovery
            .scan_counted(limit)
            .await
            .context("Failed to read token count")?
    } else {
        discovery.scan(limit).await
    };

    if tokens.is_empty() {
        info("No tokens launched yet on this factory.");
        return Ok(());
    }

    for token in &tokens {
        println!(
            "{}  {:<10} {:<28} {:>4}  {} {}{}",
            token.address,
            token.symbol,
            token.name,
            token.progress,
            format_amount(token.price),
            ctx.native_symbol(),
            if token.graduated { "  [graduated]" } else { "" },
        );
    }
    success(&format!("{} tokens", tokens.len()));
    Ok(())
}

pub async fn token_info(cmd: InfoCmd, ctx: &Context) -> Result<()> {
    let token = parse_address(&cmd.token)?;
    let snapshot = ctx
        .client
        .tokens
        .info(token)
        .await
        .with_context(|| format!("Failed to read token {}", token))?;

    print_token(&snapshot, ctx.native_symbol());
    Ok(())
}

fn print_token(token: &TokenInfo, native: &str) {
    println!("Token:          {} ({})", token.name, token.symbol);
    println!("Address:        {}", token.address);
    println!("Price:          {} {}", format_amount(token.price), native);
    println!("Total minted:   {}", format_amount(token.total_minted));
    println!("Progress:       {}", token.progress);
    println!("Graduated:      {}", token.graduated);
    println!("Virtual {:<6} {}", format!("{}:", native), format_amount(token.virtual_eth));
    println!("Virtual tokens: {}", format_amount(token.virtual_tokens));
}

pub async fn quote(cmd: QuoteCmd, ctx: &Context) -> Result<()> {
    match cmd {
        QuoteCmd::Buy { token, amount } => {
            let token = parse_address(&token)?;
            let amount = parse_amount(&amount)?;
            let quote = ctx
                .client
                .tokens
                .quote_buy(token, amount)
                .await
                .context("Failed to quote buy")?;

            info(&format!(
                "Pay {} {} -> receive ~{} tokens",
                format_amount(quote.input),
                ctx.native_symbol(),
                format_amount(quote.estimated_output)
            ));
            if let Some(fee) = quote.estimated_fee {
                info(&format!("Estimated fee: {} {}", format_amount(fee), ctx.native_symbol()));
            }
        }

        QuoteCmd::Sell { token, amount } => {
            let token = parse_address(&token)?;
            let amount = parse_amount(&amount)?;
            let quote = ctx
                .client
                .tokens
                .quote_sell(token, amount)
                .await
                .context("Failed to quote sell")?;

            info(&format!(
                "Sell {} tokens -> receive ~{} {}",
                format_amount(quote.input),
                format_amount(quote.estimated_output),
                ctx.native_symbol()
            ));
        }
    }

    Ok(())
}

pub async fn balance(cmd: BalanceCmd, ctx: &Context) -> Result<()> {
    let account = match &cmd.account {
        Some(account) => parse_address(account)?,
        None => ctx.sender()?,
    };

    match &cmd.token {
        Some(token) => {
            let token = parse_address(token)?;
            let held = ctx.client.tokens.balance_of(token, account).await?;
            info(&format!("{} holds {} of {}", account, format_amount(held), token));
        }
        None => {
            let held = ctx.client.tokens.native_balance(account).await?;
            info(&format!("{} holds {} {}", account, format_amount(held), ctx.native_symbol()));
        }
    }

    Ok(())
}

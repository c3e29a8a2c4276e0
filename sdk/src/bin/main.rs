// CLI tool for the bonding-curve launchpad
//
// This binary browses launched tokens, quotes and executes trades, launches
// new tokens and follows factory activity, against a node or an in-memory
// chain.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Bonding-curve launchpad CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "launchpad.toml")]
    config: String,

    /// RPC URL to connect to (overrides the configuration file)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Factory contract address
    #[arg(long)]
    factory: Option<String>,

    /// Account to send transactions from
    #[arg(long)]
    from: Option<String>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Run against an in-memory chain seeded with demo tokens
    #[arg(long)]
    simulate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List launched tokens
    Tokens(commands::market::TokensCmd),

    /// Show one token's on-chain state
    Info(commands::market::InfoCmd),

    /// Estimate a buy or sell
    #[command(subcommand)]
    Quote(commands::market::QuoteCmd),

    /// Native or token balance
    Balance(commands::market::BalanceCmd),

    /// Launch a new token through the factory
    Launch(commands::trade::LaunchCmd),

    /// Buy a token with native currency
    Buy(commands::trade::BuyCmd),

    /// Sell a token for native currency
    Sell(commands::trade::SellCmd),

    /// Trade history of a token
    Trades(commands::history::TradesCmd),

    /// Factory launch history
    Launches(commands::history::LaunchesCmd),

    /// Follow new tokens, progress and graduations
    Watch(commands::watch::WatchCmd),

    /// Write an example configuration file
    InitConfig(commands::config::InitConfigCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Writing the example config needs no client
    if let Commands::InitConfig(cmd) = &cli.command {
        return commands::config::execute(cmd);
    }

    let overrides = commands::utils::Overrides {
        rpc_url: cli.rpc_url,
        factory: cli.factory,
        from: cli.from,
        log_level: cli.log_level,
    };
    let config = commands::utils::load_config(&cli.config, &overrides)?;

    init_logging(&config.logging.level);

    let ctx = commands::utils::Context::connect(config, cli.simulate).await?;

    // Execute command
    match cli.command {
        Commands::Tokens(cmd) => commands::market::tokens(cmd, &ctx).await,
        Commands::Info(cmd) => commands::market::token_info(cmd, &ctx).await,
        Commands::Quote(cmd) => commands::market::quote(cmd, &ctx).await,
        Commands::Balance(cmd) => commands::market::balance(cmd, &ctx).await,
        Commands::Launch(cmd) => commands::trade::launch(cmd, &ctx).await,
        Commands::Buy(cmd) => commands::trade::buy(cmd, &ctx).await,
        Commands::Sell(cmd) => commands::trade::sell(cmd, &ctx).await,
        Commands::Trades(cmd) => commands::history::trades(cmd, &ctx).await,
        Commands::Launches(cmd) => commands::history::launches(cmd, &ctx).await,
        Commands::Watch(cmd) => commands::watch::execute(cmd, &ctx).await,
        Commands::InitConfig(_) => Ok(()),
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "launchpad={level},launchpad_sdk={level},launchpad_simulation={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

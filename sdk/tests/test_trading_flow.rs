//! Launch, quote, trade and history against the simulated chain

use std::sync::Arc;

use launchpad_math::{parse_ether, trade_fee};
use launchpad_types::{IBondingToken, ERROR_MESSAGE_LIMIT};
use launchpad_sdk::{
    Address, ChainRpc, LaunchpadClient, LaunchpadConfig, SdkError, TradeSide, U256,
};
use launchpad_simulation::TestEnvironment;

fn client_for(env: &TestEnvironment, from: Option<Address>) -> LaunchpadClient {
    let mut config = LaunchpadConfig::default();
    config.contracts.factory = env.factory();
    config.account.from = from;
    config.transactions.receipt_poll_ms = 10;
    config.transactions.confirmation_timeout_secs = 1;

    let rpc: Arc<dyn ChainRpc> = env.chain.clone();
    LaunchpadClient::with_rpc(rpc, &config)
}

#[tokio::test]
async fn test_zero_buy_never_reaches_chain() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let client = client_for(&env, Some(env.alice));
    let sent = env.chain.transaction_count().unwrap();

    let err = client.trade.buy(token, U256::ZERO).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidParameters(_)));

    let err = client.trade.sell(token, U256::ZERO).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidParameters(_)));

    assert_eq!(env.chain.transaction_count().unwrap(), sent);
}

#[tokio::test]
async fn test_launch_then_discover() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, Some(env.alice));

    let launched = client.factory.launch_token("  Core Doge ", "cdoge").await.unwrap();
    assert!(launched.outcome.block_number.is_some());

    let tokens = client.discovery().scan(15).await;
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].address, launched.token);
    assert_eq!(tokens[0].name, "Core Doge");
    assert_eq!(tokens[0].symbol, "CDOGE");
    assert_eq!(tokens[0].progress.percent(), 0);
    assert!(tokens[0].is_tradable());
}

#[tokio::test]
async fn test_empty_launch_input_rejected() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, Some(env.alice));

    let err = client.factory.launch_token("Core Doge", "   ").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidParameters(_)));
    assert_eq!(env.chain.transaction_count().unwrap(), 0);
}

#[tokio::test]
async fn test_buy_raises_progress_and_price() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let client = client_for(&env, Some(env.alice));

    let before = client.tokens.info(token).await.unwrap();
    let eth_in = parse_ether("1").unwrap();
    let quote = client.tokens.quote_buy(token, eth_in).await.unwrap();
    assert_eq!(quote.estimated_fee, Some(trade_fee(eth_in).unwrap()));

    let result = client.trade.buy(token, eth_in).await.unwrap();
    assert_eq!(result.trade.side, TradeSide::Buy);
    assert_eq!(result.trade.trader, env.alice);
    assert_eq!(result.trade.eth_amount(), eth_in);
    assert_eq!(result.trade.token_amount(), quote.estimated_output);
    assert_eq!(result.trade.block_number, result.outcome.block_number);
    assert!(result.trade.timestamp.is_some());

    let after = client.tokens.info(token).await.unwrap();
    assert!(after.progress > before.progress);
    assert!(after.price > before.price);
    assert_eq!(
        client.tokens.balance_of(token, env.alice).await.unwrap(),
        quote.estimated_output
    );
}

#[tokio::test]
async fn test_graduated_token_rejects_trades() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Satoshi Cat", "SCAT").await.unwrap();
    env.buy(env.bob, token, "100").await.unwrap();

    let client = client_for(&env, Some(env.bob));
    let info = client.tokens.info(token).await.unwrap();
    assert!(info.graduated);
    assert!(info.progress.is_complete());

    let sent = env.chain.transaction_count().unwrap();
    let err = client.trade.buy(token, parse_ether("1").unwrap()).await.unwrap_err();
    assert!(matches!(err, SdkError::TokenGraduated(t) if t == token));

    let err = client.trade.sell(token, U256::from(1)).await.unwrap_err();
    assert!(matches!(err, SdkError::TokenGraduated(_)));
    assert_eq!(env.chain.transaction_count().unwrap(), sent);
}

#[tokio::test]
async fn test_sell_checks_balance_then_settles() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let client = client_for(&env, Some(env.alice));

    client.trade.buy(token, parse_ether("0.5").unwrap()).await.unwrap();
    let held = client.tokens.balance_of(token, env.alice).await.unwrap();

    let err = client.trade.sell(token, held + U256::from(1)).await.unwrap_err();
    match err {
        SdkError::InsufficientBalance { expected, available } => {
            assert_eq!(expected, held + U256::from(1));
            assert_eq!(available, held);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let native_before = client.tokens.native_balance(env.alice).await.unwrap();
    let quote = client.tokens.quote_sell(token, held).await.unwrap();
    assert!(quote.estimated_fee.is_none());

    let result = client.trade.sell(token, held).await.unwrap();
    assert_eq!(result.trade.side, TradeSide::Sell);
    assert_eq!(result.trade.eth_amount(), quote.estimated_output);
    assert_eq!(
        client.tokens.native_balance(env.alice).await.unwrap(),
        native_before + quote.estimated_output
    );
    assert_eq!(client.tokens.balance_of(token, env.alice).await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_trade_history_in_chain_order() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Global Tech DAO", "GTD").await.unwrap();
    let alice = client_for(&env, Some(env.alice));
    let bob = client_for(&env, Some(env.bob));

    alice.trade.buy(token, parse_ether("0.2").unwrap()).await.unwrap();
    bob.trade.buy(token, parse_ether("0.3").unwrap()).await.unwrap();
    let held = alice.tokens.balance_of(token, env.alice).await.unwrap();
    alice.trade.sell(token, held / U256::from(2)).await.unwrap();

    let trades = alice.history.trades(token).await.unwrap();
    let sides: Vec<_> = trades.iter().map(|t| t.side).collect();
    assert_eq!(sides, vec![TradeSide::Buy, TradeSide::Buy, TradeSide::Sell]);
    assert!(trades.windows(2).all(|w| w[0].block_number < w[1].block_number));
    assert!(trades.iter().all(|t| t.timestamp.is_some() && t.tx_hash.is_some()));
    assert!(trades.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let by_bob = alice.history.trades_by(token, env.bob).await.unwrap();
    assert_eq!(by_bob.len(), 1);
    assert_eq!(by_bob[0].trader, env.bob);
}

#[tokio::test]
async fn test_launch_history_by_creator() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, Some(env.alice));

    env.launch_token(env.alice, "Core Doge", "CDOGE").await.unwrap();
    env.launch_token(env.bob, "Satoshi Cat", "SCAT").await.unwrap();
    env.launch_token(env.alice, "Global Tech DAO", "GTD").await.unwrap();

    let all = client.history.launches(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(
        all.iter().map(|l| l.token).collect::<Vec<_>>(),
        env.chain.deployed_tokens().unwrap()
    );

    let by_alice = client.history.launches(Some(env.alice)).await.unwrap();
    assert_eq!(by_alice.len(), 2);
    assert!(by_alice.iter().all(|l| l.creator == env.alice));
}

#[tokio::test]
async fn test_confirmation_timeout() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, Some(env.alice));
    env.chain.withhold_receipts(true).unwrap();

    let err = client.factory.launch_token("Core Doge", "CDOGE").await.unwrap_err();
    assert!(matches!(err, SdkError::ConfirmationTimeout { .. }));
}

#[tokio::test]
async fn test_transactions_need_a_sender() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, None);

    let err = client.factory.launch_token("Core Doge", "CDOGE").await.unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}

#[tokio::test]
async fn test_node_rejection_is_surfaced() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let poor = Address::repeat_byte(0x0d);
    let client = client_for(&env, Some(poor));

    let err = client.trade.buy(token, parse_ether("1").unwrap()).await.unwrap_err();
    assert!(err.short_message().contains("insufficient funds"));
}

#[tokio::test]
async fn test_zero_quotes_skip_the_chain() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env, None);
    // No contract lives here; a real read would fail to decode
    let nowhere = Address::repeat_byte(0x99);

    let buy = client.tokens.quote_buy(nowhere, U256::ZERO).await.unwrap();
    assert_eq!(buy.estimated_output, U256::ZERO);
    assert_eq!(buy.estimated_fee, Some(U256::ZERO));

    let sell = client.tokens.quote_sell(nowhere, U256::ZERO).await.unwrap();
    assert_eq!(sell.estimated_output, U256::ZERO);
    assert!(client.tokens.quote_buy(nowhere, U256::from(1)).await.is_err());
}

#[tokio::test]
async fn test_mined_revert_with_gas_limit() {
    let env = TestEnvironment::new().unwrap();
    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let sell_one = IBondingToken::sellCall { tokenAmount: U256::from(1) };

    // Without a gas limit the node's estimate rejects the call up front
    let client = client_for(&env, Some(env.alice));
    let sent = env.chain.transaction_count().unwrap();
    let err = client.base.send(token, &sell_one, None).await.unwrap_err();
    assert!(err.is_revert());
    assert_eq!(env.chain.transaction_count().unwrap(), sent);

    // With one the transaction is mined and its receipt carries status 0
    let mut config = LaunchpadConfig::default();
    config.contracts.factory = env.factory();
    config.account.from = Some(env.alice);
    config.transactions.receipt_poll_ms = 10;
    config.transactions.gas_limit = Some(500_000);
    let rpc: Arc<dyn ChainRpc> = env.chain.clone();
    let client = LaunchpadClient::with_rpc(rpc, &config);

    let err = client.base.send(token, &sell_one, None).await.unwrap_err();
    assert!(err.is_revert());
    assert_eq!(env.chain.transaction_count().unwrap(), sent + 1);

    let short = err.short_message();
    assert!(err.to_string().chars().count() > ERROR_MESSAGE_LIMIT);
    assert_eq!(short.chars().count(), ERROR_MESSAGE_LIMIT + 3);
    assert!(short.ends_with("..."));
}

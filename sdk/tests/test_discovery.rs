//! Token discovery scan and watcher against the simulated chain

use std::sync::Arc;
use std::time::Duration;

use launchpad_sdk::{
    Address, ChainRpc, LaunchpadClient, LaunchpadConfig, SdkError, TokenWatcher, WatchEvent,
};
use launchpad_simulation::TestEnvironment;

fn client_for(env: &TestEnvironment) -> LaunchpadClient {
    let mut config = LaunchpadConfig::default();
    config.contracts.factory = env.factory();
    config.account.from = Some(env.alice);
    config.transactions.receipt_poll_ms = 10;

    let rpc: Arc<dyn ChainRpc> = env.chain.clone();
    LaunchpadClient::with_rpc(rpc, &config)
}

#[tokio::test]
async fn test_scan_stops_at_zero_address() {
    let env = TestEnvironment::new().unwrap();
    let first = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let second = env.launch_token(env.deployer, "Global Tech DAO", "GTD").await.unwrap();
    env.chain.insert_slot(Address::ZERO).unwrap();
    env.launch_token(env.deployer, "Satoshi Cat", "SCAT").await.unwrap();

    let discovery = client_for(&env).discovery();
    assert_eq!(discovery.scan_addresses(15).await, vec![first, second]);
}

#[tokio::test]
async fn test_scan_stops_at_end_of_list() {
    let env = TestEnvironment::new().unwrap();
    let tokens = env.seed_demo_tokens().await.unwrap();

    // Index 3 reverts out of bounds and ends the scan quietly
    let discovery = client_for(&env).discovery();
    let found = discovery.scan(15).await;
    assert_eq!(found.iter().map(|t| t.address).collect::<Vec<_>>(), tokens);
    assert!(found[2].graduated);
}

#[tokio::test]
async fn test_scan_respects_limit() {
    let env = TestEnvironment::new().unwrap();
    let tokens = env.seed_demo_tokens().await.unwrap();

    let discovery = client_for(&env).discovery();
    assert_eq!(discovery.scan_addresses(2).await, tokens[..2].to_vec());
    assert!(discovery.scan_addresses(0).await.is_empty());
}

#[tokio::test]
async fn test_failing_factory_yields_empty_list() {
    let env = TestEnvironment::new().unwrap();
    env.seed_demo_tokens().await.unwrap();
    env.chain.break_contract(env.factory()).unwrap();

    let discovery = client_for(&env).discovery();
    assert!(discovery.scan(15).await.is_empty());
    assert!(discovery.scan_counted(15).await.is_err());
}

#[tokio::test]
async fn test_unreadable_token_ends_scan() {
    let env = TestEnvironment::new().unwrap();
    let tokens = env.seed_demo_tokens().await.unwrap();
    env.chain.break_contract(tokens[1]).unwrap();

    // Tokens after the unreadable one are not reported
    let discovery = client_for(&env).discovery();
    let found = discovery.scan(15).await;
    assert_eq!(found.iter().map(|t| t.address).collect::<Vec<_>>(), vec![tokens[0]]);

    let counted = discovery.scan_counted(15).await.unwrap();
    assert_eq!(counted.len(), 1);
}

#[tokio::test]
async fn test_counted_scan() {
    let env = TestEnvironment::new().unwrap();
    let tokens = env.seed_demo_tokens().await.unwrap();
    let client = client_for(&env);

    assert_eq!(client.factory.token_count().await.unwrap(), 3);
    let found = client.discovery().scan_counted(2).await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].address, tokens[1]);
}

#[tokio::test]
async fn test_watcher_reports_changes() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env);
    let mut watcher = TokenWatcher::new(client.discovery(), 15, Duration::from_secs(15)).unwrap();

    let token = env.launch_token(env.deployer, "Core Doge", "CDOGE").await.unwrap();
    let events = watcher.poll_once().await.unwrap();
    assert!(matches!(&events[..], [WatchEvent::NewToken(info)] if info.address == token));

    // Nothing changed
    assert!(watcher.poll_once().await.unwrap().is_empty());

    env.buy(env.bob, token, "1").await.unwrap();
    let events = watcher.poll_once().await.unwrap();
    assert!(matches!(&events[..], [WatchEvent::ProgressChanged { token: t, .. }] if *t == token));

    env.buy(env.bob, token, "100").await.unwrap();
    let events = watcher.poll_once().await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], WatchEvent::Graduated { token: t, .. } if *t == token));
    assert_eq!(watcher.known_tokens(), 1);
}

#[tokio::test]
async fn test_watcher_run_until_shutdown() {
    let env = TestEnvironment::new().unwrap();
    env.seed_demo_tokens().await.unwrap();
    let client = client_for(&env);

    let watcher = TokenWatcher::new(client.discovery(), 15, Duration::from_millis(10))
        .unwrap()
        .counted(true);
    let mut seen = Vec::new();
    watcher
        .run(|event| seen.push(event), tokio::time::sleep(Duration::from_millis(100)))
        .await;

    // Each token is announced once however many polls ran
    let new_tokens = seen
        .iter()
        .filter(|e| matches!(e, WatchEvent::NewToken(_)))
        .count();
    assert_eq!(new_tokens, 3);
}

#[tokio::test]
async fn test_watcher_rejects_zero_interval() {
    let env = TestEnvironment::new().unwrap();
    let client = client_for(&env);

    let err = TokenWatcher::new(client.discovery(), 15, Duration::ZERO).err().unwrap();
    assert!(matches!(err, SdkError::InvalidParameters(_)));
    assert!(TokenWatcher::new(client.discovery(), 15, Duration::from_millis(1)).is_ok());
}

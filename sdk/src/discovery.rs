//! Token discovery and change watching
//!
//! The factory exposes an index-addressable token array. Discovery walks it
//! from index 0 and treats the first zero address or failing read as the end
//! of the list. A token whose details cannot be read ends the list too.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use launchpad_types::{Progress, TokenInfo};
use tracing::{debug, info, warn};

use crate::client::{FactoryService, TokenService};
use crate::error::{SdkError, SdkResult};

/// Scans the factory and reads token snapshots
#[derive(Clone)]
pub struct TokenDiscovery {
    factory: FactoryService,
    tokens: TokenService,
}

impl TokenDiscovery {
    pub fn new(factory: FactoryService, tokens: TokenService) -> Self {
        Self { factory, tokens }
    }

    /// Token addresses at indices `0..limit`, stopping early at the end of
    /// the list
    pub async fn scan_addresses(&self, limit: u64) -> Vec<Address> {
        let mut found = Vec::new();

        for index in 0..limit {
            match self.factory.token_at(index).await {
                Ok(address) if address == Address::ZERO => {
                    debug!("Zero address at index {}, end of token list", index);
                    break;
                }
                Ok(address) => found.push(address),
                Err(e) => {
                    debug!("Index {} unreadable, end of token list: {}", index, e);
                    break;
                }
            }
        }

        found
    }

    /// Snapshots of up to `limit` tokens
    pub async fn scan(&self, limit: u64) -> Vec<TokenInfo> {
        let addresses = self.scan_addresses(limit).await;
        self.load(addresses).await
    }

    /// Like [`scan`](Self::scan), bounded by the factory's reported count
    pub async fn scan_counted(&self, limit: u64) -> SdkResult<Vec<TokenInfo>> {
        let count = self.factory.token_count().await?;
        debug!("Factory reports {} tokens", count);
        Ok(self.scan(count.min(limit)).await)
    }

    async fn load(&self, addresses: Vec<Address>) -> Vec<TokenInfo> {
        let mut infos = Vec::with_capacity(addresses.len());
        for address in addresses {
            match self.tokens.info(address).await {
                Ok(info) => infos.push(info),
                Err(e) => {
                    warn!("Token {} unreadable, end of token list: {}", address, e.short_message());
                    break;
                }
            }
        }
        infos
    }
}

/// Change observed between two watcher polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    NewToken(TokenInfo),
    ProgressChanged {
        token: Address,
        symbol: String,
        from: Progress,
        to: Progress,
    },
    Graduated {
        token: Address,
        symbol: String,
    },
}

/// Re-runs discovery on an interval and reports what changed
pub struct TokenWatcher {
    discovery: TokenDiscovery,
    limit: u64,
    counted: bool,
    interval: Duration,
    snapshot: HashMap<Address, TokenInfo>,
}

impl TokenWatcher {
    /// Fails on a zero `interval`
    pub fn new(discovery: TokenDiscovery, limit: u64, interval: Duration) -> SdkResult<Self> {
        if interval.is_zero() {
            return Err(SdkError::InvalidParameters("watch interval must be greater than 0".into()));
        }

        Ok(Self {
            discovery,
            limit,
            counted: false,
            interval,
            snapshot: HashMap::new(),
        })
    }

    /// Bound each poll by `getSubTokensCount`
    pub fn counted(mut self, counted: bool) -> Self {
        self.counted = counted;
        self
    }

    /// Tokens seen so far
    pub fn known_tokens(&self) -> usize {
        self.snapshot.len()
    }

    /// Run one discovery pass and diff it against the previous one
    ///
    /// Tokens missing from a pass keep their last snapshot.
    pub async fn poll_once(&mut self) -> SdkResult<Vec<WatchEvent>> {
        let current = if self.counted {
            self.discovery.scan_counted(self.limit).await?
        } else {
            self.discovery.scan(self.limit).await
        };

        let mut events = Vec::new();
        for info in current {
            match self.snapshot.get(&info.address) {
                None => events.push(WatchEvent::NewToken(info.clone())),
                Some(previous) => {
                    if previous.progress != info.progress {
                        events.push(WatchEvent::ProgressChanged {
                            token: info.address,
                            symbol: info.symbol.clone(),
                            from: previous.progress,
                            to: info.progress,
                        });
                    }
                    if !previous.graduated && info.graduated {
                        events.push(WatchEvent::Graduated {
                            token: info.address,
                            symbol: info.symbol.clone(),
                        });
                    }
                }
            }
            self.snapshot.insert(info.address, info);
        }

        Ok(events)
    }

    /// Poll until `shutdown` resolves, handing every event to `on_event`
    ///
    /// A failed poll is logged and retried on the next tick.
    pub async fn run<F, S>(mut self, mut on_event: F, shutdown: S)
    where
        F: FnMut(WatchEvent),
        S: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!("Watching factory every {:?}", self.interval);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Watcher stopped after tracking {} tokens", self.snapshot.len());
                    return;
                }
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(events) => events.into_iter().for_each(&mut on_event),
                        Err(e) => warn!("Watcher poll failed: {}", e.short_message()),
                    }
                }
            }
        }
    }
}

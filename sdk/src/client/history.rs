use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use launchpad_types::{IBondingToken, IFactory, Launch, Log, LogFilter, Trade, TradeSide};
use tracing::{debug, warn};

use crate::client::BaseClient;
use crate::error::SdkResult;

/// Trades and launches reconstructed from event logs
#[derive(Clone)]
pub struct HistoryService {
    base: Arc<BaseClient>,
    factory: Address,
}

impl HistoryService {
    pub fn new(base: Arc<BaseClient>, factory: Address) -> Self {
        Self { base, factory }
    }

    /// All trades on `token`, oldest first
    pub async fn trades(&self, token: Address) -> SdkResult<Vec<Trade>> {
        self.fetch_trades(token, None).await
    }

    /// Trades on `token` made by `trader`, oldest first
    pub async fn trades_by(&self, token: Address, trader: Address) -> SdkResult<Vec<Trade>> {
        self.fetch_trades(token, Some(trader)).await
    }

    async fn fetch_trades(&self, token: Address, trader: Option<Address>) -> SdkResult<Vec<Trade>> {
        let mut bought = LogFilter::new(token, IBondingToken::Bought::SIGNATURE_HASH);
        let mut sold = LogFilter::new(token, IBondingToken::Sold::SIGNATURE_HASH);
        if let Some(trader) = trader {
            bought = bought.with_topic(1, address_topic(trader));
            sold = sold.with_topic(1, address_topic(trader));
        }

        let rpc = self.base.rpc();
        let (mut logs, sold_logs) = tokio::try_join!(rpc.logs(&bought), rpc.logs(&sold))?;
        logs.extend(sold_logs);
        logs.sort_by_key(Log::position);

        let mut trades: Vec<Trade> = logs
            .iter()
            .filter_map(|log| {
                let trade = decode_trade(log);
                if trade.is_none() {
                    warn!("Skipping undecodable trade log in {:?}", log.transaction_hash);
                }
                trade
            })
            .collect();

        self.stamp_timestamps(&mut trades).await?;
        debug!("Loaded {} trades for {}", trades.len(), token);
        Ok(trades)
    }

    /// Fill `timestamp` from block headers, one lookup per block
    async fn stamp_timestamps(&self, trades: &mut [Trade]) -> SdkResult<()> {
        let mut cache: HashMap<u64, Option<u64>> = HashMap::new();

        for trade in trades.iter_mut() {
            let Some(number) = trade.block_number else {
                continue;
            };
            if !cache.contains_key(&number) {
                let header = self.base.rpc().block(number).await?;
                cache.insert(number, header.map(|h| h.timestamp.to::<u64>()));
            }
            trade.timestamp = cache.get(&number).copied().flatten();
        }

        Ok(())
    }

    /// Factory launches, optionally restricted to one creator, oldest first
    pub async fn launches(&self, creator: Option<Address>) -> SdkResult<Vec<Launch>> {
        let mut filter = LogFilter::new(self.factory, IFactory::OrgLaunched::SIGNATURE_HASH);
        if let Some(creator) = creator {
            filter = filter.with_topic(2, address_topic(creator));
        }

        let mut logs = self.base.rpc().logs(&filter).await?;
        logs.sort_by_key(Log::position);

        Ok(logs.iter().filter_map(decode_launch).collect())
    }
}

/// Indexed address arguments are left-padded to a full word
fn address_topic(address: Address) -> B256 {
    address.into_word()
}

/// Decode a `Bought` or `Sold` log into a trade
pub fn decode_trade(log: &Log) -> Option<Trade> {
    let topics = || log.topics.iter().copied();
    let signature = *log.topics.first()?;

    let mut trade = if signature == IBondingToken::Bought::SIGNATURE_HASH {
        let event = IBondingToken::Bought::decode_raw_log(topics(), &log.data, true).ok()?;
        Trade {
            side: TradeSide::Buy,
            token: log.address,
            trader: event.buyer,
            input_amount: event.ethAmount,
            output_amount: event.tokenAmount,
            fee_amount: event.feeAmount,
            tx_hash: None,
            block_number: None,
            timestamp: None,
        }
    } else if signature == IBondingToken::Sold::SIGNATURE_HASH {
        let event = IBondingToken::Sold::decode_raw_log(topics(), &log.data, true).ok()?;
        Trade {
            side: TradeSide::Sell,
            token: log.address,
            trader: event.seller,
            input_amount: event.tokenAmount,
            output_amount: event.ethAmount,
            fee_amount: event.feeAmount,
            tx_hash: None,
            block_number: None,
            timestamp: None,
        }
    } else {
        return None;
    };

    trade.tx_hash = log.transaction_hash;
    trade.block_number = log.block_number.map(|n| n.to::<u64>());
    Some(trade)
}

/// Decode an `OrgLaunched` log
pub fn decode_launch(log: &Log) -> Option<Launch> {
    let event = IFactory::OrgLaunched::decode_raw_log(log.topics.iter().copied(), &log.data, true).ok()?;
    Some(Launch {
        token: event.token,
        creator: event.creator,
        tx_hash: log.transaction_hash,
        block_number: log.block_number.map(|n| n.to::<u64>()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, U64};

    fn to_log(address: Address, data: alloy_primitives::LogData, block: u64) -> Log {
        Log {
            address,
            topics: data.topics().to_vec(),
            data: data.data,
            block_number: Some(U64::from(block)),
            transaction_hash: Some(B256::repeat_byte(block as u8)),
            log_index: Some(U64::ZERO),
        }
    }

    #[test]
    fn test_decode_bought_and_sold() {
        let token = Address::repeat_byte(0x10);
        let trader = Address::repeat_byte(0x20);

        let bought = IBondingToken::Bought {
            buyer: trader,
            ethAmount: U256::from(1_000),
            feeAmount: U256::from(5),
            tokenAmount: U256::from(900_000),
        };
        let trade = decode_trade(&to_log(token, bought.encode_log_data(), 7)).unwrap();
        assert_eq!(trade.side, TradeSide::Buy);
        assert_eq!(trade.eth_amount(), U256::from(1_000));
        assert_eq!(trade.token_amount(), U256::from(900_000));
        assert_eq!(trade.block_number, Some(7));

        let sold = IBondingToken::Sold {
            seller: trader,
            tokenAmount: U256::from(900_000),
            feeAmount: U256::from(4),
            ethAmount: U256::from(800),
        };
        let trade = decode_trade(&to_log(token, sold.encode_log_data(), 8)).unwrap();
        assert_eq!(trade.side, TradeSide::Sell);
        assert_eq!(trade.eth_amount(), U256::from(800));
        assert_eq!(trade.trader, trader);
    }

    #[test]
    fn test_decode_launch_and_foreign_logs() {
        let factory = Address::repeat_byte(0xfa);
        let launched = IFactory::OrgLaunched {
            token: Address::repeat_byte(0x10),
            creator: Address::repeat_byte(0x01),
        };
        let log = to_log(factory, launched.encode_log_data(), 3);

        let launch = decode_launch(&log).unwrap();
        assert_eq!(launch.creator, Address::repeat_byte(0x01));
        assert!(decode_trade(&log).is_none());
    }

    #[test]
    fn test_address_topic_padding() {
        let topic = address_topic(Address::repeat_byte(0xab));
        assert_eq!(&topic[..12], &[0u8; 12]);
        assert_eq!(&topic[12..], Address::repeat_byte(0xab).as_slice());
    }
}

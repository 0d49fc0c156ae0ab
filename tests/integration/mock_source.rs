//! Mock balance and price sources for integration testing.
//!
//! Deterministic in-memory implementations of `BalanceSource` and
//! `PriceSource` — balances, prices, and failure injection are fully
//! controllable from test code.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use xyo_miner::explorer::BalanceSource;
use xyo_miner::prices::PriceSource;
use xyo_miner::types::{BalancePair, UsdPrices, WalletAddress};

/// An in-memory balance source for deterministic testing.
///
/// All state is in-memory. Balances and failure injection are fully
/// controllable from test code.
pub struct MockExplorer {
    balances: Arc<Mutex<BalancePair>>,
    /// 1-based call numbers that should fail.
    fail_on: Arc<Mutex<HashSet<u64>>>,
    /// If set, all calls will return this error.
    force_error: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<u64>>,
}

impl MockExplorer {
    /// Create a mock with explicit balances.
    pub fn new(balances: BalancePair) -> Self {
        Self {
            balances: Arc::new(Mutex::new(balances)),
            fail_on: Arc::new(Mutex::new(HashSet::new())),
            force_error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock holding 2 ETH and 1,000,000 XYO.
    pub fn with_default_balances() -> Self {
        Self::new(BalancePair {
            eth_wei: dec!(2000000000000000000),
            xyo_raw: dec!(1000000000000000000000000),
        })
    }

    /// Make the n-th `fetch_balances` call (1-based) fail.
    pub fn fail_on_call(&self, n: u64) {
        self.fail_on.lock().unwrap().insert(n);
    }

    /// Force all subsequent calls to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Number of `fetch_balances` calls made so far.
    pub fn call_count(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl BalanceSource for MockExplorer {
    async fn fetch_balances(&self, _wallet: &WalletAddress) -> Result<BalancePair> {
        let call = {
            let mut c = self.calls.lock().unwrap();
            *c += 1;
            *c
        };

        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(anyhow!("{msg}"));
        }
        if self.fail_on.lock().unwrap().contains(&call) {
            return Err(anyhow!("injected failure on call {call}"));
        }

        Ok(*self.balances.lock().unwrap())
    }

    fn name(&self) -> &str {
        "mock-explorer"
    }
}

/// A fixed-price source, optionally failing.
pub struct MockPrices {
    prices: UsdPrices,
    fail: bool,
}

impl MockPrices {
    /// ETH at $2,500 and XYO at $0.01.
    pub fn new() -> Self {
        Self {
            prices: UsdPrices {
                eth_usd: dec!(2500),
                xyo_usd: dec!(0.01),
            },
            fail: false,
        }
    }

    /// A source whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            prices: UsdPrices {
                eth_usd: dec!(0),
                xyo_usd: dec!(0),
            },
            fail: true,
        }
    }
}

#[async_trait]
impl PriceSource for MockPrices {
    async fn fetch_prices(&self) -> Result<UsdPrices> {
        if self.fail {
            return Err(anyhow!("price feed unavailable"));
        }
        Ok(self.prices)
    }

    fn name(&self) -> &str {
        "mock-prices"
    }
}

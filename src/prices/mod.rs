//! Price feed integrations.
//!
//! Defines the `PriceSource` trait and provides the CoinGecko
//! implementation. Prices are fetched once at session start and reused
//! for every snapshot.

pub mod coingecko;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::UsdPrices;

/// Abstraction over USD spot-price lookups for the monitored assets.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch current USD prices for ETH and XYO.
    async fn fetch_prices(&self) -> Result<UsdPrices>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}

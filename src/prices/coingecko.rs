//! CoinGecko price feed.
//!
//! Uses the free simple-price endpoint (no key required) to value ETH and
//! XYO holdings in USD.
//!
//! API: `https://api.coingecko.com/api/v3/simple/price`
//! Auth: None required.
//! Rate limit: ~30 req/min on the public tier — one call per session is
//! well inside it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::PriceSource;
use crate::types::{MinerError, UsdPrices};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum,xyo-network&vs_currencies=usd";
const SOURCE_NAME: &str = "coingecko";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: PriceEntry,
    #[serde(rename = "xyo-network")]
    xyo_network: PriceEntry,
}

#[derive(Debug, Deserialize)]
struct PriceEntry {
    usd: Decimal,
}

impl From<SimplePriceResponse> for UsdPrices {
    fn from(resp: SimplePriceResponse) -> Self {
        UsdPrices {
            eth_usd: resp.ethereum.usd,
            xyo_usd: resp.xyo_network.usd,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// CoinGecko simple-price client.
pub struct CoinGeckoClient {
    http: Client,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("xyo-miner/0.1.0 (portfolio-agent)")
            .build()
            .context("Failed to build HTTP client for CoinGecko")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_prices(&self) -> Result<UsdPrices> {
        debug!(url = PRICE_URL, "Fetching USD prices");

        let resp = self
            .http
            .get(PRICE_URL)
            .send()
            .await
            .context("CoinGecko price request failed")?;

        if !resp.status().is_success() {
            return Err(MinerError::Price {
                feed: SOURCE_NAME.to_string(),
                message: format!("HTTP {}", resp.status()),
            }
            .into());
        }

        let data: SimplePriceResponse = resp
            .json()
            .await
            .context("Failed to parse CoinGecko price response")?;

        Ok(data.into())
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Etherscan block-explorer client.
//!
//! Fetches the native ETH balance and the XYO ERC-20 token balance for a
//! single wallet via the `account` module.
//!
//! API: `https://api.etherscan.io/api`
//! Auth: API key via `apikey` query param. Free registration.
//! Rate limit: 5 req/s on the free tier.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::BalanceSource;
use crate::types::{BalancePair, MinerError, WalletAddress};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://api.etherscan.io/api";
const SOURCE_NAME: &str = "etherscan";

/// XYO token contract on Ethereum mainnet.
const XYO_CONTRACT: &str = "0x55296f69f40Ea6d20E478533C15a6B08b654E758";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

/// Envelope shared by all `module=account` responses. Balances arrive as
/// decimal strings in `result`; on failure `result` carries the error text.
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: String,
}

/// Etherscan signals application-level failure with `status == "0"` and a
/// message other than `"OK"`.
fn result_payload(resp: EtherscanResponse, action: &str) -> Result<String> {
    if resp.status == "0" && resp.message != "OK" {
        let message = if resp.result.is_empty() {
            resp.message
        } else {
            resp.result
        };
        return Err(MinerError::Explorer {
            action: action.to_string(),
            message,
        }
        .into());
    }
    Ok(resp.result)
}

/// Parse a base-unit balance (integer decimal string) into a `Decimal`.
fn parse_base_units(raw: &str, action: &str) -> Result<Decimal> {
    match raw.trim().parse::<Decimal>() {
        Ok(v) => Ok(v),
        Err(e) => Err(MinerError::Explorer {
            action: action.to_string(),
            message: format!("unparseable balance {raw:?}: {e}"),
        }
        .into()),
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Etherscan API client.
pub struct EtherscanClient {
    http: Client,
    api_key: SecretString,
}

impl EtherscanClient {
    /// Create a new Etherscan client.
    pub fn new(api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("xyo-miner/0.1.0 (portfolio-agent)")
            .build()
            .context("Failed to build HTTP client for Etherscan")?;

        Ok(Self { http, api_key })
    }

    // -- Internal helpers ------------------------------------------------

    /// Issue one `module=account` query and return the `result` payload.
    async fn account_query(
        &self,
        action: &str,
        extra: &[(&str, &str)],
        wallet: &WalletAddress,
    ) -> Result<String> {
        let mut params: Vec<(&str, &str)> = vec![
            ("module", "account"),
            ("action", action),
            ("address", wallet.as_str()),
            ("tag", "latest"),
        ];
        params.extend_from_slice(extra);
        params.push(("apikey", self.api_key.expose_secret().as_str()));

        debug!(action, wallet = %wallet, "Querying Etherscan");

        let resp = self
            .http
            .get(BASE_URL)
            .query(&params)
            .send()
            .await
            .context(format!("Etherscan request failed for {action}"))?;

        if !resp.status().is_success() {
            return Err(MinerError::Explorer {
                action: action.to_string(),
                message: format!("HTTP {}", resp.status()),
            }
            .into());
        }

        let data: EtherscanResponse = resp
            .json()
            .await
            .context(format!("Failed to parse Etherscan response for {action}"))?;

        result_payload(data, action)
    }

    /// Native ETH balance in wei.
    pub async fn eth_balance(&self, wallet: &WalletAddress) -> Result<Decimal> {
        let raw = self.account_query("balance", &[], wallet).await?;
        parse_base_units(&raw, "balance")
    }

    /// XYO token balance in raw units (18 decimals).
    pub async fn xyo_balance(&self, wallet: &WalletAddress) -> Result<Decimal> {
        let raw = self
            .account_query("tokenbalance", &[("contractaddress", XYO_CONTRACT)], wallet)
            .await?;
        parse_base_units(&raw, "tokenbalance")
    }
}

#[async_trait]
impl BalanceSource for EtherscanClient {
    async fn fetch_balances(&self, wallet: &WalletAddress) -> Result<BalancePair> {
        let eth_wei = self.eth_balance(wallet).await?;
        let xyo_raw = self.xyo_balance(wallet).await?;
        Ok(BalancePair { eth_wei, xyo_raw })
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared types for the mining/portfolio agent.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that explorer, price, engine,
//! and report modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Wallet address
// ---------------------------------------------------------------------------

/// A validated Ethereum wallet address: `0x` followed by 40 hex characters.
///
/// The address is public data, but log output uses the truncated `Display`
/// form to keep lines readable. Use [`WalletAddress::as_str`] where the
/// full address is required (API query params, report rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse and validate an address string.
    pub fn parse(raw: &str) -> Result<Self, MinerError> {
        let addr = raw.trim();
        if addr.len() != 42 {
            return Err(MinerError::Config(format!(
                "Invalid wallet address: expected 42 characters, got {}",
                addr.len()
            )));
        }
        if !addr.starts_with("0x") {
            return Err(MinerError::Config(
                "Invalid wallet address: missing 0x prefix".to_string(),
            ));
        }
        if !addr[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MinerError::Config(
                "Invalid wallet address: non-hex characters after 0x".to_string(),
            ));
        }
        Ok(Self(addr.to_string()))
    }

    /// The full address, for API calls and report rows.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Helper to build a known-good test address.
    #[cfg(test)]
    pub fn sample() -> Self {
        Self::parse("0x55296f69f40Ea6d20E478533C15a6B08b654E758").unwrap()
    }
}

impl fmt::Display for WalletAddress {
    /// Truncated form: first 10 characters, ellipsis, last 8.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", &self.0[..10], &self.0[self.0.len() - 8..])
    }
}

// ---------------------------------------------------------------------------
// Balances and prices
// ---------------------------------------------------------------------------

/// Raw on-chain balances for one wallet, in base units (both assets use
/// 18 decimals).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePair {
    /// Native ETH balance in wei.
    pub eth_wei: Decimal,
    /// XYO token balance in raw (unscaled) units.
    pub xyo_raw: Decimal,
}

impl fmt::Display for BalancePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eth_wei={} xyo_raw={}", self.eth_wei, self.xyo_raw)
    }
}

/// USD unit prices for the two monitored assets, fetched once per session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsdPrices {
    pub eth_usd: Decimal,
    pub xyo_usd: Decimal,
}

impl fmt::Display for UsdPrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ETH ${:.4} | XYO ${:.8}", self.eth_usd, self.xyo_usd)
    }
}

// ---------------------------------------------------------------------------
// Portfolio snapshot
// ---------------------------------------------------------------------------

/// One successful iteration's balance sample, valued in USD.
/// These accumulate over a session and feed the CSV report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub taken_at: DateTime<Utc>,
    /// Full wallet address (reports carry the untruncated form).
    pub wallet: String,
    /// ETH balance in whole tokens.
    pub eth_balance: Decimal,
    /// USD value of the ETH balance.
    pub eth_usd: Decimal,
    /// XYO balance in whole tokens.
    pub xyo_balance: Decimal,
    /// USD value of the XYO balance.
    pub xyo_usd: Decimal,
    /// Combined USD value.
    pub total_usd: Decimal,
}

impl fmt::Display for PortfolioSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ETH {:.6} (~${:.2}) | XYO {:.0} (~${:.2}) | total ${:.2}",
            self.eth_balance, self.eth_usd, self.xyo_balance, self.xyo_usd, self.total_usd,
        )
    }
}

// ---------------------------------------------------------------------------
// Session summary
// ---------------------------------------------------------------------------

/// Final accounting of a completed (or interrupted) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Iterations attempted, including ones whose balance check failed.
    pub iterations: u64,
    /// Iterations that produced a portfolio snapshot.
    pub samples: u64,
    /// Wall-clock seconds from session start to loop exit.
    pub elapsed_secs: f64,
    /// Whether the session was cut short by a shutdown signal.
    pub interrupted: bool,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total iterations: {}", self.iterations)?;
        write!(
            f,
            "  Total time: {:.1}s ({:.2} minutes)",
            self.elapsed_secs,
            self.elapsed_secs / 60.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the agent.
#[derive(Debug, thiserror::Error)]
pub enum MinerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Explorer error ({action}): {message}")]
    Explorer { action: String, message: String },

    #[error("Price feed error ({feed}): {message}")]
    Price { feed: String, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Block-explorer integrations.
//!
//! Defines the `BalanceSource` trait and provides the Etherscan
//! implementation. All queries are read-only — the agent never signs or
//! submits transactions.

pub mod etherscan;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{BalancePair, WalletAddress};

/// Abstraction over read-only balance queries.
///
/// The session loop depends on this trait rather than a concrete client
/// so that tests can substitute an in-memory source.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch the native and token balances for a wallet, in base units.
    async fn fetch_balances(&self, wallet: &WalletAddress) -> Result<BalancePair>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}

//! Runtime configuration from environment variables and CLI arguments.
//!
//! Secrets come from the environment (`.env` files are honoured via
//! dotenv); the session duration comes from the command line. Everything
//! is resolved once at startup into an explicit [`RunConfig`] that is
//! passed down to the engine — nothing reads the environment after that.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use std::time::Duration;

use crate::types::{MinerError, WalletAddress};

/// Required: Etherscan API key (secret).
pub const ENV_API_KEY: &str = "ETHERSCAN_API_KEY";
/// Required: wallet address to monitor.
pub const ENV_WALLET: &str = "XYO_WALLET_ADDRESS";
/// Optional: liquidation target in USD.
pub const ENV_TARGET_USD: &str = "LIQUIDATION_TARGET_USD";

/// Liquidation target used when `LIQUIDATION_TARGET_USD` is unset.
const DEFAULT_TARGET_USD: Decimal = dec!(15000);

/// Seconds between mining iterations.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Fully-resolved session configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Session length in minutes. Strictly positive.
    pub duration_minutes: u64,
    /// Cadence of the iteration timer.
    pub poll_interval: Duration,
    /// Wallet under observation.
    pub wallet: WalletAddress,
    /// Etherscan API key. Never logged.
    pub api_key: SecretString,
    /// Liquidation target the final portfolio value is compared against.
    pub target_usd: Decimal,
}

impl RunConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env(duration_minutes: u64) -> Result<Self, MinerError> {
        Self::from_parts(
            duration_minutes,
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_WALLET).ok(),
            std::env::var(ENV_TARGET_USD).ok(),
        )
    }

    /// Build a config from already-read values. Split out from
    /// [`RunConfig::from_env`] so validation is testable without touching
    /// the process environment.
    pub fn from_parts(
        duration_minutes: u64,
        api_key: Option<String>,
        wallet: Option<String>,
        target_usd: Option<String>,
    ) -> Result<Self, MinerError> {
        if duration_minutes == 0 {
            return Err(MinerError::Config(
                "Duration must be a positive number of minutes".to_string(),
            ));
        }

        let api_key = api_key.filter(|v| !v.trim().is_empty());
        let wallet = wallet.filter(|v| !v.trim().is_empty());

        let (api_key, wallet) = match (api_key, wallet) {
            (Some(key), Some(addr)) => (key, addr),
            (key, addr) => {
                // Report every missing variable at once, not just the first.
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push(ENV_API_KEY);
                }
                if addr.is_none() {
                    missing.push(ENV_WALLET);
                }
                return Err(MinerError::Config(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )));
            }
        };

        let wallet = WalletAddress::parse(&wallet)?;

        let target_usd = match target_usd.filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<Decimal>().map_err(|e| {
                MinerError::Config(format!("Invalid {ENV_TARGET_USD}: {e}"))
            })?,
            None => DEFAULT_TARGET_USD,
        };

        Ok(Self {
            duration_minutes,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            wallet,
            api_key: SecretString::new(api_key),
            target_usd,
        })
    }

    /// The session's wall-clock time budget.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_minutes * 60)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

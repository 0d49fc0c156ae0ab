//! Portfolio valuation — base-unit conversion, USD values, and the
//! liquidation-target comparison.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

use crate::types::{BalancePair, PortfolioSnapshot, UsdPrices, WalletAddress};

/// Both monitored assets carry 18 decimals on-chain.
const BASE_UNIT_SCALE: Decimal = dec!(1000000000000000000);

/// Convert a base-unit amount (wei / raw token units) to whole tokens.
pub fn to_token_units(raw: Decimal) -> Decimal {
    raw / BASE_UNIT_SCALE
}

/// Value one balance sample in USD.
pub fn snapshot(
    wallet: &WalletAddress,
    balances: BalancePair,
    prices: UsdPrices,
    taken_at: DateTime<Utc>,
) -> PortfolioSnapshot {
    let eth_balance = to_token_units(balances.eth_wei);
    let xyo_balance = to_token_units(balances.xyo_raw);
    let eth_usd = eth_balance * prices.eth_usd;
    let xyo_usd = xyo_balance * prices.xyo_usd;

    PortfolioSnapshot {
        taken_at,
        wallet: wallet.as_str().to_string(),
        eth_balance,
        eth_usd,
        xyo_balance,
        xyo_usd,
        total_usd: eth_usd + xyo_usd,
    }
}

// ---------------------------------------------------------------------------
// Liquidation comparison
// ---------------------------------------------------------------------------

/// Final portfolio value measured against the liquidation target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidationReport {
    pub total_usd: Decimal,
    pub target_usd: Decimal,
}

impl LiquidationReport {
    pub fn new(total_usd: Decimal, target_usd: Decimal) -> Self {
        Self {
            total_usd,
            target_usd,
        }
    }

    /// Signed distance from the target. Non-negative when the target is met.
    pub fn gap(&self) -> Decimal {
        self.total_usd - self.target_usd
    }

    pub fn target_met(&self) -> bool {
        self.gap() >= Decimal::ZERO
    }
}

impl fmt::Display for LiquidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gap = self.gap();
        if self.target_met() {
            write!(
                f,
                "ABOVE the ${:.2} target by ${:.2} — liquidation could be planned now",
                self.target_usd, gap,
            )
        } else {
            write!(
                f,
                "BELOW the ${:.2} target by ${:.2} — additional assets or price movement needed",
                self.target_usd, -gap,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The timed mining/portfolio session loop.
//!
//! Runs at a fixed cadence until the configured time budget is spent.
//! Balance checks are observational: a failed check is logged at warn
//! level and the loop moves on to the next tick. Overshoot past the
//! budget is bounded by one tick.

use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, Instant};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::engine::valuation;
use crate::explorer::BalanceSource;
use crate::types::{PortfolioSnapshot, SessionSummary, UsdPrices};

/// Everything a finished session produced: the summary plus the
/// per-iteration snapshots that feed the CSV report.
#[derive(Debug)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    pub snapshots: Vec<PortfolioSnapshot>,
}

/// One timed monitoring session over a single wallet.
pub struct MiningSession<'a> {
    config: &'a RunConfig,
    balances: &'a dyn BalanceSource,
    prices: UsdPrices,
}

impl<'a> MiningSession<'a> {
    pub fn new(
        config: &'a RunConfig,
        balances: &'a dyn BalanceSource,
        prices: UsdPrices,
    ) -> Self {
        Self {
            config,
            balances,
            prices,
        }
    }

    /// Run the session until the time budget is spent, or until the
    /// `shutdown` future resolves, whichever comes first.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) -> SessionOutcome {
        let budget = self.config.duration();
        let started = Instant::now();
        let mut ticker = interval(self.config.poll_interval);

        let mut iterations: u64 = 0;
        let mut snapshots: Vec<PortfolioSnapshot> = Vec::new();
        let mut interrupted = false;

        info!(
            wallet = %self.config.wallet,
            source = self.balances.name(),
            duration_minutes = self.config.duration_minutes,
            interval_secs = self.config.poll_interval.as_secs(),
            prices = %self.prices,
            "Mining session starting"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if started.elapsed() >= budget {
                        break;
                    }
                    iterations += 1;
                    self.run_iteration(iterations, started, budget, &mut snapshots).await;
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received — ending session early.");
                    interrupted = true;
                    break;
                }
            }
        }

        let summary = SessionSummary {
            iterations,
            samples: snapshots.len() as u64,
            elapsed_secs: started.elapsed().as_secs_f64(),
            interrupted,
        };

        info!(
            iterations = summary.iterations,
            samples = summary.samples,
            elapsed_secs = format!("{:.1}", summary.elapsed_secs),
            interrupted = summary.interrupted,
            "Mining session complete"
        );

        SessionOutcome { summary, snapshots }
    }

    /// One pass: log the counter, sample balances, log progress.
    async fn run_iteration(
        &self,
        iteration: u64,
        started: Instant,
        budget: Duration,
        snapshots: &mut Vec<PortfolioSnapshot>,
    ) {
        info!(
            iteration,
            timestamp = %Utc::now().format("%H:%M:%S"),
            "Mining iteration"
        );

        match self.balances.fetch_balances(&self.config.wallet).await {
            Ok(pair) => {
                let snap =
                    valuation::snapshot(&self.config.wallet, pair, self.prices, Utc::now());
                info!(iteration, portfolio = %snap, "Balances fetched");
                snapshots.push(snap);
            }
            Err(e) => {
                warn!(iteration, error = %e, "Balance check failed — continuing");
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        let total = budget.as_secs_f64();
        let remaining = (total - elapsed).max(0.0);
        info!(
            iteration,
            progress_pct = format!("{:.1}", (elapsed / total) * 100.0),
            elapsed_secs = format!("{:.1}", elapsed),
            remaining_secs = format!("{:.1}", remaining),
            "Progress"
        );
    }
}

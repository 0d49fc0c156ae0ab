//! End-to-end session loop tests.
//!
//! Run under paused tokio time, so a one-minute session completes in
//! milliseconds while keeping the real 10-second cadence semantics.

use rust_decimal_macros::dec;
use std::time::Duration;

use xyo_miner::config::RunConfig;
use xyo_miner::engine::session::MiningSession;
use xyo_miner::prices::PriceSource;
use xyo_miner::types::UsdPrices;

use crate::mock_source::{MockExplorer, MockPrices};

const WALLET: &str = "0x55296f69f40Ea6d20E478533C15a6B08b654E758";

fn test_config(duration_minutes: u64) -> RunConfig {
    RunConfig::from_parts(
        duration_minutes,
        Some("test-key".to_string()),
        Some(WALLET.to_string()),
        None,
    )
    .unwrap()
}

fn test_prices() -> UsdPrices {
    UsdPrices {
        eth_usd: dec!(2500),
        xyo_usd: dec!(0.01),
    }
}

/// Shutdown future that never resolves — the session runs out its budget.
fn no_shutdown() -> std::future::Pending<()> {
    std::future::pending()
}

#[tokio::test(start_paused = true)]
async fn one_minute_session_runs_six_iterations() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    // 10-second cadence with an immediate first tick: 0s..50s inclusive.
    assert_eq!(outcome.summary.iterations, 6);
    assert_eq!(outcome.summary.samples, 6);
    assert_eq!(outcome.snapshots.len(), 6);
    assert!(!outcome.summary.interrupted);
    assert_eq!(explorer.call_count(), 6);
}

#[tokio::test(start_paused = true)]
async fn session_elapsed_covers_budget_with_bounded_overshoot() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    let elapsed = outcome.summary.elapsed_secs;
    let budget = cfg.duration().as_secs_f64();
    let tick = cfg.poll_interval.as_secs_f64();
    assert!(elapsed >= budget, "elapsed {elapsed} shorter than budget {budget}");
    assert!(
        elapsed < budget + tick,
        "elapsed {elapsed} overshot budget {budget} by more than one tick"
    );
}

#[tokio::test(start_paused = true)]
async fn longer_session_scales_iteration_count() {
    let cfg = test_config(2);
    let explorer = MockExplorer::with_default_balances();

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    assert_eq!(outcome.summary.iterations, 12);
    assert!(outcome.summary.elapsed_secs >= 120.0);
}

#[tokio::test(start_paused = true)]
async fn balance_failure_does_not_abort_the_loop() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();
    explorer.fail_on_call(3);

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    // Iteration 3 fails; iterations 4..6 still happen.
    assert_eq!(outcome.summary.iterations, 6);
    assert_eq!(outcome.summary.samples, 5);
    assert_eq!(explorer.call_count(), 6);
}

#[tokio::test(start_paused = true)]
async fn session_completes_even_if_every_check_fails() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();
    explorer.set_error("explorer down");

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    assert_eq!(outcome.summary.iterations, 6);
    assert_eq!(outcome.summary.samples, 0);
    assert!(outcome.snapshots.is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_signal_ends_session_early() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    // Fires between the third tick (20s) and the fourth (30s).
    let outcome = session
        .run(async {
            tokio::time::sleep(Duration::from_secs(25)).await;
        })
        .await;

    assert!(outcome.summary.interrupted);
    assert_eq!(outcome.summary.iterations, 3);
    assert!(outcome.summary.elapsed_secs < 30.0);
}

#[tokio::test(start_paused = true)]
async fn snapshots_carry_valued_balances() {
    let cfg = test_config(1);
    let explorer = MockExplorer::with_default_balances();

    let session = MiningSession::new(&cfg, &explorer, test_prices());
    let outcome = session.run(no_shutdown()).await;

    let snap = &outcome.snapshots[0];
    // 2 ETH * $2500 + 1,000,000 XYO * $0.01
    assert_eq!(snap.eth_balance, dec!(2));
    assert_eq!(snap.total_usd, dec!(15000));
    assert_eq!(snap.wallet, WALLET);
}

#[tokio::test]
async fn price_source_fetch_and_failure() {
    let prices = MockPrices::new().fetch_prices().await.unwrap();
    assert_eq!(prices.eth_usd, dec!(2500));

    // Price failure is fatal at startup: the session needs prices for
    // every snapshot, so main aborts before entering the loop.
    let err = MockPrices::failing().fetch_prices().await.unwrap_err();
    assert!(err.to_string().contains("unavailable"));
}

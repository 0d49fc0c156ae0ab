//! XYO Mining & Portfolio Automation Agent
//!
//! Entry point. Parses the CLI, resolves configuration from the
//! environment, initialises structured logging, fetches session prices,
//! runs the timed mining loop with graceful shutdown, and writes the
//! session report.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use xyo_miner::config::RunConfig;
use xyo_miner::engine::session::MiningSession;
use xyo_miner::engine::valuation::LiquidationReport;
use xyo_miner::explorer::etherscan::EtherscanClient;
use xyo_miner::prices::coingecko::CoinGeckoClient;
use xyo_miner::prices::PriceSource;
use xyo_miner::report;

const BANNER: &str = r#"
__  __ __   __   ___     __  __  ___  _   _  _____  ____
\ \/ / \ \ / /  / _ \   |  \/  ||_ _|| \ | || ____||  _ \
 \  /   \ V /  | | | |  | |\/| | | | |  \| ||  _|  | |_) |
 /  \    | |   | |_| |  | |  | | | | | |\  || |___ |  _ <
/_/\_\   |_|    \___/   |_|  |_||___||_| \_||_____||_| \_\

  XYO Mining & Portfolio Automation
  v0.1.0 — Session Agent
"#;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "xyo-miner")]
#[command(about = "XYO mining & portfolio monitoring session")]
struct Cli {
    /// Session duration in minutes
    #[arg(long, default_value_t = 1)]
    duration_minutes: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_logging();

    println!("{BANNER}");

    // Configuration is resolved before anything else: missing or malformed
    // values must fail before the first iteration log line.
    let cfg = RunConfig::from_env(cli.duration_minutes)?;

    info!(
        wallet = %cfg.wallet,
        duration_minutes = cfg.duration_minutes,
        target_usd = %cfg.target_usd,
        "Configuration loaded"
    );

    // -- Initialise components -------------------------------------------

    let explorer = EtherscanClient::new(cfg.api_key.clone())?;

    // Prices are fetched once and reused for every snapshot. Without them
    // no snapshot can be valued, so a failure here aborts the session.
    let price_source = CoinGeckoClient::new()?;
    let prices = price_source
        .fetch_prices()
        .await
        .context("Could not fetch USD prices — aborting session")?;
    info!(prices = %prices, source = price_source.name(), "USD prices fetched");

    // -- Run the session ---------------------------------------------------

    let session = MiningSession::new(&cfg, &explorer, prices);
    let outcome = session
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    // -- Final summary -----------------------------------------------------

    println!();
    println!("Mining / portfolio session done");
    println!("{}", outcome.summary);

    match outcome.snapshots.last() {
        Some(last) => {
            let liquidation = LiquidationReport::new(last.total_usd, cfg.target_usd);
            println!("  Final total (ETH + XYO): ${:.2}", last.total_usd);
            println!("  {liquidation}");

            let path = report::write_report(&outcome.snapshots, None)?;
            info!(path = %path.display(), "CSV report written");
        }
        None => {
            warn!("No successful balance samples recorded; no CSV created");
        }
    }

    info!("All mining/portfolio operations completed.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("xyo_miner=info"));

    let json_logging = std::env::var("XYO_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}

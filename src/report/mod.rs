//! Session report output.
//!
//! Writes one CSV file per session under `reports/`. The report is small
//! and written once after the loop ends, so plain `std::fs` writes are
//! sufficient.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::PortfolioSnapshot;

/// Default directory for session reports.
const REPORTS_DIR: &str = "reports";

const CSV_HEADER: &str =
    "timestamp_utc,wallet,eth_balance,eth_usd,xyo_balance,xyo_usd,total_usd";

/// Write a CSV report for this session and return the file path.
///
/// `dir` overrides the default `reports/` directory (used by tests).
/// The directory is created if it does not exist.
pub fn write_report(snapshots: &[PortfolioSnapshot], dir: Option<&str>) -> Result<PathBuf> {
    let dir = Path::new(dir.unwrap_or(REPORTS_DIR));
    fs::create_dir_all(dir)
        .context(format!("Failed to create report directory {}", dir.display()))?;

    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("portfolio_report_{stamp}.csv"));

    let mut out = String::with_capacity(CSV_HEADER.len() + snapshots.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for snap in snapshots {
        out.push_str(&format!(
            "{},{},{:.10},{:.2},{:.10},{:.2},{:.2}\n",
            snap.taken_at.format("%Y-%m-%d %H:%M:%S"),
            snap.wallet,
            snap.eth_balance,
            snap.eth_usd,
            snap.xyo_balance,
            snap.xyo_usd,
            snap.total_usd,
        ));
    }

    fs::write(&path, &out)
        .context(format!("Failed to write report to {}", path.display()))?;

    debug!(path = %path.display(), rows = snapshots.len(), "CSV report written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Report model and writer

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportError;

pub const REPORT_PREFIX: &str = "airdrop-report-";

/// One claimable (airdrop, wallet) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResult {
    /// Configured chain, omitted when the airdrop declares none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    pub airdrop: String,
    pub wallet: String,
    pub claimable_raw: String,
    pub claimable_formatted: Option<String>,
    pub token_symbol: Option<String>,
    pub decimals: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub airdrops_checked: usize,
    pub wallets_checked: usize,
    pub results_count: usize,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: String,
    pub meta: ReportMeta,
    pub results: Vec<ClaimResult>,
}

/// Accumulates rows during a run. Consumed by [`ReportBuilder::finish`].
#[derive(Debug)]
pub struct ReportBuilder {
    airdrops_checked: usize,
    wallets_checked: usize,
    dry_run: bool,
    results: Vec<ClaimResult>,
}

impl ReportBuilder {
    pub fn new(airdrops_checked: usize, wallets_checked: usize, dry_run: bool) -> Self {
        Self { airdrops_checked, wallets_checked, dry_run, results: Vec::new() }
    }

    pub fn push(&mut self, result: ClaimResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn finish(self, generated_at: DateTime<Utc>) -> Report {
        Report {
            generated_at: iso_timestamp(generated_at),
            meta: ReportMeta {
                airdrops_checked: self.airdrops_checked,
                wallets_checked: self.wallets_checked,
                results_count: self.results.len(),
                dry_run: self.dry_run,
            },
            results: self.results,
        }
    }
}

/// `2024-05-01T09:00:00.123Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `airdrop-report-2024-05-01T09-00-00-123Z.json`
pub fn report_file_name(started_at: DateTime<Utc>) -> String {
    let stamp = iso_timestamp(started_at).replace([':', '.'], "-");
    format!("{REPORT_PREFIX}{stamp}.json")
}

/// Serialize `report` into `dir` (created if absent) and return the path.
pub fn write_report(
    report: &Report,
    dir: &Path,
    started_at: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)
        .map_err(|source| ReportError::Write { path: dir.to_path_buf(), source })?;

    let path = dir.join(report_file_name(started_at));
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, content)
        .map_err(|source| ReportError::Write { path: path.clone(), source })?;

    info!("Wrote {}", path.display());
    Ok(path)
}

//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::publish::DEFAULT_SITE_REPORT;
use crate::scanner::ScanOptions;

pub const DEFAULT_CONFIG: &str = "config/airdrops.config.json";

#[derive(Parser, Debug)]
#[command(name = "airdrop-finder")]
#[command(about = "Check wallets for claimable airdrops and write a JSON report", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan wallets against the configured airdrops (default)
    Scan(ScanArgs),

    /// Copy the newest report to the static site's data directory
    Publish {
        /// Directory holding airdrop-report-*.json files
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Destination file read by the site
        #[arg(short, long, default_value = DEFAULT_SITE_REPORT)]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Only check airdrops whose name contains this (case-insensitive)
    #[arg(long = "airdrop", value_name = "NAME")]
    pub airdrop_filter: Option<String>,

    /// Comma-separated chain ids to check (e.g. base,optimism)
    #[arg(long = "chains", value_delimiter = ',', value_name = "CHAINS")]
    pub chains: Vec<String>,

    /// Check a single wallet instead of the wallets file
    #[arg(long, value_name = "ADDRESS")]
    pub wallet: Option<String>,

    /// JSON array of wallet addresses
    #[arg(long, value_name = "PATH")]
    pub wallets_file: Option<PathBuf>,

    /// Keep zero and below-threshold results in the report
    #[arg(long, default_value_t = false)]
    pub include_zero: bool,

    /// Skip contract calls; contract airdrops resolve to zero
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Minimum raw claimable amount for airdrops without their own threshold
    #[arg(long, value_name = "AMOUNT")]
    pub min_claimable: Option<String>,

    /// Directory for report files
    #[arg(long, value_name = "PATH")]
    pub report_dir: Option<PathBuf>,

    /// Airdrop config file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Directory snapshot paths are relative to
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Do not print the summary table
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl ScanArgs {
    /// Trimmed, lowercased chain ids with empty entries dropped.
    pub fn chain_filter(&self) -> Vec<String> {
        self.chains
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            airdrop_filter: self.airdrop_filter.clone().filter(|f| !f.is_empty()),
            chain_filter: self.chain_filter(),
            include_zero: self.include_zero,
            dry_run: self.dry_run,
            min_claimable: self.min_claimable.clone().filter(|m| !m.is_empty()),
        }
    }
}

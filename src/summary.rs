//! Terminal summary of a report

use colored::Colorize;

use crate::report::{ClaimResult, Report};

/// Rows shown under the headline metrics.
pub const MAX_ROWS: usize = 8;

pub fn print_summary(report: &Report) {
    println!();
    println!("{}", "Airdrop scan summary".bright_cyan().bold());
    println!("  Claimable entries: {}", report.meta.results_count.to_string().bright_green());
    println!("  Wallets checked:   {}", report.meta.wallets_checked);
    println!("  Airdrops checked:  {}", report.meta.airdrops_checked);
    println!("  Generated at:      {}", report.generated_at);
    if report.meta.dry_run {
        println!("  {}", "dry run: contract airdrops were not queried".yellow());
    }

    if report.results.is_empty() {
        return;
    }

    println!();
    for row in top_rows(report) {
        println!(
            "  {:<10} {:<24} {:<42} {}",
            row.chain.as_deref().unwrap_or("-"),
            row.airdrop,
            row.wallet,
            display_amount(row).bright_green()
        );
    }
    if report.results.len() > MAX_ROWS {
        println!("  ... and {} more", report.results.len() - MAX_ROWS);
    }
}

pub fn top_rows(report: &Report) -> &[ClaimResult] {
    &report.results[..report.results.len().min(MAX_ROWS)]
}

/// Formatted amount with symbol when known, raw amount otherwise.
pub fn display_amount(row: &ClaimResult) -> String {
    let amount = row.claimable_formatted.as_deref().unwrap_or(&row.claimable_raw);
    match &row.token_symbol {
        Some(symbol) => format!("{} {}", amount, symbol),
        None => amount.to_string(),
    }
}

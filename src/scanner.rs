//! Sequential scan over (airdrop, wallet) pairs

use chrono::Utc;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::address::normalize_address;
use crate::amount::{format_units, should_include};
use crate::config::{AirdropDefinition, AirdropKind};
use crate::contract::ContractCaller;
use crate::report::{ClaimResult, Report, ReportBuilder};
use crate::resolver::AirdropResolver;

/// Per-run switches from the command line.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Case-insensitive substring of the airdrop name.
    pub airdrop_filter: Option<String>,
    /// Lowercased chain ids; empty means every chain.
    pub chain_filter: Vec<String>,
    pub include_zero: bool,
    pub dry_run: bool,
    /// Used when an airdrop has no `minClaimable` of its own.
    pub min_claimable: Option<String>,
}

impl ScanOptions {
    /// Enabled airdrops matching the chain and name filters, in config order.
    pub fn select<'a>(&self, airdrops: &'a [AirdropDefinition]) -> Vec<&'a AirdropDefinition> {
        let name_filter = self
            .airdrop_filter
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);
        airdrops
            .iter()
            .filter(|a| a.enabled)
            .filter(|a| {
                self.chain_filter.is_empty()
                    || self.chain_filter.contains(&a.chain_label().to_lowercase())
            })
            .filter(|a| match &name_filter {
                Some(filter) => {
                    !a.name.is_empty() && a.name.to_lowercase().contains(filter.as_str())
                }
                None => true,
            })
            .collect()
    }
}

pub struct Scanner<C> {
    resolver: AirdropResolver<C>,
    options: ScanOptions,
}

impl<C: ContractCaller> Scanner<C> {
    pub fn new(resolver: AirdropResolver<C>, options: ScanOptions) -> Self {
        Self { resolver, options }
    }

    /// Resolve every wallet against every airdrop, one pair at a time.
    pub async fn run(&self, airdrops: &[&AirdropDefinition], wallets: &[String]) -> Report {
        let mut report = ReportBuilder::new(airdrops.len(), wallets.len(), self.options.dry_run);

        for airdrop in airdrops {
            info!(
                "Scanning {} ({}) on {} for {} wallets",
                airdrop.name,
                airdrop.type_name(),
                airdrop.chain_id(),
                wallets.len()
            );

            for wallet in wallets {
                let wallet = normalize_address(wallet);
                let raw = match self.resolver.resolve(airdrop, &wallet).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        // A failed pair moves straight on, without the rate-limit delay.
                        warn!(
                            airdrop = %airdrop.name,
                            chain = %airdrop.chain_id(),
                            %wallet,
                            "error: {}", e
                        );
                        continue;
                    }
                };

                if let Some(result) = self.evaluate(airdrop, &wallet, raw) {
                    report.push(result);
                }

                if let AirdropKind::Contract(source) = &airdrop.kind {
                    if let Some(delay) = source.rate_limit {
                        sleep(delay).await;
                    }
                }
            }
        }

        info!("Scan finished with {} results", report.len());
        report.finish(Utc::now())
    }

    /// Apply the inclusion rule to a resolved amount.
    fn evaluate(
        &self,
        airdrop: &AirdropDefinition,
        wallet: &str,
        raw: String,
    ) -> Option<ClaimResult> {
        let threshold = airdrop
            .min_claimable
            .as_deref()
            .or(self.options.min_claimable.as_deref());

        if !should_include(Some(&raw), self.options.include_zero, threshold) {
            info!(airdrop = %airdrop.name, chain = %airdrop.chain_id(), %wallet, "no");
            return None;
        }

        info!(airdrop = %airdrop.name, chain = %airdrop.chain_id(), %wallet, "claimable: {}", raw);
        Some(ClaimResult {
            chain: airdrop.chain.clone(),
            airdrop: airdrop.name.clone(),
            wallet: wallet.to_string(),
            claimable_formatted: format_units(&raw, airdrop.decimals),
            claimable_raw: raw,
            token_symbol: airdrop.symbol.clone(),
            decimals: airdrop.decimals,
        })
    }
}

//! Airdrop Finder CLI

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airdrop_finder::cli::{Cli, Command, ScanArgs};
use airdrop_finder::config::AirdropsConfig;
use airdrop_finder::contract::RpcContractCaller;
use airdrop_finder::publish::publish_latest;
use airdrop_finder::report::write_report;
use airdrop_finder::resolver::AirdropResolver;
use airdrop_finder::scanner::Scanner;
use airdrop_finder::settings::Settings;
use airdrop_finder::snapshot::SnapshotStore;
use airdrop_finder::summary::print_summary;
use airdrop_finder::wallets::WalletSource;
use airdrop_finder::webhook::WebhookClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to read environment settings")?;

    match cli.command {
        Some(Command::Publish { reports_dir, out }) => {
            let reports_dir = reports_dir.unwrap_or_else(|| settings.report_dir());
            publish_latest(&reports_dir, &out)?;
        }
        Some(Command::Scan(args)) => scan(args, &settings).await?,
        None => scan(cli.scan, &settings).await?,
    }

    Ok(())
}

async fn scan(args: ScanArgs, settings: &Settings) -> Result<()> {
    let started_at = Utc::now();
    let options = args.scan_options();

    let config = AirdropsConfig::load(&args.config)?;
    info!("Loaded {} airdrops from {}", config.airdrops.len(), args.config.display());

    let wallets = WalletSource::resolve(
        args.wallet.as_deref(),
        args.wallets_file.as_deref(),
        settings.wallets_file().as_deref(),
    )
    .load()?;

    let airdrops = options.select(&config.airdrops);
    let snapshots = SnapshotStore::load_for(args.base_dir.clone(), airdrops.iter().copied())?;
    let endpoints = settings.rpc_endpoints(&config.rpcs);
    info!(
        "Checking {} airdrops for {} wallets (dry run: {})",
        airdrops.len(),
        wallets.len(),
        options.dry_run
    );

    let resolver = AirdropResolver::new(RpcContractCaller, endpoints, snapshots, options.dry_run);
    let report = Scanner::new(resolver, options).run(&airdrops, &wallets).await;

    let report_dir = args.report_dir.clone().unwrap_or_else(|| settings.report_dir());
    write_report(&report, &report_dir, started_at).context("Failed to write report")?;

    if let Some(url) = settings.webhook_url() {
        if let Err(e) = WebhookClient::new(url).post_report(&report).await {
            error!("{}", e);
        }
    }

    if !args.quiet {
        print_summary(&report);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

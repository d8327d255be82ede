//! Airdrop Finder
//!
//! Checks a list of wallets against configured airdrop sources (on-chain view
//! calls or static snapshot files) and writes the claimable amounts to a
//! timestamped JSON report.

pub mod address;
pub mod amount;
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod publish;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod settings;
pub mod snapshot;
pub mod summary;
pub mod wallets;
pub mod webhook;

pub use error::{ConfigError, FinderError, ReportError, ResolveError, Result};

//! Wallet list resolution

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{FinderError, Result};

pub const DEFAULT_WALLETS_FILE: &str = "data/wallets.json";

/// Where the wallet list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletSource {
    Single(String),
    File(PathBuf),
}

impl WalletSource {
    /// A single `--wallet` wins, then `--wallets-file`, then `WALLETS_FILE`,
    /// then the default file.
    pub fn resolve(wallet: Option<&str>, cli_file: Option<&Path>, env_file: Option<&Path>) -> Self {
        if let Some(wallet) = wallet.filter(|w| !w.is_empty()) {
            return Self::Single(wallet.to_string());
        }
        let path = cli_file
            .or(env_file)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WALLETS_FILE));
        Self::File(path)
    }

    /// Wallets in list order. Duplicates are kept; a missing file is an empty
    /// list.
    pub fn load(&self) -> Result<Vec<String>> {
        match self {
            Self::Single(wallet) => Ok(vec![wallet.clone()]),
            Self::File(path) => {
                if !path.exists() {
                    warn!("Wallets file {} not found, no wallets to check", path.display());
                    return Ok(Vec::new());
                }
                let content = std::fs::read_to_string(path).map_err(|e| FinderError::io(path, e))?;
                let wallets: Vec<String> =
                    serde_json::from_str(&content).map_err(|e| FinderError::json(path, e))?;
                info!("Loaded {} wallets from {}", wallets.len(), path.display());
                Ok(wallets)
            }
        }
    }
}

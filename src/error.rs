//! Error types for the airdrop finder

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, FinderError>;

/// Fatal errors. Any of these aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems with the airdrop config document or the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing config file {0}")]
    Missing(PathBuf),

    #[error("Invalid airdrop '{name}': {reason}")]
    InvalidAirdrop { name: String, reason: String },

    #[error("Environment error: {0}")]
    Environment(#[from] ::config::ConfigError),
}

/// Per (airdrop, wallet) failures. Logged as "error", never fatal.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No RPC endpoint configured for chain '{0}'")]
    MissingRpc(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Unsupported airdrop type '{0}'")]
    UnsupportedType(String),

    #[error("Misconfigured airdrop: {0}")]
    Misconfigured(String),
}

/// Report output failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Webhook delivery failed: {0}")]
    Webhook(String),
}

impl FinderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

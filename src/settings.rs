//! Environment settings

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_REPORT_DIR: &str = "reports";

/// Chain ids backed by a dedicated environment variable.
pub const ENV_CHAINS: [(&str, &str); 3] = [
    ("base", "BASE_RPC"),
    ("optimism", "OP_RPC"),
    ("arbitrum", "ARBITRUM_RPC"),
];

/// Values read from the process environment (after `.env` is applied).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub base_rpc: Option<String>,
    pub op_rpc: Option<String>,
    pub arbitrum_rpc: Option<String>,
    pub report_dir: Option<String>,
    pub reports_dir: Option<String>,
    pub scan_webhook_url: Option<String>,
    pub reward_webhook: Option<String>,
    pub wallets_file: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            // Optional local overrides
            .add_source(::config::File::with_name("airdrop-finder").required(false))
            // Environment variables, keys lowercased (BASE_RPC -> base_rpc)
            .add_source(::config::Environment::default().try_parsing(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Chain id -> RPC endpoint. Environment variables win over `extra`.
    pub fn rpc_endpoints(&self, extra: &HashMap<String, String>) -> HashMap<String, String> {
        let mut endpoints: HashMap<String, String> = extra
            .iter()
            .filter(|(_, url)| !url.is_empty())
            .map(|(chain, url)| (chain.to_lowercase(), url.clone()))
            .collect();

        let from_env = [&self.base_rpc, &self.op_rpc, &self.arbitrum_rpc];
        for ((chain, _), url) in ENV_CHAINS.iter().zip(from_env) {
            if let Some(url) = non_empty(url) {
                endpoints.insert(chain.to_string(), url);
            }
        }
        endpoints
    }

    /// `REPORT_DIR`, then `REPORTS_DIR`, then `reports`.
    pub fn report_dir(&self) -> PathBuf {
        non_empty(&self.report_dir)
            .or_else(|| non_empty(&self.reports_dir))
            .unwrap_or_else(|| DEFAULT_REPORT_DIR.to_string())
            .into()
    }

    /// `SCAN_WEBHOOK_URL`, then `REWARD_WEBHOOK`.
    pub fn webhook_url(&self) -> Option<String> {
        non_empty(&self.scan_webhook_url).or_else(|| non_empty(&self.reward_webhook))
    }

    pub fn wallets_file(&self) -> Option<PathBuf> {
        non_empty(&self.wallets_file).map(PathBuf::from)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_rpcs_override_config_rpcs() {
        let settings = Settings {
            base_rpc: Some("https://base.example".to_string()),
            op_rpc: Some(String::new()),
            ..Default::default()
        };
        let extra = HashMap::from([
            ("Base".to_string(), "https://stale.example".to_string()),
            ("zora".to_string(), "https://zora.example".to_string()),
        ]);

        let endpoints = settings.rpc_endpoints(&extra);
        assert_eq!(endpoints["base"], "https://base.example");
        assert_eq!(endpoints["zora"], "https://zora.example");
        assert!(!endpoints.contains_key("optimism"));
        assert!(!endpoints.contains_key("arbitrum"));
    }

    #[test]
    fn test_report_dir_fallbacks() {
        assert_eq!(Settings::default().report_dir(), PathBuf::from(DEFAULT_REPORT_DIR));

        let settings = Settings { reports_dir: Some("out".to_string()), ..Default::default() };
        assert_eq!(settings.report_dir(), PathBuf::from("out"));

        let settings = Settings {
            report_dir: Some("primary".to_string()),
            reports_dir: Some("out".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.report_dir(), PathBuf::from("primary"));
    }

    #[test]
    fn test_webhook_fallback() {
        let settings = Settings { reward_webhook: Some("https://hook".to_string()), ..Default::default() };
        assert_eq!(settings.webhook_url().as_deref(), Some("https://hook"));
        assert_eq!(Settings::default().webhook_url(), None);
    }
}

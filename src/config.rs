//! Airdrop config document
//!
//! The on-disk shape is loose (camelCase keys, optional fields, values that
//! may be strings or numbers). It is read into [`RawAirdrop`] and converted
//! into [`AirdropDefinition`] once, at load time. Type-specific fields that do
//! not validate become [`AirdropKind::Misconfigured`]; only a selected
//! airdrop can fail the run (see [`AirdropDefinition::ensure_runnable`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::Function;
use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, FinderError, Result};

pub const DEFAULT_CHAIN: &str = "base";
pub const DEFAULT_METHOD: &str = "claimable(address)";
pub const DEFAULT_RETURN_TYPE: &str = "uint256";
pub const DEFAULT_ADDRESS_FIELD: &str = "wallet";
pub const DEFAULT_AMOUNT_FIELD: &str = "amount";

/// Placeholder tokens replaced by the queried wallet in `args`.
const WALLET_PLACEHOLDERS: [&str; 2] = ["wallet", "$wallet"];

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    airdrops: Vec<Option<RawAirdrop>>,
    #[serde(default)]
    rpcs: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAirdrop {
    name: Option<String>,
    chain: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    enabled: Option<bool>,
    symbol: Option<String>,
    decimals: Option<Value>,
    min_claimable: Option<Value>,
    contract: Option<String>,
    method: Option<String>,
    return_type: Option<String>,
    args: Option<Vec<Value>>,
    rate_limit_ms: Option<Value>,
    snapshot_file: Option<String>,
    snapshot_address_field: Option<String>,
    snapshot_amount_field: Option<String>,
}

/// Parsed config document.
#[derive(Debug, Clone)]
pub struct AirdropsConfig {
    pub airdrops: Vec<AirdropDefinition>,
    /// Extra chain -> RPC URL entries; environment variables take precedence.
    pub rpcs: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct AirdropDefinition {
    /// Empty when the entry has no name.
    pub name: String,
    /// As configured. [`AirdropDefinition::chain_id`] applies the default.
    pub chain: Option<String>,
    pub enabled: bool,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub min_claimable: Option<String>,
    pub kind: AirdropKind,
}

#[derive(Debug, Clone)]
pub enum AirdropKind {
    Contract(ContractSource),
    Snapshot(SnapshotSource),
    /// A `type` this tool does not know. Every wallet resolves to an error.
    Unsupported(String),
    Misconfigured(Misconfigured),
}

/// A known `type` whose fields did not validate.
#[derive(Debug, Clone)]
pub struct Misconfigured {
    pub kind: String,
    pub reason: String,
    /// Abort the run when the airdrop is selected instead of failing each wallet.
    pub fatal: bool,
}

#[derive(Debug, Clone)]
pub struct ContractSource {
    pub address: Address,
    pub function: Function,
    pub args: Vec<CallArg>,
    pub rate_limit: Option<Duration>,
}

/// One templated call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// Substituted with the queried wallet, coerced to the declared input type.
    Wallet(DynSolType),
    Literal(DynSolValue),
}

#[derive(Debug, Clone)]
pub struct SnapshotSource {
    pub file: PathBuf,
    /// Entry key holding the address in array snapshots. Falls back to
    /// `address`, then `wallet`.
    pub address_field: String,
    /// Entry key holding the amount in array snapshots. Falls back to
    /// `amount`, then `claimable`, then `"1"`.
    pub amount_field: String,
}

impl AirdropsConfig {
    /// Load the config file. A missing file or malformed JSON is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path).map_err(|e| FinderError::io(path, e))?;
        Self::from_json(&content).map_err(|e| match e {
            FinderError::Json { source, .. } => FinderError::json(path, source),
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_str(content).map_err(|e| FinderError::json("<config>", e))?;

        let airdrops = raw.airdrops.into_iter().flatten().map(AirdropDefinition::from).collect();

        let rpcs = raw
            .rpcs
            .into_iter()
            .map(|(chain, url)| (chain.to_lowercase(), url))
            .collect();

        Ok(Self { airdrops, rpcs })
    }
}

impl AirdropDefinition {
    /// Lowercased chain id for RPC lookup, `base` when none is configured.
    pub fn chain_id(&self) -> String {
        self.chain
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHAIN)
            .to_lowercase()
    }

    /// Configured chain for display, empty when absent.
    pub fn chain_label(&self) -> &str {
        self.chain.as_deref().unwrap_or_default()
    }

    pub fn type_name(&self) -> &str {
        match &self.kind {
            AirdropKind::Contract(_) => "contract",
            AirdropKind::Snapshot(_) => "snapshot",
            AirdropKind::Unsupported(kind) => kind,
            AirdropKind::Misconfigured(m) => &m.kind,
        }
    }

    /// Fails for a selected airdrop that cannot be scanned at all.
    pub fn ensure_runnable(&self) -> std::result::Result<(), ConfigError> {
        match &self.kind {
            AirdropKind::Misconfigured(m) if m.fatal => Err(ConfigError::InvalidAirdrop {
                name: self.name.clone(),
                reason: m.reason.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl From<RawAirdrop> for AirdropDefinition {
    fn from(raw: RawAirdrop) -> Self {
        let kind = match raw.kind.as_deref() {
            Some("contract") => contract_source(&raw).map_or_else(
                |reason| misconfigured("contract", reason, false),
                AirdropKind::Contract,
            ),
            Some("snapshot") => snapshot_source(&raw).map_or_else(
                |reason| misconfigured("snapshot", reason, true),
                AirdropKind::Snapshot,
            ),
            Some(other) => AirdropKind::Unsupported(other.to_string()),
            None => AirdropKind::Unsupported(String::new()),
        };

        Self {
            name: raw.name.unwrap_or_default(),
            chain: raw.chain,
            enabled: raw.enabled.unwrap_or(true),
            symbol: raw.symbol,
            // Unusable decimals only lose the formatted amount.
            decimals: raw.decimals.as_ref().and_then(parse_decimals),
            min_claimable: raw.min_claimable.as_ref().and_then(scalar_to_string),
            kind,
        }
    }
}

fn contract_source(raw: &RawAirdrop) -> std::result::Result<ContractSource, String> {
    let address = raw
        .contract
        .as_deref()
        .ok_or("missing contract address")?
        .parse::<Address>()
        .map_err(|e| format!("invalid contract address: {e}"))?;

    let method = raw.method.as_deref().unwrap_or(DEFAULT_METHOD);
    let return_type = raw.return_type.as_deref().unwrap_or(DEFAULT_RETURN_TYPE);
    let function = Function::parse(&format!("function {method} view returns ({return_type})"))
        .map_err(|e| format!("invalid method '{method}' returning '{return_type}': {e}"))?;

    let raw_args = raw
        .args
        .clone()
        .unwrap_or_else(|| vec![Value::String(WALLET_PLACEHOLDERS[0].to_string())]);

    if raw_args.len() != function.inputs.len() {
        return Err(format!(
            "method '{}' takes {} argument(s), {} configured",
            function.signature(),
            function.inputs.len(),
            raw_args.len()
        ));
    }

    let args = raw_args
        .iter()
        .zip(&function.inputs)
        .map(|(arg, param)| {
            let ty = param
                .resolve()
                .map_err(|e| format!("unsupported parameter type '{}': {e}", param.ty))?;
            let text = scalar_to_string(arg).unwrap_or_default();
            if WALLET_PLACEHOLDERS.contains(&text.as_str()) {
                return Ok(CallArg::Wallet(ty));
            }
            ty.coerce_str(&text)
                .map(CallArg::Literal)
                .map_err(|e| format!("argument '{text}' is not a valid {ty}: {e}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let rate_limit = raw
        .rate_limit_ms
        .as_ref()
        .and_then(scalar_to_string)
        .map(|ms| {
            ms.trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid rateLimitMs '{ms}'"))
        })
        .transpose()?
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis);

    Ok(ContractSource { address, function, args, rate_limit })
}

fn snapshot_source(raw: &RawAirdrop) -> std::result::Result<SnapshotSource, String> {
    let file = raw
        .snapshot_file
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or("missing snapshotFile")?;

    Ok(SnapshotSource {
        file: PathBuf::from(file),
        address_field: raw
            .snapshot_address_field
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS_FIELD.to_string()),
        amount_field: raw
            .snapshot_amount_field
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_AMOUNT_FIELD.to_string()),
    })
}

fn parse_decimals(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u8::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strings pass through, numbers and booleans are stringified, empty values
/// (`null`, `""`) are treated as absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn misconfigured(kind: &str, reason: impl Into<String>, fatal: bool) -> AirdropKind {
    AirdropKind::Misconfigured(Misconfigured {
        kind: kind.to_string(),
        reason: reason.into(),
        fatal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "airdrops": [
            {
                "name": "Base Rewards",
                "chain": "base",
                "type": "contract",
                "contract": "0x1111111111111111111111111111111111111111",
                "decimals": 18,
                "symbol": "RWD",
                "rateLimitMs": 250,
                "minClaimable": 1000
            },
            {
                "name": "Retro Snapshot",
                "chain": "optimism",
                "type": "snapshot",
                "snapshotFile": "data/snapshots/retro.json",
                "snapshotAddressField": "addr",
                "enabled": false
            },
            {
                "name": "Mystery",
                "type": "merkle"
            }
        ]
    }"#;

    #[test]
    fn test_load_typed_definitions() {
        let config = AirdropsConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.airdrops.len(), 3);

        let base = &config.airdrops[0];
        assert_eq!(base.decimals, Some(18));
        assert_eq!(base.min_claimable.as_deref(), Some("1000"));
        assert!(base.enabled);
        match &base.kind {
            AirdropKind::Contract(source) => {
                assert_eq!(source.function.name, "claimable");
                assert_eq!(source.function.outputs[0].ty, "uint256");
                assert_eq!(source.args, vec![CallArg::Wallet(DynSolType::Address)]);
                assert_eq!(source.rate_limit, Some(Duration::from_millis(250)));
            }
            other => panic!("expected contract airdrop, got {other:?}"),
        }

        let retro = &config.airdrops[1];
        assert!(!retro.enabled);
        match &retro.kind {
            AirdropKind::Snapshot(source) => {
                assert_eq!(source.address_field, "addr");
                assert_eq!(source.amount_field, DEFAULT_AMOUNT_FIELD);
            }
            other => panic!("expected snapshot airdrop, got {other:?}"),
        }

        let mystery = &config.airdrops[2];
        assert_eq!(mystery.chain, None);
        assert_eq!(mystery.chain_label(), "");
        assert_eq!(mystery.chain_id(), DEFAULT_CHAIN);
        assert!(matches!(&mystery.kind, AirdropKind::Unsupported(kind) if kind == "merkle"));
    }

    #[test]
    fn test_literal_args_are_coerced() {
        let config = AirdropsConfig::from_json(
            r#"{"airdrops": [{
                "name": "Seasonal",
                "type": "contract",
                "contract": "0x1111111111111111111111111111111111111111",
                "method": "claimableFor(uint256,address)",
                "returnType": "bool",
                "args": [3, "$wallet"]
            }]}"#,
        )
        .unwrap();

        let AirdropKind::Contract(source) = &config.airdrops[0].kind else {
            panic!("expected contract airdrop");
        };
        assert_eq!(
            source.args,
            vec![
                CallArg::Literal(DynSolValue::Uint(alloy_primitives::U256::from(3), 256)),
                CallArg::Wallet(DynSolType::Address),
            ]
        );
        assert_eq!(source.rate_limit, None);
    }

    fn single(airdrop: &str) -> AirdropDefinition {
        AirdropsConfig::from_json(&format!(r#"{{"airdrops": [{airdrop}]}}"#))
            .unwrap()
            .airdrops
            .remove(0)
    }

    #[test]
    fn test_argument_count_mismatch_fails_per_wallet() {
        let broken = single(
            r#"{"name": "Broken", "type": "contract",
                "contract": "0x1111111111111111111111111111111111111111",
                "args": ["wallet", "extra"]}"#,
        );
        match &broken.kind {
            AirdropKind::Misconfigured(m) => {
                assert!(m.reason.contains("argument"));
                assert!(!m.fatal);
            }
            other => panic!("expected misconfigured airdrop, got {other:?}"),
        }
        assert_eq!(broken.type_name(), "contract");
        assert!(broken.ensure_runnable().is_ok());
    }

    #[test]
    fn test_invalid_contract_address_fails_per_wallet() {
        let bad = single(r#"{"name": "Bad", "type": "contract", "contract": "0x123"}"#);
        assert!(matches!(&bad.kind, AirdropKind::Misconfigured(m) if m.reason.contains("address")));
        assert!(bad.ensure_runnable().is_ok());
    }

    #[test]
    fn test_disabled_placeholder_does_not_block_load() {
        let config = AirdropsConfig::from_json(
            r#"{"airdrops": [
                {"name": "Placeholder", "type": "contract", "enabled": false},
                {"type": "snapshot", "enabled": false, "decimals": "lots"},
                {"name": "Live", "type": "snapshot", "snapshotFile": "x.json"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(config.airdrops.len(), 3);
        assert!(!config.airdrops[0].enabled);
        assert_eq!(config.airdrops[1].name, "");
        assert_eq!(config.airdrops[1].decimals, None);
        assert!(matches!(config.airdrops[2].kind, AirdropKind::Snapshot(_)));
    }

    #[test]
    fn test_snapshot_without_file_is_fatal_once_selected() {
        let no_file = single(r#"{"name": "NoFile", "type": "snapshot"}"#);
        let err = no_file.ensure_runnable().unwrap_err();
        assert!(matches!(&err, ConfigError::InvalidAirdrop { name, .. } if name == "NoFile"));
        assert!(err.to_string().contains("snapshotFile"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = AirdropsConfig::load(Path::new("/nonexistent/airdrops.config.json")).unwrap_err();
        assert!(matches!(err, FinderError::Config(ConfigError::Missing(_))));
    }
}

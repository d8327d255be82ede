//! Snapshot documents and wallet lookup
//!
//! A snapshot is either a mapping `{ "<wallet>": "<amount>" }` or an array
//! whose entries are plain wallet strings or objects carrying an address and
//! an amount field.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{AirdropDefinition, AirdropKind, SnapshotSource};
use crate::error::{FinderError, Result};

const ZERO: &str = "0";
const PRESENT: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Mapping(Map<String, Value>),
    List(Vec<Value>),
    /// Missing file or a JSON document that is neither array nor object.
    Empty,
}

impl Snapshot {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::Array(entries) => Self::List(entries),
            _ => Self::Empty,
        }
    }

    /// Read a snapshot file. A missing file is an empty snapshot; malformed
    /// JSON is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Snapshot file {} not found, every wallet resolves to 0", path.display());
            return Ok(Self::Empty);
        }
        let content = std::fs::read_to_string(path).map_err(|e| FinderError::io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| FinderError::json(path, e))?;
        Ok(Self::from_value(value))
    }

    /// Raw claimable amount for `wallet`, `"0"` when absent.
    pub fn claimable(&self, wallet: &str, source: &SnapshotSource) -> String {
        let wallet_lower = wallet.to_lowercase();
        match self {
            Self::Mapping(map) => map
                .get(wallet)
                .and_then(amount_value)
                .or_else(|| map.get(&wallet_lower).and_then(amount_value))
                .unwrap_or_else(|| ZERO.to_string()),
            Self::List(entries) => entries
                .iter()
                .find_map(|entry| match_entry(entry, &wallet_lower, source))
                .unwrap_or_else(|| ZERO.to_string()),
            Self::Empty => ZERO.to_string(),
        }
    }
}

fn match_entry(entry: &Value, wallet_lower: &str, source: &SnapshotSource) -> Option<String> {
    match entry {
        Value::String(address) if address.to_lowercase() == wallet_lower => {
            Some(PRESENT.to_string())
        }
        Value::Object(fields) => {
            let address = [source.address_field.as_str(), "address", "wallet"]
                .iter()
                .find_map(|key| {
                    fields.get(*key).and_then(Value::as_str).filter(|a| !a.is_empty())
                })?;
            if address.to_lowercase() != wallet_lower {
                return None;
            }
            let amount = [source.amount_field.as_str(), "amount", "claimable"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(amount_value))
                .unwrap_or_else(|| PRESENT.to_string());
            Some(amount)
        }
        _ => None,
    }
}

/// Empty strings, zero, `null` and `false` count as absent so the lookup
/// falls through to the next candidate.
fn amount_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some(PRESENT.to_string()),
        _ => None,
    }
}

/// Snapshots for the selected airdrops, loaded once before any wallet is
/// processed.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    base_dir: PathBuf,
    snapshots: HashMap<PathBuf, Snapshot>,
}

impl SnapshotStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into(), snapshots: HashMap::new() }
    }

    /// Load every snapshot the selected airdrops reference. A selected
    /// snapshot airdrop without a file aborts here.
    pub fn load_for<'a>(
        base_dir: impl Into<PathBuf>,
        airdrops: impl IntoIterator<Item = &'a AirdropDefinition>,
    ) -> Result<Self> {
        let mut store = Self::new(base_dir);
        for airdrop in airdrops {
            airdrop.ensure_runnable()?;
            if let AirdropKind::Snapshot(source) = &airdrop.kind {
                store.load(&source.file)?;
            }
        }
        Ok(store)
    }

    pub fn load(&mut self, file: &Path) -> Result<&Snapshot> {
        let path = self.base_dir.join(file);
        if !self.snapshots.contains_key(&path) {
            let snapshot = Snapshot::load(&path)?;
            debug!("Loaded snapshot {}", path.display());
            self.snapshots.insert(path.clone(), snapshot);
        }
        Ok(&self.snapshots[&path])
    }

    pub fn insert(&mut self, file: impl AsRef<Path>, snapshot: Snapshot) {
        self.snapshots.insert(self.base_dir.join(file), snapshot);
    }

    pub fn get(&self, file: &Path) -> Option<&Snapshot> {
        self.snapshots.get(&self.base_dir.join(file))
    }
}

//! Per (airdrop, wallet) claimable amount resolution

use std::collections::HashMap;

use tracing::debug;

use crate::config::{AirdropDefinition, AirdropKind, CallArg, ContractSource};
use crate::contract::{normalize_output, ContractCall, ContractCaller};
use crate::error::ResolveError;
use crate::snapshot::{Snapshot, SnapshotStore};

pub struct AirdropResolver<C> {
    caller: C,
    endpoints: HashMap<String, String>,
    snapshots: SnapshotStore,
    dry_run: bool,
}

impl<C: ContractCaller> AirdropResolver<C> {
    pub fn new(
        caller: C,
        endpoints: HashMap<String, String>,
        snapshots: SnapshotStore,
        dry_run: bool,
    ) -> Self {
        Self { caller, endpoints, snapshots, dry_run }
    }

    /// Raw claimable amount for `wallet`, which is expected to be normalized
    /// already. Boolean methods and plain snapshot lists yield `"1"`/`"0"`.
    pub async fn resolve(
        &self,
        airdrop: &AirdropDefinition,
        wallet: &str,
    ) -> Result<String, ResolveError> {
        match &airdrop.kind {
            AirdropKind::Snapshot(source) => {
                let raw = match self.snapshots.get(&source.file) {
                    Some(snapshot) => snapshot.claimable(wallet, source),
                    None => Snapshot::Empty.claimable(wallet, source),
                };
                Ok(raw)
            }
            AirdropKind::Contract(source) => self.resolve_contract(airdrop, source, wallet).await,
            AirdropKind::Unsupported(kind) => Err(ResolveError::UnsupportedType(kind.clone())),
            // Dry runs never read contract fields.
            AirdropKind::Misconfigured(m) if self.dry_run && m.kind == "contract" => {
                Ok("0".to_string())
            }
            AirdropKind::Misconfigured(m) => Err(ResolveError::Misconfigured(m.reason.clone())),
        }
    }

    async fn resolve_contract(
        &self,
        airdrop: &AirdropDefinition,
        source: &ContractSource,
        wallet: &str,
    ) -> Result<String, ResolveError> {
        if self.dry_run {
            return Ok("0".to_string());
        }

        let chain = airdrop.chain_id();
        let rpc_url = self
            .endpoints
            .get(&chain)
            .ok_or_else(|| ResolveError::MissingRpc(chain.clone()))?;

        let args = source
            .args
            .iter()
            .map(|arg| match arg {
                CallArg::Wallet(ty) => ty.coerce_str(wallet).map_err(|e| {
                    ResolveError::ContractCall(format!(
                        "Wallet '{}' is not a valid {}: {}",
                        wallet, ty, e
                    ))
                }),
                CallArg::Literal(value) => Ok(value.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Calling {} on {} ({})", source.function.signature(), source.address, chain);

        let outputs = self
            .caller
            .call(ContractCall {
                rpc_url,
                address: source.address,
                function: &source.function,
                args,
            })
            .await?;

        normalize_output(&outputs)
    }
}

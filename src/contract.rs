//! Read-only contract calls over JSON-RPC

use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tracing::debug;

use crate::error::ResolveError;

/// A fully templated view call.
#[derive(Debug, Clone)]
pub struct ContractCall<'a> {
    pub rpc_url: &'a str,
    pub address: Address,
    pub function: &'a Function,
    pub args: Vec<DynSolValue>,
}

/// Seam between the resolver and the network.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Execute the call and return the decoded outputs.
    async fn call(&self, call: ContractCall<'_>) -> Result<Vec<DynSolValue>, ResolveError>;
}

/// `eth_call` through a fresh HTTP provider per request.
#[derive(Debug, Default, Clone)]
pub struct RpcContractCaller;

#[async_trait]
impl ContractCaller for RpcContractCaller {
    async fn call(&self, call: ContractCall<'_>) -> Result<Vec<DynSolValue>, ResolveError> {
        let url: reqwest::Url = call
            .rpc_url
            .parse()
            .map_err(|e| ResolveError::ContractCall(format!("Invalid RPC URL: {}", e)))?;

        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url);

        let calldata = call
            .function
            .abi_encode_input(&call.args)
            .map_err(|e| ResolveError::ContractCall(format!("Failed to encode arguments: {}", e)))?;

        let tx = TransactionRequest::default()
            .with_to(call.address)
            .with_input(calldata);

        debug!("eth_call {} on {}", call.function.signature(), call.address);

        let output = provider
            .call(tx)
            .await
            .map_err(|e| ResolveError::ContractCall(format!("eth_call failed: {}", e)))?;

        call.function
            .abi_decode_output(&output)
            .map_err(|e| ResolveError::ContractCall(format!("Failed to decode result: {}", e)))
    }
}

/// Render the first returned value as a raw amount string.
pub fn normalize_output(values: &[DynSolValue]) -> Result<String, ResolveError> {
    let value = values
        .first()
        .ok_or_else(|| ResolveError::ContractCall("Empty result".to_string()))?;

    match value {
        DynSolValue::Bool(flag) => Ok(if *flag { "1" } else { "0" }.to_string()),
        DynSolValue::Uint(n, _) => Ok(n.to_string()),
        DynSolValue::Int(n, _) => Ok(n.to_string()),
        DynSolValue::Address(a) => Ok(a.to_checksum(None)),
        DynSolValue::String(s) => Ok(s.clone()),
        other => Err(ResolveError::ContractCall(format!("Unsupported return value {:?}", other))),
    }
}

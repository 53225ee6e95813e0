//! Minimal EVM JSON-RPC client.
//!
//! Speaks the handful of `eth_*` methods the wallet needs: chain
//! identification, balance reads, submission through a node-managed
//! account, and receipt lookups. Quantities travel as `0x`-prefixed hex
//! strings per the JSON-RPC convention.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::http::HttpClient;
use crate::domain::ClientError;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Receipt fields the confirmation watch cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct TxReceipt {
    /// Post-Byzantium execution status: `0x1` success, `0x0` revert.
    #[serde(default)]
    pub status: Option<String>,
    /// Block the transaction was included in.
    #[serde(default, rename = "blockNumber")]
    pub block_number: Option<String>,
}

impl TxReceipt {
    /// Returns `true` if the transaction executed successfully.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("0x1")
    }
}

// ============================================================================
// Quantity Helpers
// ============================================================================

/// Parses a `0x`-prefixed hex quantity.
pub(crate) fn parse_quantity(quantity: &str) -> Result<u128, ClientError> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .unwrap_or(quantity);
    u128::from_str_radix(digits, 16)
        .map_err(|_| ClientError::parse(format!("hex quantity '{quantity}'")))
}

/// Encodes a value as a `0x`-prefixed hex quantity.
pub(crate) fn to_quantity(value: u128) -> String {
    format!("{value:#x}")
}

// ============================================================================
// RPC Client
// ============================================================================

/// JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: HttpClient,
    url: String,
}

impl RpcClient {
    /// Create a client for the given endpoint URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            url: url.into(),
        }
    }

    /// Returns the endpoint URL this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response = self.http.post_json(&self.url, &request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::api(status.as_u16(), message));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ClientError::parse(format!("{method} response: {e}")))?;

        if let Some(error) = body.error {
            return Err(ClientError::rpc(error.code, error.message));
        }
        Ok(body.result.unwrap_or(Value::Null))
    }

    /// Queries the chain id the endpoint answers for.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable reply.
    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        let value = self.call("eth_chainId", json!([])).await?;
        let quantity: String = serde_json::from_value(value)
            .map_err(|e| ClientError::parse(format!("chain id: {e}")))?;
        let id = parse_quantity(&quantity)?;
        u64::try_from(id).map_err(|_| ClientError::parse(format!("chain id '{quantity}'")))
    }

    /// Reads the latest native balance of an address, in wei.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable reply.
    pub async fn get_balance(&self, address: &str) -> Result<u128, ClientError> {
        let value = self
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        let quantity: String = serde_json::from_value(value)
            .map_err(|e| ClientError::parse(format!("balance: {e}")))?;
        parse_quantity(&quantity)
    }

    /// Submits a native-value transfer through the node's signer.
    ///
    /// The node must manage `from`; user rejections and signer errors
    /// come back as JSON-RPC error objects.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error verbatim when the submission is
    /// rejected.
    pub async fn send_transaction(
        &self,
        from: &str,
        to: &str,
        value: u128,
    ) -> Result<String, ClientError> {
        let params = json!([{
            "from": from,
            "to": to,
            "value": to_quantity(value),
        }]);
        let result = self.call("eth_sendTransaction", params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::parse(format!("transaction hash: {e}")))
    }

    /// Looks up the receipt for a transaction hash.
    ///
    /// # Returns
    ///
    /// `None` while the transaction is still pending.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable reply.
    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<TxReceipt>, ClientError> {
        let value = self.call("eth_getTransactionReceipt", json!([hash])).await?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ClientError::parse(format!("receipt: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

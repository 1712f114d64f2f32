//! Live adapter for the `ChainClient` port over Ethereum-style JSON-RPC.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::chain::{BlockHashFuture, ChainClient};

const RPC_URL_VAR: &str = "LINEAGE_RPC_URL";

/// Live chain client issuing `eth_getBlockByNumber` calls.
pub struct LiveChainClient {
    client: Client,
}

impl LiveChainClient {
    /// Creates a new live chain client. The RPC URL is read from
    /// `LINEAGE_RPC_URL` at call time, so construction never fails.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveChainClient {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON-RPC 2.0 request envelope.
#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: (String, bool),
}

/// JSON-RPC 2.0 response envelope for a block lookup.
#[derive(Deserialize)]
struct RpcResponse {
    result: Option<BlockHeader>,
    error: Option<RpcError>,
}

/// The only block field the lookup reads.
#[derive(Deserialize)]
struct BlockHeader {
    hash: String,
}

/// Error object in a JSON-RPC response.
#[derive(Deserialize)]
struct RpcError {
    message: String,
}

impl ChainClient for LiveChainClient {
    fn block_hash_at(&self, height: u64, include_transactions: bool) -> BlockHashFuture<'_> {
        Box::pin(async move {
            let url = env::var(RPC_URL_VAR).map_err(
                |_| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("{RPC_URL_VAR} environment variable not set").into()
                },
            )?;

            let body = RpcRequest {
                jsonrpc: "2.0",
                id: 1,
                method: "eth_getBlockByNumber",
                params: (format!("0x{height:x}"), include_transactions),
            };

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Chain RPC request failed: {e}").into()
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(format!("Chain RPC error ({})", status.as_u16()).into());
            }

            let parsed: RpcResponse = response.json().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse chain RPC response: {e}").into()
                },
            )?;

            if let Some(error) = parsed.error {
                return Err(format!("Chain RPC error: {}", error.message).into());
            }

            // A null result means the chain has no block at this height.
            Ok(parsed.result.map(|block| block.hash))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_encodes_height_as_hex_quantity() {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_getBlockByNumber",
            params: (format!("0x{:x}", 255), false),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["params"], json!(["0xff", false]));
        assert_eq!(value["method"], json!("eth_getBlockByNumber"));
    }

    #[test]
    fn null_result_deserializes_to_absent_block() {
        let parsed: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert!(parsed.result.is_none());
        assert!(parsed.error.is_none());
    }
}

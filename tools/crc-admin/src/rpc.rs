//! JSON-RPC client for a Soroban RPC endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ed25519_dalek::SigningKey;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use stellar_xdr::curr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, Limits, Operation, PublicKey,
    ReadXdr, SorobanAuthorizationEntry, SorobanTransactionData, Uint256, WriteXdr,
};

use crate::tx;

/// Inclusion fee in stroops; the resource fee from simulation is added on
/// top of this.
const BASE_FEE: u32 = 1_000;

const CONFIRM_ATTEMPTS: u32 = 40;
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(1_500);

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON-RPC error: {0}")]
    Rpc(String),
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("account {0} not found on the network (is it funded?)")]
    AccountNotFound(String),
    #[error("simulation failed: {0}")]
    Simulation(String),
    #[error("transaction failed on-chain: {0}")]
    TransactionFailed(String),
    #[error("timed out waiting for transaction {0}")]
    ConfirmationTimeout(String),
    #[error(transparent)]
    Tx(#[from] tx::TxError),
}

#[derive(Serialize)]
struct JsonRpcRequest<P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: P,
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworkInfo {
    pub passphrase: String,
    #[serde(rename = "protocolVersion")]
    pub protocol_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct SimulateResponse {
    #[serde(rename = "transactionData", default)]
    pub transaction_data: Option<String>,
    #[serde(rename = "minResourceFee", default)]
    pub min_resource_fee: Option<String>,
    #[serde(default)]
    pub results: Vec<SimulateHostFunctionResult>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimulateHostFunctionResult {
    #[serde(default)]
    pub auth: Vec<String>,
    #[serde(default)]
    pub xdr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    status: String,
    hash: String,
    #[serde(rename = "errorResultXdr", default)]
    error_result_xdr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetTransactionResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct LedgerEntriesResponse {
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

#[derive(Debug, Deserialize)]
struct LedgerEntry {
    xdr: String,
}

pub struct RpcClient {
    client: Client,
    base_url: String,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(RpcError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            request_id: AtomicU64::new(1),
        })
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> Result<R, RpcError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| RpcError::Parse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::Parse(format!("missing result for {method}")))
    }

    pub async fn get_network(&self) -> Result<NetworkInfo, RpcError> {
        self.call("getNetwork", json!({})).await
    }

    /// Current sequence number of an account entry.
    pub async fn fetch_account_seq(&self, pubkey: [u8; 32]) -> Result<i64, RpcError> {
        let key = LedgerKey::Account(LedgerKeyAccount {
            account_id: AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(pubkey))),
        });
        let key_b64 = base64::encode(
            key.to_xdr(Limits::none())
                .map_err(|e| RpcError::Parse(e.to_string()))?,
        );

        let response: LedgerEntriesResponse = self
            .call("getLedgerEntries", json!({ "keys": [key_b64] }))
            .await?;

        let entry = response
            .entries
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::AccountNotFound(hex::encode(pubkey)))?;

        let raw = base64::decode(&entry.xdr).map_err(|e| RpcError::Parse(e.to_string()))?;
        match LedgerEntryData::from_xdr(raw, Limits::none())
            .map_err(|e| RpcError::Parse(e.to_string()))?
        {
            LedgerEntryData::Account(account) => Ok(account.seq_num.0),
            other => Err(RpcError::Parse(format!(
                "unexpected ledger entry for account key: {other:?}"
            ))),
        }
    }

    pub async fn simulate(&self, envelope_b64: &str) -> Result<SimulateResponse, RpcError> {
        self.call("simulateTransaction", json!({ "transaction": envelope_b64 }))
            .await
    }

    pub async fn send(&self, envelope_b64: &str) -> Result<String, RpcError> {
        let response: SendResponse = self
            .call("sendTransaction", json!({ "transaction": envelope_b64 }))
            .await?;

        if response.status == "ERROR" {
            return Err(RpcError::TransactionFailed(
                response
                    .error_result_xdr
                    .unwrap_or_else(|| "sendTransaction returned ERROR".to_string()),
            ));
        }

        Ok(response.hash)
    }

    pub async fn wait_for_transaction(&self, hash: &str) -> Result<(), RpcError> {
        for _ in 0..CONFIRM_ATTEMPTS {
            let response: GetTransactionResponse =
                self.call("getTransaction", json!({ "hash": hash })).await?;

            match response.status.as_str() {
                "SUCCESS" => return Ok(()),
                "FAILED" => return Err(RpcError::TransactionFailed(hash.to_string())),
                _ => tokio::time::sleep(CONFIRM_POLL_INTERVAL).await,
            }
        }

        Err(RpcError::ConfirmationTimeout(hash.to_string()))
    }

    /// Simulate, attach resources and auth, sign and send one host-function
    /// operation, then wait for its confirmation.
    pub async fn submit_operation(
        &self,
        key: &SigningKey,
        network_passphrase: &str,
        op: Operation,
    ) -> Result<(), RpcError> {
        let source = key.verifying_key().to_bytes();
        let seq_num = self.fetch_account_seq(source).await? + 1;
        let transaction = tx::build_transaction(source, seq_num, BASE_FEE, op)?;

        let unsigned = tx::encode_envelope(&tx::unsigned_envelope(&transaction))?;
        let simulation = self.simulate(&unsigned).await?;

        if let Some(error) = simulation.error {
            return Err(RpcError::Simulation(error));
        }

        let data_b64 = simulation
            .transaction_data
            .ok_or_else(|| RpcError::Parse("simulation carried no transactionData".to_string()))?;
        let data = SorobanTransactionData::from_xdr(
            base64::decode(&data_b64).map_err(|e| RpcError::Parse(e.to_string()))?,
            Limits::none(),
        )
        .map_err(|e| RpcError::Parse(e.to_string()))?;

        let min_resource_fee = match simulation.min_resource_fee {
            Some(fee) => fee
                .parse::<u32>()
                .map_err(|e| RpcError::Parse(format!("minResourceFee: {e}")))?,
            None => 0,
        };

        let mut auth = Vec::new();
        for result in &simulation.results {
            for entry_b64 in &result.auth {
                let raw =
                    base64::decode(entry_b64).map_err(|e| RpcError::Parse(e.to_string()))?;
                let entry = SorobanAuthorizationEntry::from_xdr(raw, Limits::none())
                    .map_err(|e| RpcError::Parse(e.to_string()))?;
                auth.push(entry);
            }
        }

        let transaction = tx::apply_simulation(transaction, data, min_resource_fee, auth)?;
        let network_id = tx::network_id(network_passphrase);
        let envelope = tx::sign_transaction(transaction, &network_id, key)?;

        let hash = self.send(&tx::encode_envelope(&envelope)?).await?;
        tracing::debug!(%hash, "transaction sent, awaiting confirmation");

        self.wait_for_transaction(&hash).await
    }
}

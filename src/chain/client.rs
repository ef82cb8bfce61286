// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain access: chain-id lookup, transaction building and submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::transaction::{AnyRawTransaction, RawTransaction, SignedTransaction, TransactionPayload};
use super::types::{AccountAddress, Network};
use crate::error::{Error, Result};

const SIGNED_TRANSACTION_CONTENT_TYPE: &str = "application/x.cedra.signed_transaction+bcs";
const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
const DEFAULT_EXPIRATION: Duration = Duration::from_secs(60);
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability to build, submit and confirm transactions on one chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id reported by the chain itself.
    async fn chain_id(&self) -> Result<u8>;

    /// Build an unsigned transaction. A `fee_payer` turns it into a sponsored
    /// transaction whose signing message commits to that address.
    ///
    /// # Arguments
    /// * `sender` - account whose sequence number the transaction consumes
    /// * `payload` - entry function or script to execute
    /// * `fee_payer` - optional sponsor paying gas
    async fn build_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        fee_payer: Option<AccountAddress>,
    ) -> Result<AnyRawTransaction>;

    /// Submit and block until the transaction is final.
    ///
    /// # Returns
    /// The transaction hash, or `TransactionFailed` when the chain executed
    /// it with a non-success status.
    async fn submit_and_wait(&self, transaction: &SignedTransaction) -> Result<String>;
}

/// Cedra fullnode REST client.
#[derive(Debug, Clone)]
pub struct NodeClient {
    base_url: String,
    max_gas_amount: u64,
    expiration: Duration,
    http: Client,
}

impl NodeClient {
    /// Create a client for a fullnode REST endpoint.
    ///
    /// # Arguments
    /// * `base_url` - REST root including the version segment (e.g. `https://fullnode.testnet.cedralabs.com/v1`)
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed: url::Url = base_url
            .parse()
            .map_err(|e: url::ParseError| Error::transport("parse node URL", e))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::transport("build HTTP client", e))?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration: DEFAULT_EXPIRATION,
            http,
        })
    }

    /// Client for a named network's public fullnode.
    pub fn for_network(network: Network) -> Result<Self> {
        let url = network
            .node_url()
            .ok_or_else(|| Error::UnsupportedNetwork(network.to_string()))?;
        Self::new(url)
    }

    /// Override the gas limit put on built transactions.
    pub fn with_max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current sequence number; accounts not yet created on chain start at 0.
    pub async fn sequence_number(&self, address: AccountAddress) -> Result<u64> {
        let path = format!("/accounts/{}", address.to_long_string());
        let Some(response) = self.get_json_optional(&path).await? else {
            return Ok(0);
        };

        response
            .get("sequence_number")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| Error::transport(format!("GET {path}"), "missing sequence_number"))
    }

    /// Gas unit price currently suggested by the node.
    pub async fn gas_unit_price(&self) -> Result<u64> {
        let response = self.get_json("/estimate_gas_price").await?;
        response
            .get("gas_estimate")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::transport("GET /estimate_gas_price", "missing gas_estimate"))
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<()> {
        let path = format!("/transactions/wait_by_hash/{hash}");
        let started = tokio::time::Instant::now();

        loop {
            if let Some(response) = self.get_json_optional(&path).await? {
                if !is_pending(&response) {
                    return check_vm_status(hash, &response);
                }
            }

            if started.elapsed() >= WAIT_TIMEOUT {
                return Err(Error::transport(
                    "wait for transaction",
                    format!("{hash} not committed after {WAIT_TIMEOUT:?}"),
                ));
            }
            debug!(tx_hash = %hash, "Transaction pending, polling again");
            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.get_json_optional(path).await?.ok_or_else(|| {
            Error::transport(format!("GET {path}"), format!("{}", StatusCode::NOT_FOUND))
        })
    }

    async fn get_json_optional(&self, path: &str) -> Result<Option<Value>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {path}"), e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(
                format!("GET {path}"),
                format!("returned {status}: {body}"),
            ));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| Error::transport(format!("GET {path}"), format!("invalid JSON: {e}")))
    }
}

#[async_trait]
impl ChainClient for NodeClient {
    async fn chain_id(&self) -> Result<u8> {
        let ledger = self.get_json("/").await?;
        ledger
            .get("chain_id")
            .and_then(Value::as_u64)
            .and_then(|id| u8::try_from(id).ok())
            .ok_or_else(|| Error::transport("GET /", "missing chain_id in ledger info"))
    }

    async fn build_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
        fee_payer: Option<AccountAddress>,
    ) -> Result<AnyRawTransaction> {
        let chain_id = self.chain_id().await?;
        let sequence_number = self.sequence_number(sender).await?;
        let gas_unit_price = self.gas_unit_price().await?;
        let expiration_timestamp_secs =
            chrono::Utc::now().timestamp().max(0) as u64 + self.expiration.as_secs();

        let raw_transaction = RawTransaction {
            sender,
            sequence_number,
            payload,
            max_gas_amount: self.max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        };

        debug!(
            sender = %sender,
            sequence_number,
            gas_unit_price,
            sponsored = fee_payer.is_some(),
            "Built raw transaction"
        );

        Ok(AnyRawTransaction {
            raw_transaction,
            fee_payer_address: fee_payer,
        })
    }

    async fn submit_and_wait(&self, transaction: &SignedTransaction) -> Result<String> {
        let body = transaction.to_bcs()?;
        let response = self
            .http
            .post(format!("{}/transactions", self.base_url))
            .header("Content-Type", SIGNED_TRANSACTION_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport("POST /transactions", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(
                "POST /transactions",
                format!("returned {status}: {body}"),
            ));
        }

        let pending: Value = response
            .json()
            .await
            .map_err(|e| Error::transport("POST /transactions", format!("invalid JSON: {e}")))?;
        let hash = pending
            .get("hash")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::transport("POST /transactions", "missing hash in response"))?
            .to_string();

        info!(tx_hash = %hash, "Transaction submitted");
        self.wait_for_transaction(&hash).await?;
        info!(tx_hash = %hash, "Transaction committed");

        Ok(hash)
    }
}

fn is_pending(response: &Value) -> bool {
    response.get("type").and_then(Value::as_str) == Some("pending_transaction")
}

/// Map a committed transaction's JSON into success or `TransactionFailed`.
fn check_vm_status(hash: &str, response: &Value) -> Result<()> {
    if response.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(());
    }
    let vm_status = response
        .get("vm_status")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    Err(Error::TransactionFailed {
        tx_hash: hash.to_string(),
        vm_status,
    })
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Attestation Bridge Provider
//!
//! Burn-and-mint USDC bridge. The source leg burns through the bridge's
//! `token_messenger`, an off-chain attestation service signs the resulting
//! message, and the claim mints on Cedra against that attestation.
//!
//! ## Endpoints
//!
//! - `GET /v1/routes?source=&destination=&amount=` lists priced routes
//! - `GET /v1/messages/{domain}?transactionHash=` returns the burn message
//!   and its attestation once the source chain has finalized
//!
//! A `404` from the messages endpoint means the burn is not indexed yet and
//! is reported as pending.

use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::U256;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::provider::{AttestationStatus, BridgeProvider, ProviderKind, Quote, Route};
use super::Chain;
use crate::chain::transaction::{EntryFunction, TransactionPayload};
use crate::chain::types::AccountAddress;
use crate::config::CrossChainConfig;
use crate::error::{Error, Result};

const TOKEN_MESSENGER_MODULE: &str = "token_messenger";
const DEPOSIT_FOR_BURN: &str = "deposit_for_burn";
const MINTER_MODULE: &str = "token_messenger_minter";
const HANDLE_RECEIVE_MESSAGE: &str = "handle_receive_message";

/// Placeholder the service returns while signatures are being collected.
const PENDING_ATTESTATION: &str = "PENDING";

pub struct AttestationBridge {
    base_url: String,
    bridge_module: AccountAddress,
    http: Client,
}

impl AttestationBridge {
    /// Create a client for the attestation service.
    ///
    /// # Arguments
    /// * `base_url` - service root, e.g. `https://iris-api.example.com`
    /// * `bridge_module` - Cedra account publishing `token_messenger` and
    ///   `token_messenger_minter`
    pub fn new(base_url: &str, bridge_module: AccountAddress) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::transport("build attestation HTTP client", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bridge_module,
            http,
        })
    }

    /// Client for the service and module named in `config`.
    pub fn from_config(config: &CrossChainConfig) -> Result<Self> {
        Self::new(config.bridge_api_url.as_str(), config.bridge_module)
    }

    async fn get_json_optional(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
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
impl BridgeProvider for AttestationBridge {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Attestation
    }

    async fn find_route(
        &self,
        source: Chain,
        destination: Chain,
        amount: U256,
    ) -> Result<Option<Route>> {
        let query = [
            ("source", source.to_string()),
            ("destination", destination.to_string()),
            ("amount", amount.to_string()),
        ];
        let Some(body) = self.get_json_optional("/v1/routes", &query).await? else {
            return Ok(None);
        };

        let route = cheapest_route(&body)?;
        debug!(%source, %destination, found = route.is_some(), "Queried bridge routes");
        Ok(route)
    }

    fn transfer_payload(
        &self,
        quote: &Quote,
        recipient: AccountAddress,
    ) -> Result<TransactionPayload> {
        let amount = u64::try_from(quote.amount).map_err(|_| {
            Error::InvalidAmount(format!("{} base units exceed u64", quote.amount))
        })?;

        Ok(TransactionPayload::EntryFunction(EntryFunction::new(
            self.bridge_module,
            TOKEN_MESSENGER_MODULE,
            DEPOSIT_FOR_BURN,
            vec![],
            vec![
                bcs::to_bytes(&amount)?,
                bcs::to_bytes(&quote.destination_chain.domain())?,
                bcs::to_bytes(&recipient)?,
            ],
        )))
    }

    async fn fetch_attestation(&self, source: Chain, source_tx_id: &str) -> Result<AttestationStatus> {
        let path = format!("/v1/messages/{}", source.domain());
        let query = [("transactionHash", source_tx_id.to_string())];

        let status = match self.get_json_optional(&path, &query).await? {
            Some(body) => parse_messages(&body)?,
            None => AttestationStatus::Pending,
        };

        if matches!(status, AttestationStatus::Complete { .. }) {
            info!(%source, source_tx_id, "Attestation available");
        }
        Ok(status)
    }

    fn claim_payload(&self, message: &[u8], attestation: &[u8]) -> Result<TransactionPayload> {
        Ok(TransactionPayload::EntryFunction(EntryFunction::new(
            self.bridge_module,
            MINTER_MODULE,
            HANDLE_RECEIVE_MESSAGE,
            vec![],
            vec![bcs::to_bytes(message)?, bcs::to_bytes(attestation)?],
        )))
    }
}

/// Whether the service considers a message's attestation final.
pub fn map_attestation_status(raw_status: &str) -> bool {
    let status = raw_status.trim().to_ascii_lowercase();
    matches!(status.as_str(), "complete" | "completed" | "attested")
}

fn cheapest_route(body: &Value) -> Result<Option<Route>> {
    let routes = body
        .get("routes")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::transport("GET /v1/routes", "missing routes array"))?;

    let mut parsed = routes.iter().map(parse_route).collect::<Result<Vec<_>>>()?;
    parsed.sort_by(|a, b| a.fee.cmp(&b.fee));
    Ok(parsed.into_iter().next())
}

fn parse_route(value: &Value) -> Result<Route> {
    let invalid = |what: &str| Error::transport("GET /v1/routes", format!("route {what}"));

    let id = value
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing id"))?
        .to_string();
    let fee = match value.get("fee") {
        Some(Value::String(raw)) => U256::from_str(raw).map_err(|_| invalid("has invalid fee"))?,
        Some(Value::Number(n)) => n.as_u64().map(U256::from).ok_or_else(|| invalid("has invalid fee"))?,
        _ => U256::ZERO,
    };
    let estimated_seconds = value
        .get("estimatedSeconds")
        .and_then(Value::as_u64)
        .unwrap_or_default();

    Ok(Route {
        id,
        fee,
        estimated_seconds,
    })
}

fn parse_messages(body: &Value) -> Result<AttestationStatus> {
    let Some(entry) = body
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
    else {
        return Ok(AttestationStatus::Pending);
    };

    let status = entry.get("status").and_then(Value::as_str).unwrap_or_default();
    let attestation = entry.get("attestation").and_then(Value::as_str).unwrap_or_default();
    if !map_attestation_status(status) || attestation.is_empty() || attestation == PENDING_ATTESTATION {
        return Ok(AttestationStatus::Pending);
    }

    let message = entry
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::transport("GET /v1/messages", "attested entry without message"))?;

    Ok(AttestationStatus::Complete {
        message: decode_hex("message", message)?,
        attestation: decode_hex("attestation", attestation)?,
    })
}

fn decode_hex(field: &str, raw: &str) -> Result<Vec<u8>> {
    alloy::hex::decode(raw)
        .map_err(|e| Error::transport("GET /v1/messages", format!("invalid {field} hex: {e}")))
}

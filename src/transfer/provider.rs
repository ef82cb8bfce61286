// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bridge provider seam.

use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Chain;
use crate::chain::transaction::TransactionPayload;
use crate::chain::types::AccountAddress;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Burn-and-mint bridge with an off-chain attestation service.
    Attestation,
}

/// Route offered by a provider for one amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    /// Provider fee in USDC base units.
    pub fee: U256,
    pub estimated_seconds: u64,
}

/// Priced route for a transfer, requested fresh for every transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub provider: ProviderKind,
    pub source_chain: Chain,
    pub destination_chain: Chain,
    /// Amount in USDC base units.
    pub amount: U256,
    pub route_id: String,
    pub fee: U256,
    pub estimated_seconds: u64,
}

/// State of the attestation for a source-chain burn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttestationStatus {
    Pending,
    Complete {
        message: Vec<u8>,
        attestation: Vec<u8>,
    },
}

#[async_trait]
pub trait BridgeProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Best route for `amount`, or `None` when the provider has none.
    async fn find_route(
        &self,
        source: Chain,
        destination: Chain,
        amount: U256,
    ) -> Result<Option<Route>>;

    /// Source-leg call burning the quoted amount for `recipient`.
    fn transfer_payload(&self, quote: &Quote, recipient: AccountAddress)
        -> Result<TransactionPayload>;

    async fn fetch_attestation(&self, source: Chain, source_tx_id: &str)
        -> Result<AttestationStatus>;

    /// Destination-chain call minting against an attested message.
    fn claim_payload(&self, message: &[u8], attestation: &[u8]) -> Result<TransactionPayload>;
}

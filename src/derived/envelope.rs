// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in envelopes wrapping Cedra signing requests.
//!
//! Ethereum wallets sign an EIP-4361 ("Sign-In with Ethereum") message via
//! `personal_sign`; Solana wallets sign a "Sign-In with Solana" request.
//! Either way the envelope's nonce is the `0x`-prefixed digest of what is
//! really being authorized on Cedra.

use alloy::primitives::Address;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use super::identity::DerivedIdentity;
use super::message::{escape_line_breaks, StructuredMessage};
use crate::chain::transaction::AnyRawTransaction;
use crate::chain::types::chain_name;
use crate::wallet::{ForeignAddress, SolanaPublicKey};

const DESTINATION_CHAIN: &str = "Cedra";
const SIWE_VERSION: &str = "1";

/// Statement for a structured message.
pub fn message_statement(message: &StructuredMessage) -> String {
    let network_suffix = message
        .chain_id
        .map(|id| format!(" ({})", chain_name(id)))
        .unwrap_or_default();

    format!(
        "To sign the following message on {DESTINATION_CHAIN} blockchain{network_suffix}: {}",
        escape_line_breaks(&message.message)
    )
}

/// Statement for a transaction, naming the entry function when there is one.
pub fn transaction_statement(domain: &str, transaction: &AnyRawTransaction) -> String {
    let raw = &transaction.raw_transaction;
    let entry_function = raw
        .payload
        .entry_function()
        .map(|entry| format!(" {}", entry.qualified_name()))
        .unwrap_or_default();

    format!(
        "Please confirm you explicitly initiated this request from {domain}. \
         You are approving to execute transaction{entry_function} on {DESTINATION_CHAIN} blockchain ({}).",
        chain_name(raw.chain_id)
    )
}

/// Envelope nonce for a signing-message digest.
pub fn digest_nonce(digest: &[u8; 32]) -> String {
    alloy::hex::encode_prefixed(digest)
}

/// Timestamps embedded in signatures carry millisecond precision.
pub fn signing_time(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

fn iso_millis(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// EIP-4361 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweMessage {
    pub domain: String,
    pub address: Address,
    pub statement: String,
    pub uri: String,
    pub version: String,
    pub chain_id: Option<u64>,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

impl SiweMessage {
    /// Text the wallet signs with `personal_sign`.
    pub fn to_message(&self) -> String {
        let mut lines = vec![
            format!(
                "{} wants you to sign in with your Ethereum account:",
                self.domain
            ),
            self.address.to_checksum(None),
            String::new(),
            self.statement.clone(),
            String::new(),
            format!("URI: {}", self.uri),
            format!("Version: {}", self.version),
        ];
        if let Some(chain_id) = self.chain_id {
            lines.push(format!("Chain ID: {chain_id}"));
        }
        lines.push(format!("Nonce: {}", self.nonce));
        lines.push(format!("Issued At: {}", iso_millis(&self.issued_at)));
        lines.join("\n")
    }
}

/// Sign-In with Solana input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiwsInput {
    pub domain: String,
    pub address: SolanaPublicKey,
    pub statement: String,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

impl SiwsInput {
    /// Standard SIWS text a wallet renders and signs.
    pub fn to_message(&self) -> String {
        [
            format!(
                "{} wants you to sign in with your Solana account:",
                self.domain
            ),
            self.address.to_base58(),
            String::new(),
            self.statement.clone(),
            String::new(),
            format!("Nonce: {}", self.nonce),
            format!("Issued At: {}", iso_millis(&self.issued_at)),
        ]
        .join("\n")
    }
}

/// Which sign-in standard an envelope follows. The discriminant is the tag
/// byte of the derived signature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EnvelopeKind {
    Siwe = 0,
    Siws = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInEnvelope {
    Siwe(SiweMessage),
    Siws(SiwsInput),
}

impl SignInEnvelope {
    pub fn kind(&self) -> EnvelopeKind {
        match self {
            SignInEnvelope::Siwe(_) => EnvelopeKind::Siwe,
            SignInEnvelope::Siws(_) => EnvelopeKind::Siws,
        }
    }

    pub fn nonce(&self) -> &str {
        match self {
            SignInEnvelope::Siwe(m) => &m.nonce,
            SignInEnvelope::Siws(m) => &m.nonce,
        }
    }

    pub fn statement(&self) -> &str {
        match self {
            SignInEnvelope::Siwe(m) => &m.statement,
            SignInEnvelope::Siws(m) => &m.statement,
        }
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        match self {
            SignInEnvelope::Siwe(m) => m.issued_at,
            SignInEnvelope::Siws(m) => m.issued_at,
        }
    }

    /// Exact text the wallet signs.
    pub fn to_message(&self) -> String {
        match self {
            SignInEnvelope::Siwe(m) => m.to_message(),
            SignInEnvelope::Siws(m) => m.to_message(),
        }
    }
}

/// Builds envelopes for one dapp origin.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    domain: String,
    uri: String,
}

impl EnvelopeBuilder {
    pub fn new(domain: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            uri: uri.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Wrap `statement` for the identity's family. `chain_id` only reaches
    /// SIWE envelopes; SIWS has no chain field.
    pub fn build(
        &self,
        identity: &DerivedIdentity,
        statement: String,
        digest: &[u8; 32],
        chain_id: Option<u8>,
        issued_at: DateTime<Utc>,
    ) -> SignInEnvelope {
        let nonce = digest_nonce(digest);
        let issued_at = signing_time(issued_at);

        match identity.foreign_address() {
            ForeignAddress::Ethereum(address) => SignInEnvelope::Siwe(SiweMessage {
                domain: self.domain.clone(),
                address: *address,
                statement,
                uri: self.uri.clone(),
                version: SIWE_VERSION.to_string(),
                chain_id: chain_id.map(u64::from),
                nonce,
                issued_at,
            }),
            ForeignAddress::Solana(address) => SignInEnvelope::Siws(SiwsInput {
                domain: self.domain.clone(),
                address: *address,
                statement,
                nonce,
                issued_at,
            }),
        }
    }

    pub fn for_message(
        &self,
        identity: &DerivedIdentity,
        message: &StructuredMessage,
        chain_id: Option<u8>,
        issued_at: DateTime<Utc>,
    ) -> SignInEnvelope {
        self.build(
            identity,
            message_statement(message),
            &message.digest(),
            chain_id,
            issued_at,
        )
    }

    pub fn for_transaction(
        &self,
        identity: &DerivedIdentity,
        transaction: &AnyRawTransaction,
        signing_message_digest: &[u8; 32],
        issued_at: DateTime<Utc>,
    ) -> SignInEnvelope {
        self.build(
            identity,
            transaction_statement(&self.domain, transaction),
            signing_message_digest,
            Some(transaction.raw_transaction.chain_id),
            issued_at,
        )
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy shared by the derived signer and the transfer orchestrator.
//!
//! A user declining a wallet prompt is *not* an error: it is reported as
//! [`UserResponse::Rejected`](crate::wallet::UserResponse) so callers branch
//! on it explicitly.

use std::time::Duration;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by signing and transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Account not connected")]
    NotConnected,

    #[error("Unsupported signature type: expected {expected}, wallet returned {actual}")]
    UnsupportedSignatureType { expected: String, actual: String },

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("No route from {source_chain} to {destination_chain}")]
    RouteNotFound {
        source_chain: String,
        destination_chain: String,
    },

    #[error("Attestation for {source_tx_id} not available after {waited:?}")]
    AttestationTimeout {
        source_tx_id: String,
        waited: Duration,
    },

    #[error("{operation} failed: {message}")]
    Transport { operation: String, message: String },

    #[error("Transaction {tx_hash} failed: {vm_status}")]
    TransactionFailed { tx_hash: String, vm_status: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid authentication function: {0}")]
    InvalidAuthenticationFunction(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Configuration missing: {0}")]
    MissingConfig(String),
}

impl Error {
    /// Wrap a collaborator failure with the operation it interrupted.
    pub fn transport(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

impl From<bcs::Error> for Error {
    fn from(err: bcs::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_keeps_operation_context() {
        let err = Error::transport("sign_transaction (Ethereum)", "provider disconnected");
        assert_eq!(
            err.to_string(),
            "sign_transaction (Ethereum) failed: provider disconnected"
        );
    }

    #[test]
    fn route_not_found_names_both_chains() {
        let err = Error::RouteNotFound {
            source_chain: "Dogechain".to_string(),
            destination_chain: "Cedra".to_string(),
        };
        assert_eq!(err.to_string(), "No route from Dogechain to Cedra");
    }
}

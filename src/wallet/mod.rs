// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Foreign-chain wallet seam.
//!
//! A [`ForeignWallet`] is whatever holds the Ethereum or Solana key: a
//! browser extension behind a bridge, a hardware device, or one of the
//! headless local wallets in [`ethereum`] and [`solana`].

pub mod ethereum;
pub mod solana;

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::derived::envelope::SignInEnvelope;
use crate::error::{Error, Result};

pub use ethereum::LocalEthereumWallet;
pub use solana::LocalSolanaWallet;

/// Outcome of a request that needs the user's approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "args", rename_all = "lowercase")]
pub enum UserResponse<T> {
    Approved(T),
    Rejected,
}

impl<T> UserResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UserResponse<U> {
        match self {
            UserResponse::Approved(value) => UserResponse::Approved(f(value)),
            UserResponse::Rejected => UserResponse::Rejected,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, UserResponse::Rejected)
    }

    pub fn approved(self) -> Option<T> {
        match self {
            UserResponse::Approved(value) => Some(value),
            UserResponse::Rejected => None,
        }
    }
}

/// Foreign chain family a wallet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Ethereum,
    Solana,
}

impl ChainFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChainFamily::Ethereum => "Ethereum",
            ChainFamily::Solana => "Solana",
        }
    }

    /// Signature scheme this family's sign-in envelope must be signed with.
    pub fn expected_scheme(&self) -> SignatureScheme {
        match self {
            ChainFamily::Ethereum => SignatureScheme::Secp256k1Eip191,
            ChainFamily::Solana => SignatureScheme::Ed25519,
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChainFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" | "eth" | "evm" => Ok(ChainFamily::Ethereum),
            "solana" | "sol" => Ok(ChainFamily::Solana),
            other => Err(Error::InvalidAddress(format!("unknown chain family `{other}`"))),
        }
    }
}

/// Solana account public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolanaPublicKey([u8; 32]);

impl SolanaPublicKey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_base58(raw: &str) -> Result<Self> {
        let decoded = bs58::decode(raw.trim())
            .into_vec()
            .map_err(|e| Error::InvalidAddress(format!("`{raw}`: {e}")))?;
        let bytes: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            Error::InvalidAddress(format!(
                "`{raw}`: expected 32 bytes, got {}",
                decoded.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl fmt::Display for SolanaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for SolanaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolanaPublicKey({self})")
    }
}

/// Account address on the foreign chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignAddress {
    Ethereum(Address),
    Solana(SolanaPublicKey),
}

impl ForeignAddress {
    pub fn family(&self) -> ChainFamily {
        match self {
            ForeignAddress::Ethereum(_) => ChainFamily::Ethereum,
            ForeignAddress::Solana(_) => ChainFamily::Solana,
        }
    }

    /// Parse an address in the family's textual form.
    pub fn parse(family: ChainFamily, raw: &str) -> Result<Self> {
        match family {
            ChainFamily::Ethereum => raw
                .trim()
                .parse::<Address>()
                .map(ForeignAddress::Ethereum)
                .map_err(|e| Error::InvalidAddress(format!("`{raw}`: {e}"))),
            ChainFamily::Solana => SolanaPublicKey::from_base58(raw).map(ForeignAddress::Solana),
        }
    }

    /// Canonical text: EIP-55 checksummed hex for Ethereum, base58 for Solana.
    pub fn canonical(&self) -> String {
        match self {
            ForeignAddress::Ethereum(address) => address.to_checksum(None),
            ForeignAddress::Solana(key) => key.to_base58(),
        }
    }
}

impl fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Signature algorithm a wallet reports for a signed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// 65-byte `r || s || v` over an EIP-191 personal message.
    Secp256k1Eip191,
    /// 64-byte ed25519 signature over the raw message bytes.
    Ed25519,
    /// Anything else a wallet might hand back.
    Other(String),
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Secp256k1Eip191 => f.write_str("secp256k1"),
            SignatureScheme::Ed25519 => f.write_str("ed25519"),
            SignatureScheme::Other(name) => f.write_str(name),
        }
    }
}

/// Signature bytes as returned by the foreign wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSignature {
    pub scheme: SignatureScheme,
    pub bytes: Vec<u8>,
}

/// Failures talking to the foreign wallet. A user declining is not one of
/// these; that comes back as [`UserResponse::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet unavailable: {0}")]
    Unavailable(String),

    #[error("wallet request failed: {0}")]
    Request(String),

    #[error("wallet cannot sign {0} envelopes")]
    UnsupportedEnvelope(&'static str),
}

/// Wallet holding a foreign-chain key.
#[async_trait]
pub trait ForeignWallet: Send + Sync {
    fn name(&self) -> &str;

    fn family(&self) -> ChainFamily;

    /// Ask the user to expose an account.
    async fn request_account(&self) -> std::result::Result<UserResponse<ForeignAddress>, WalletError>;

    /// Currently exposed account, without prompting.
    async fn active_account(&self) -> std::result::Result<Option<ForeignAddress>, WalletError>;

    async fn disconnect(&self) -> std::result::Result<(), WalletError>;

    /// Ask the user to sign a sign-in envelope.
    async fn sign_envelope(
        &self,
        envelope: &SignInEnvelope,
    ) -> std::result::Result<UserResponse<NativeSignature>, WalletError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH_LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
    const ETH_CHECKSUM: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const SOL_ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[test]
    fn ethereum_canonical_form_is_checksummed() {
        let address = ForeignAddress::parse(ChainFamily::Ethereum, ETH_LOWER).unwrap();
        assert_eq!(address.canonical(), ETH_CHECKSUM);
        assert_eq!(address.family(), ChainFamily::Ethereum);
    }

    #[test]
    fn solana_round_trips_through_base58() {
        let address = ForeignAddress::parse(ChainFamily::Solana, SOL_ADDRESS).unwrap();
        assert_eq!(address.canonical(), SOL_ADDRESS);
        assert_eq!(address.family(), ChainFamily::Solana);
    }

    #[test]
    fn rejects_addresses_of_wrong_shape() {
        assert!(ForeignAddress::parse(ChainFamily::Ethereum, SOL_ADDRESS).is_err());
        assert!(ForeignAddress::parse(ChainFamily::Solana, ETH_LOWER).is_err());
        assert!(ForeignAddress::parse(ChainFamily::Solana, "3yZe7d").is_err());
    }

    #[test]
    fn user_response_map_keeps_rejection() {
        let approved: UserResponse<u8> = UserResponse::Approved(2);
        assert_eq!(approved.map(|v| v * 2), UserResponse::Approved(4));

        let rejected: UserResponse<u8> = UserResponse::Rejected;
        assert!(rejected.clone().map(|v| v * 2).is_rejected());
        assert_eq!(rejected.approved(), None);
    }

    #[test]
    fn family_scheme_names_match_error_messages() {
        assert_eq!(ChainFamily::Ethereum.expected_scheme().to_string(), "secp256k1");
        assert_eq!(ChainFamily::Solana.expected_scheme().to_string(), "ed25519");
        assert_eq!("SOL".parse::<ChainFamily>().unwrap(), ChainFamily::Solana);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Native ed25519 Cedra accounts.
//!
//! Used for sponsors (fee payers) and for operator-held keys. Keys are
//! loaded from hex, either directly or from a key file.

use std::fmt;
use std::path::Path;

use ed25519_dalek::{Signer, SigningKey};

use super::authenticator::AccountAuthenticator;
use super::transaction::{sha3_256, AnyRawTransaction};
use super::types::AccountAddress;
use crate::error::{Error, Result};

/// Authentication-key scheme byte for single ed25519 keys.
pub const ED25519_SCHEME: u8 = 0x00;

/// Address of a native account controlled by one ed25519 key.
pub fn ed25519_address(public_key: &[u8; 32]) -> AccountAddress {
    let mut preimage = public_key.to_vec();
    preimage.push(ED25519_SCHEME);
    AccountAddress::new(sha3_256(&preimage))
}

/// Cedra account whose private key is held in process.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = ed25519_address(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// Parse a 32-byte hex private key, with or without `0x`.
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self> {
        let trimmed = private_key_hex.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let key_bytes = alloy::hex::decode(digits)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let key: [u8; 32] = key_bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidPrivateKey(format!("expected 32 bytes, got {}", key_bytes.len()))
        })?;

        Ok(Self::from_signing_key(SigningKey::from_bytes(&key)))
    }

    /// Load a hex private key from a file.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidPrivateKey(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_private_key_hex(&contents)
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign the transaction's signing message and wrap it as an authenticator.
    pub fn authenticate(&self, transaction: &AnyRawTransaction) -> Result<AccountAuthenticator> {
        let message = transaction.signing_message()?;
        let signature = self.signing_key.sign(&message);

        Ok(AccountAuthenticator::Ed25519 {
            public_key: self.public_key_bytes().to_vec(),
            signature: signature.to_bytes().to_vec(),
        })
    }
}

impl fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Headless Solana wallet backed by an in-process ed25519 key.
//!
//! Signs the rendered Sign-In with Solana text, which is what
//! `solana:signIn` wallets sign. Keys load from a 32-byte seed, a base58
//! 64-byte keypair, or a Solana CLI keypair file (JSON byte array).

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use tracing::debug;

use super::{
    ChainFamily, ForeignAddress, ForeignWallet, NativeSignature, SignatureScheme, SolanaPublicKey,
    UserResponse, WalletError,
};
use crate::derived::envelope::SignInEnvelope;
use crate::error::{Error, Result};

const DEFAULT_NAME: &str = "Local Solana";

pub struct LocalSolanaWallet {
    name: String,
    signing_key: SigningKey,
    connected: AtomicBool,
}

impl LocalSolanaWallet {
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            signing_key: SigningKey::from_bytes(seed),
            connected: AtomicBool::new(false),
        }
    }

    fn from_keypair_bytes(bytes: &[u8]) -> Result<Self> {
        let keypair: [u8; 64] = bytes.try_into().map_err(|_| {
            Error::InvalidPrivateKey(format!("expected 64 keypair bytes, got {}", bytes.len()))
        })?;
        let signing_key = SigningKey::from_keypair_bytes(&keypair)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;

        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            signing_key,
            connected: AtomicBool::new(false),
        })
    }

    /// Base58 secret key as exported by Phantom (seed followed by public key).
    pub fn from_base58_keypair(encoded: &str) -> Result<Self> {
        let bytes = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        Self::from_keypair_bytes(&bytes)
    }

    /// Solana CLI keypair file: a JSON array of 64 bytes.
    pub fn from_keypair_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidPrivateKey(format!("cannot read {}: {}", path.display(), e))
        })?;
        let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| {
            Error::InvalidPrivateKey(format!("{} is not a keypair file: {}", path.display(), e))
        })?;
        Self::from_keypair_bytes(&bytes)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn public_key(&self) -> SolanaPublicKey {
        SolanaPublicKey::new(self.signing_key.verifying_key().to_bytes())
    }
}

impl fmt::Debug for LocalSolanaWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSolanaWallet")
            .field("name", &self.name)
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ForeignWallet for LocalSolanaWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn family(&self) -> ChainFamily {
        ChainFamily::Solana
    }

    async fn request_account(&self) -> std::result::Result<UserResponse<ForeignAddress>, WalletError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(UserResponse::Approved(ForeignAddress::Solana(self.public_key())))
    }

    async fn active_account(&self) -> std::result::Result<Option<ForeignAddress>, WalletError> {
        Ok(self
            .connected
            .load(Ordering::SeqCst)
            .then(|| ForeignAddress::Solana(self.public_key())))
    }

    async fn disconnect(&self) -> std::result::Result<(), WalletError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_envelope(
        &self,
        envelope: &SignInEnvelope,
    ) -> std::result::Result<UserResponse<NativeSignature>, WalletError> {
        let SignInEnvelope::Siws(input) = envelope else {
            return Err(WalletError::UnsupportedEnvelope("Sign-In with Ethereum"));
        };
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::Request("account not connected".to_string()));
        }
        if input.address != self.public_key() {
            return Err(WalletError::Request(format!(
                "envelope is for {}, wallet holds {}",
                input.address,
                self.public_key()
            )));
        }

        let signature = self.signing_key.sign(input.to_message().as_bytes());

        debug!(address = %self.public_key(), nonce = %input.nonce, "Signed SIWS envelope");
        Ok(UserResponse::Approved(NativeSignature {
            scheme: SignatureScheme::Ed25519,
            bytes: signature.to_bytes().to_vec(),
        }))
    }
}

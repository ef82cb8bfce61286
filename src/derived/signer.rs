// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Derived Signer
//!
//! Presents a foreign-chain wallet as a Cedra wallet. Every signing request
//! is wrapped in a sign-in envelope for the foreign wallet, and the returned
//! signature is repackaged as a derivable abstract signature.
//!
//! ## Connection
//!
//! `Disconnected -> Connecting -> Connected`, and back to `Disconnected` on
//! [`DerivedSigner::disconnect`] or when the wallet reports no account. The
//! foreign address is re-read from the wallet on every call; only the
//! connection state and the active network live here.
//!
//! Calls on one instance must be serialized by the caller. Internal locks are
//! never held across an `.await`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::envelope::{signing_time, EnvelopeBuilder, SignInEnvelope};
use super::identity::DerivedIdentity;
use super::listeners::{lock, Listener, ListenerSlot};
use super::message::{StructuredMessage, MESSAGE_PREFIX};
use super::signature::DerivedSignature;
use crate::chain::authenticator::{AbstractionAuthData, AccountAuthenticator};
use crate::chain::client::{ChainClient, NodeClient};
use crate::chain::signer::TransactionSigner;
use crate::chain::transaction::{sha3_256, AnyRawTransaction};
use crate::chain::types::{AccountAddress, Network, NetworkInfo};
use crate::config::WalletConfig;
use crate::error::{Error, Result};
use crate::wallet::{ChainFamily, ForeignAddress, ForeignWallet, UserResponse};

/// Capabilities advertised to wallet-standard discovery.
pub const FEATURES: [&str; 9] = [
    "cedra:connect",
    "cedra:disconnect",
    "cedra:account",
    "cedra:onAccountChange",
    "cedra:network",
    "cedra:changeNetwork",
    "cedra:onNetworkChange",
    "cedra:signMessage",
    "cedra:signTransaction",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Message signing request. The boolean flags select which optional fields
/// the signer fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageInput {
    #[serde(default)]
    pub address: bool,
    #[serde(default)]
    pub application: bool,
    #[serde(default)]
    pub chain_id: bool,
    pub message: String,
    pub nonce: String,
}

impl SignMessageInput {
    pub fn new(message: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            nonce: nonce.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u8>,
    /// Canonical encoding of the signed message.
    pub full_message: String,
    pub message: String,
    pub nonce: String,
    pub prefix: String,
    /// Derived signature bytes.
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNetworkOutput {
    pub success: bool,
}

struct SignerState {
    connection: ConnectionState,
    network: NetworkInfo,
}

/// Cedra signer backed by a foreign-chain wallet.
pub struct DerivedSigner<W> {
    wallet: W,
    config: WalletConfig,
    envelopes: EnvelopeBuilder,
    chain_client: Option<Arc<dyn ChainClient>>,
    state: Mutex<SignerState>,
    account_listener: ListenerSlot<Option<DerivedIdentity>>,
    network_listener: ListenerSlot<NetworkInfo>,
}

impl<W: ForeignWallet> DerivedSigner<W> {
    pub fn new(wallet: W, config: WalletConfig) -> Self {
        let envelopes = EnvelopeBuilder::new(config.domain.clone(), config.application());
        let network = NetworkInfo::named(config.default_network);
        Self {
            wallet,
            config,
            envelopes,
            chain_client: None,
            state: Mutex::new(SignerState {
                connection: ConnectionState::Disconnected,
                network,
            }),
            account_listener: ListenerSlot::default(),
            network_listener: ListenerSlot::default(),
        }
    }

    /// Node used to look up chain ids that are not fixed (devnet). Without
    /// one, the active network's default node is queried.
    pub fn with_chain_client(mut self, client: Arc<dyn ChainClient>) -> Self {
        self.chain_client = Some(client);
        self
    }

    /// Wallet name suffixed with the foreign family, e.g. `MetaMask (Ethereum)`.
    pub fn name(&self) -> String {
        format!("{} ({})", self.wallet.name(), self.family().display_name())
    }

    pub fn family(&self) -> ChainFamily {
        self.wallet.family()
    }

    pub fn features(&self) -> &'static [&'static str] {
        &FEATURES
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn connection_state(&self) -> ConnectionState {
        lock(&self.state).connection
    }

    fn set_connection(&self, connection: ConnectionState) {
        lock(&self.state).connection = connection;
    }

    fn operation(&self, name: &str) -> String {
        format!("{name} ({})", self.family().display_name())
    }

    fn derive(&self, address: ForeignAddress) -> Result<DerivedIdentity> {
        let family = self.family();
        if address.family() != family {
            return Err(Error::InvalidAddress(format!(
                "{family} wallet reported a {} address",
                address.family()
            )));
        }
        DerivedIdentity::derive(
            self.config.domain.clone(),
            address,
            self.config.authentication_function(family).clone(),
        )
    }

    /// Ask the wallet for account access. Rejection is a normal outcome.
    pub async fn connect(&self) -> Result<UserResponse<DerivedIdentity>> {
        self.set_connection(ConnectionState::Connecting);
        info!(wallet = %self.name(), "Requesting foreign account");

        let response = match self.wallet.request_account().await {
            Ok(response) => response,
            Err(e) => {
                self.set_connection(ConnectionState::Disconnected);
                warn!(wallet = %self.name(), error = %e, "Account request failed");
                return Err(Error::transport(self.operation("connect"), e));
            }
        };

        let UserResponse::Approved(address) = response else {
            self.set_connection(ConnectionState::Disconnected);
            info!(wallet = %self.name(), "User rejected connection");
            return Ok(UserResponse::Rejected);
        };

        let identity = match self.derive(address) {
            Ok(identity) => identity,
            Err(e) => {
                self.set_connection(ConnectionState::Disconnected);
                return Err(e);
            }
        };
        self.set_connection(ConnectionState::Connected);

        info!(
            wallet = %self.name(),
            foreign_address = %identity.foreign_address(),
            address = %identity.address(),
            "Derived account connected"
        );
        Ok(UserResponse::Approved(identity))
    }

    pub async fn disconnect(&self) -> Result<()> {
        let result = self
            .wallet
            .disconnect()
            .await
            .map_err(|e| Error::transport(self.operation("disconnect"), e));
        self.set_connection(ConnectionState::Disconnected);
        info!(wallet = %self.name(), "Derived account disconnected");
        result
    }

    /// Identity for the wallet's current account, re-derived on every call.
    ///
    /// The wallet is the source of truth: an account it already exposes
    /// (for example one authorized in an earlier session) connects the
    /// signer, and a wallet with no account disconnects it.
    ///
    /// # Returns
    /// The derived identity, or `NotConnected` when the wallet exposes no
    /// account. A transition out of `Connected` notifies the account
    /// listener with `None`.
    pub async fn get_active_account(&self) -> Result<DerivedIdentity> {
        let active = self
            .wallet
            .active_account()
            .await
            .map_err(|e| Error::transport(self.operation("get_active_account"), e))?;

        let Some(address) = active else {
            let previous = std::mem::replace(
                &mut lock(&self.state).connection,
                ConnectionState::Disconnected,
            );
            if previous == ConnectionState::Connected {
                info!(wallet = %self.name(), "Wallet no longer exposes an account");
                self.account_listener.notify(&None);
            }
            return Err(Error::NotConnected);
        };

        let identity = self.derive(address)?;
        self.set_connection(ConnectionState::Connected);
        Ok(identity)
    }

    /// Active network, with the chain id resolved for networks that do not
    /// fix one.
    pub async fn network(&self) -> Result<NetworkInfo> {
        let current = lock(&self.state).network.clone();
        if current.chain_id.is_some() {
            return Ok(current);
        }

        let chain_id = self.fetch_chain_id(&current).await?;
        Ok(NetworkInfo {
            chain_id: Some(chain_id),
            ..current
        })
    }

    async fn fetch_chain_id(&self, network: &NetworkInfo) -> Result<u8> {
        let chain_id = match (&self.chain_client, &network.url) {
            (Some(client), _) => client.chain_id().await?,
            (None, Some(url)) => NodeClient::new(url)?.chain_id().await?,
            (None, None) => return Err(Error::UnsupportedNetwork(network.name.to_string())),
        };
        debug!(network = %network.name, chain_id, "Resolved chain id from node");
        Ok(chain_id)
    }

    async fn chain_id(&self) -> Result<u8> {
        let network = self.network().await?;
        network
            .chain_id
            .ok_or_else(|| Error::UnsupportedNetwork(network.name.to_string()))
    }

    /// Switch to a named network and notify the network listener.
    ///
    /// `Custom` is refused: derived identities are only defined for named
    /// networks. Refusal leaves the active network untouched.
    pub fn change_network(&self, requested: NetworkInfo) -> Result<UserResponse<ChangeNetworkOutput>> {
        if requested.name == Network::Custom {
            return Err(Error::UnsupportedNetwork(requested.name.to_string()));
        }

        let defaults = NetworkInfo::named(requested.name);
        let network = NetworkInfo {
            name: requested.name,
            chain_id: requested.chain_id.or(defaults.chain_id),
            url: requested.url.or(defaults.url),
        };

        lock(&self.state).network = network.clone();
        info!(network = %network.name, chain_id = ?network.chain_id, "Network changed");
        self.network_listener.notify(&network);

        Ok(UserResponse::Approved(ChangeNetworkOutput { success: true }))
    }

    pub fn on_account_change(&self, listener: Listener<Option<DerivedIdentity>>) {
        self.account_listener.register(listener);
    }

    pub fn on_network_change(&self, listener: Listener<NetworkInfo>) {
        self.network_listener.register(listener);
    }

    /// Feed an account change reported by the wallet integration. `None`
    /// means the wallet no longer exposes any account.
    pub fn handle_accounts_changed(
        &self,
        address: Option<ForeignAddress>,
    ) -> Result<Option<DerivedIdentity>> {
        let identity = match address {
            Some(address) => {
                let identity = self.derive(address)?;
                self.set_connection(ConnectionState::Connected);
                Some(identity)
            }
            None => {
                self.set_connection(ConnectionState::Disconnected);
                None
            }
        };

        info!(
            wallet = %self.name(),
            address = ?identity.as_ref().map(DerivedIdentity::address),
            "Foreign account changed"
        );
        self.account_listener.notify(&identity);
        Ok(identity)
    }

    /// Sign a dapp message through a sign-in envelope.
    ///
    /// Ethereum messages always carry the active chain id; Solana messages
    /// only when `input.chain_id` is set.
    pub async fn sign_message(
        &self,
        input: SignMessageInput,
    ) -> Result<UserResponse<SignMessageOutput>> {
        let identity = self.get_active_account().await?;

        let include_chain_id = match self.family() {
            ChainFamily::Ethereum => true,
            ChainFamily::Solana => input.chain_id,
        };
        let chain_id = if include_chain_id {
            Some(self.chain_id().await?)
        } else {
            None
        };

        let message = StructuredMessage {
            address: input.address.then(|| identity.address().to_string()),
            application: input.application.then(|| self.config.application()),
            chain_id,
            message: input.message,
            nonce: input.nonce,
        };

        let issued_at = signing_time(Utc::now());
        let envelope = self
            .envelopes
            .for_message(&identity, &message, message.chain_id, issued_at);

        let UserResponse::Approved(signature) =
            self.sign_envelope("sign_message", &envelope).await?
        else {
            return Ok(UserResponse::Rejected);
        };

        Ok(UserResponse::Approved(SignMessageOutput {
            full_message: message.encode(),
            prefix: MESSAGE_PREFIX.to_string(),
            signature: signature.to_bytes()?,
            address: message.address,
            application: message.application,
            chain_id: message.chain_id,
            message: message.message,
            nonce: message.nonce,
        }))
    }

    /// Authorize a transaction through a sign-in envelope whose nonce is the
    /// digest of the transaction's signing message.
    pub async fn sign_transaction(
        &self,
        transaction: &AnyRawTransaction,
        as_fee_payer: bool,
    ) -> Result<UserResponse<AccountAuthenticator>> {
        let identity = self.get_active_account().await?;
        let digest = sha3_256(&transaction.signing_message()?);

        debug!(
            address = %identity.address(),
            sender = %transaction.raw_transaction.sender,
            as_fee_payer,
            "Signing transaction"
        );

        let envelope = self
            .envelopes
            .for_transaction(&identity, transaction, &digest, Utc::now());

        let UserResponse::Approved(signature) =
            self.sign_envelope("sign_transaction", &envelope).await?
        else {
            return Ok(UserResponse::Rejected);
        };

        Ok(UserResponse::Approved(AccountAuthenticator::Abstraction {
            function_info: identity.authentication_function().clone(),
            auth_data: AbstractionAuthData::DerivableV1 {
                signing_message_digest: digest.to_vec(),
                abstract_signature: signature.to_transaction_signature()?,
                abstract_public_key: identity.abstract_public_key().to_vec(),
            },
        }))
    }

    async fn sign_envelope(
        &self,
        operation: &str,
        envelope: &SignInEnvelope,
    ) -> Result<UserResponse<DerivedSignature>> {
        let response = self
            .wallet
            .sign_envelope(envelope)
            .await
            .map_err(|e| Error::transport(self.operation(operation), e))?;

        let UserResponse::Approved(native) = response else {
            info!(wallet = %self.name(), operation, "User rejected signature request");
            return Ok(UserResponse::Rejected);
        };

        let expected = self.family().expected_scheme();
        if native.scheme != expected {
            return Err(Error::UnsupportedSignatureType {
                expected: expected.to_string(),
                actual: native.scheme.to_string(),
            });
        }

        Ok(UserResponse::Approved(DerivedSignature::new(
            envelope.kind(),
            self.config.scheme(),
            envelope.issued_at(),
            native.bytes,
        )))
    }
}

#[async_trait]
impl<W: ForeignWallet> TransactionSigner for DerivedSigner<W> {
    async fn account_address(&self) -> Result<AccountAddress> {
        Ok(self.get_active_account().await?.address())
    }

    async fn sign_transaction(
        &self,
        transaction: &AnyRawTransaction,
        as_fee_payer: bool,
    ) -> Result<UserResponse<AccountAuthenticator>> {
        DerivedSigner::sign_transaction(self, transaction, as_fee_payer).await
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transfer Orchestrator
//!
//! Drives a bridge transfer into Cedra:
//!
//! 1. `get_quote` asks the provider for a route from the source chain
//! 2. `initiate_transfer` signs and submits the source-leg burn and returns a
//!    [`TransferReceipt`]
//! 3. `claim_transfer` waits (bounded) for the attestation and submits the
//!    mint on Cedra
//!
//! Each chain is reached through a registered [`ChainClient`]. A timed-out
//! or declined claim leaves the receipt usable for another attempt; an
//! attestation already fetched is kept on the receipt.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::poll::{poll_until_ready, PollPolicy, Polled};
use super::provider::{AttestationStatus, BridgeProvider, ProviderKind, Quote};
use super::{format_usdc_amount, parse_usdc_amount, Chain};
use crate::chain::client::ChainClient;
use crate::chain::signer::{sign_and_submit, TransactionSigner};
use crate::chain::types::{AccountAddress, Network};
use crate::config::CrossChainConfig;
use crate::error::{Error, Result};
use crate::wallet::UserResponse;

/// Whether the attestation for a receipt's source leg has been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AttestationState {
    Pending,
    Attested {
        message: Vec<u8>,
        attestation: Vec<u8>,
    },
}

/// Handle for tracking a transfer from its source leg to the claim.
/// Serializable so callers can persist it and claim later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: Uuid,
    pub provider: ProviderKind,
    pub source_chain: Chain,
    pub destination_chain: Chain,
    pub source_tx_id: String,
    pub recipient: AccountAddress,
    pub amount: U256,
    pub attestation: AttestationState,
    pub created_at: DateTime<Utc>,
}

impl TransferReceipt {
    /// Whether the claim can be submitted without polling.
    pub fn is_attested(&self) -> bool {
        matches!(self.attestation, AttestationState::Attested { .. })
    }
}

/// Outcome of an approved source leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatedTransfer {
    pub source_tx_id: String,
    pub receipt: TransferReceipt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedTransfer {
    pub destination_tx_id: String,
}

pub struct TransferOrchestrator {
    network: Network,
    provider: Arc<dyn BridgeProvider>,
    clients: HashMap<Chain, Arc<dyn ChainClient>>,
    poll_policy: PollPolicy,
    claim_sponsor: Option<Arc<dyn TransactionSigner>>,
}

impl TransferOrchestrator {
    /// Orchestrator with no chain clients and the default poll policy.
    pub fn new(network: Network, provider: Arc<dyn BridgeProvider>) -> Self {
        Self {
            network,
            provider,
            clients: HashMap::new(),
            poll_policy: PollPolicy::default(),
            claim_sponsor: None,
        }
    }

    /// Orchestrator wired from configuration.
    ///
    /// Registers a [`NodeClient`](crate::chain::NodeClient) for Cedra (the
    /// configured node URL, or the network's public fullnode), applies the
    /// poll policy and loads the configured sponsor as the fee payer for
    /// claims. Source-chain clients are registered by the caller with
    /// [`Self::with_chain_client`].
    ///
    /// # Errors
    /// `UnsupportedNetwork` when no Cedra node can be resolved, or
    /// `InvalidPrivateKey` when the sponsor key file cannot be loaded.
    pub fn from_config(config: &CrossChainConfig, provider: Arc<dyn BridgeProvider>) -> Result<Self> {
        let cedra = config.node_client()?;
        info!(
            network = %config.network,
            node_url = %cedra.base_url(),
            "Configured Cedra node for claims"
        );

        let mut orchestrator = Self::new(config.network, provider)
            .with_chain_client(Chain::Cedra, Arc::new(cedra))
            .with_poll_policy(config.poll_policy);

        if let Some(sponsor) = config.sponsor()? {
            info!(sponsor = %sponsor.address(), "Claims are sponsored");
            orchestrator = orchestrator.with_claim_sponsor(Arc::new(sponsor));
        }
        Ok(orchestrator)
    }

    /// Register the client used to reach `chain`, replacing any earlier one.
    pub fn with_chain_client(mut self, chain: Chain, client: Arc<dyn ChainClient>) -> Self {
        self.clients.insert(chain, client);
        self
    }

    /// Backoff and wait budget used while waiting for attestations.
    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    /// Fee payer for claims when the caller passes no sponsor.
    pub fn with_claim_sponsor(mut self, sponsor: Arc<dyn TransactionSigner>) -> Self {
        self.claim_sponsor = Some(sponsor);
        self
    }

    fn client(&self, chain: Chain) -> Result<&dyn ChainClient> {
        self.clients
            .get(&chain)
            .map(|client| client.as_ref())
            .ok_or_else(|| Error::MissingConfig(format!("no chain client registered for {chain}")))
    }

    /// Price a transfer of `amount` USDC from `source_chain` into Cedra.
    ///
    /// # Arguments
    /// * `source_chain` - chain name, case-insensitive (`Solana`, `Ethereum`, `Sepolia`)
    /// * `amount` - decimal USDC amount, at most 6 fractional digits
    ///
    /// # Errors
    /// `RouteNotFound` for an unknown chain, a chain not offered on the
    /// active network, or when the provider has no route. No chain is
    /// contacted while quoting.
    pub async fn get_quote(&self, source_chain: &str, amount: &str) -> Result<Quote> {
        let source: Chain = source_chain.parse()?;
        let destination = Chain::DESTINATION;
        let no_route = || Error::RouteNotFound {
            source_chain: source.to_string(),
            destination_chain: destination.to_string(),
        };

        if !Chain::sources_for(self.network).contains(&source) {
            return Err(no_route());
        }
        let amount = parse_usdc_amount(amount)?;

        let route = self
            .provider
            .find_route(source, destination, amount)
            .await?
            .ok_or_else(no_route)?;

        info!(
            %source,
            %destination,
            amount = %format_usdc_amount(amount),
            route_id = %route.id,
            fee = %format_usdc_amount(route.fee),
            "Quoted transfer"
        );

        Ok(Quote {
            provider: self.provider.kind(),
            source_chain: source,
            destination_chain: destination,
            amount,
            route_id: route.id,
            fee: route.fee,
            estimated_seconds: route.estimated_seconds,
        })
    }

    /// Sign and submit the source leg.
    ///
    /// # Arguments
    /// * `quote` - quote from [`Self::get_quote`]
    /// * `signer` - holder of the source-chain funds
    /// * `destination` - Cedra account receiving the minted USDC
    /// * `sponsor` - optional fee payer for the source leg
    ///
    /// # Returns
    /// The source transaction id and a [`TransferReceipt`] to claim with, or
    /// `Rejected` if the signer or the sponsor declines. Nothing is
    /// submitted on rejection.
    pub async fn initiate_transfer(
        &self,
        quote: &Quote,
        signer: &dyn TransactionSigner,
        destination: AccountAddress,
        sponsor: Option<&dyn TransactionSigner>,
    ) -> Result<UserResponse<InitiatedTransfer>> {
        let client = self.client(quote.source_chain)?;
        let payload = self.provider.transfer_payload(quote, destination)?;

        info!(
            source = %quote.source_chain,
            recipient = %destination,
            amount = %format_usdc_amount(quote.amount),
            "Initiating transfer"
        );

        let UserResponse::Approved(source_tx_id) =
            sign_and_submit(client, signer, payload, sponsor).await?
        else {
            info!(source = %quote.source_chain, "Transfer declined");
            return Ok(UserResponse::Rejected);
        };

        let receipt = TransferReceipt {
            id: Uuid::new_v4(),
            provider: quote.provider,
            source_chain: quote.source_chain,
            destination_chain: quote.destination_chain,
            source_tx_id: source_tx_id.clone(),
            recipient: destination,
            amount: quote.amount,
            attestation: AttestationState::Pending,
            created_at: Utc::now(),
        };

        info!(transfer_id = %receipt.id, source_tx_id = %source_tx_id, "Source leg final");
        Ok(UserResponse::Approved(InitiatedTransfer {
            source_tx_id,
            receipt,
        }))
    }

    /// Wait for the attestation and submit the claim on Cedra.
    ///
    /// # Arguments
    /// * `receipt` - receipt from [`Self::initiate_transfer`]; the fetched
    ///   attestation is stored on it so a retried claim does not poll again
    /// * `signer` - Cedra signer submitting the claim
    /// * `sponsor` - fee payer; falls back to the configured claim sponsor
    ///
    /// # Errors
    /// `AttestationTimeout` when the attestation is not available within the
    /// poll policy's budget. The receipt is left unchanged in that case.
    pub async fn claim_transfer(
        &self,
        receipt: &mut TransferReceipt,
        signer: &dyn TransactionSigner,
        sponsor: Option<&dyn TransactionSigner>,
    ) -> Result<UserResponse<ClaimedTransfer>> {
        let (message, attestation) = match &receipt.attestation {
            AttestationState::Attested {
                message,
                attestation,
            } => (message.clone(), attestation.clone()),
            AttestationState::Pending => self.await_attestation(receipt).await?,
        };
        receipt.attestation = AttestationState::Attested {
            message: message.clone(),
            attestation: attestation.clone(),
        };

        let client = self.client(receipt.destination_chain)?;
        let payload = self.provider.claim_payload(&message, &attestation)?;
        let sponsor = sponsor.or(self.claim_sponsor.as_deref());

        let UserResponse::Approved(destination_tx_id) =
            sign_and_submit(client, signer, payload, sponsor).await?
        else {
            info!(transfer_id = %receipt.id, "Claim declined");
            return Ok(UserResponse::Rejected);
        };

        info!(
            transfer_id = %receipt.id,
            destination_tx_id = %destination_tx_id,
            "Transfer claimed"
        );
        Ok(UserResponse::Approved(ClaimedTransfer { destination_tx_id }))
    }

    async fn await_attestation(&self, receipt: &TransferReceipt) -> Result<(Vec<u8>, Vec<u8>)> {
        let provider = self.provider.as_ref();
        let source = receipt.source_chain;
        let source_tx_id = receipt.source_tx_id.as_str();

        info!(transfer_id = %receipt.id, %source, source_tx_id, "Waiting for attestation");
        let polled = poll_until_ready(&self.poll_policy, move || async move {
            Ok(match provider.fetch_attestation(source, source_tx_id).await? {
                AttestationStatus::Complete {
                    message,
                    attestation,
                } => Some((message, attestation)),
                AttestationStatus::Pending => None,
            })
        })
        .await;

        match polled {
            Polled::Ready(attested) => Ok(attested),
            Polled::TimedOut { waited, attempts } => {
                warn!(
                    transfer_id = %receipt.id,
                    source_tx_id,
                    attempts,
                    waited_secs = waited.as_secs(),
                    "Attestation not available"
                );
                Err(Error::AttestationTimeout {
                    source_tx_id: source_tx_id.to_string(),
                    waited,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::authenticator::TransactionAuthenticator;
    use crate::chain::local::LocalAccount;
    use crate::chain::signer::tests::{DecliningSigner, RecordingChain};
    use crate::chain::transaction::{EntryFunction, TransactionPayload};
    use crate::transfer::provider::Route;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Provider whose attestation completes after `pending_polls` pending
    /// answers. `None` never completes.
    struct FakeProvider {
        route: Option<Route>,
        pending_polls: Option<usize>,
        route_queries: AtomicUsize,
        attestation_polls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(pending_polls: Option<usize>) -> Self {
            Self {
                route: Some(Route {
                    id: "standard".into(),
                    fee: U256::from(1_000u64),
                    estimated_seconds: 900,
                }),
                pending_polls,
                route_queries: AtomicUsize::new(0),
                attestation_polls: AtomicUsize::new(0),
            }
        }
    }

    fn call(function: &str, args: Vec<Vec<u8>>) -> TransactionPayload {
        TransactionPayload::EntryFunction(EntryFunction::new(
            AccountAddress::from_hex("0xb1d9e").unwrap(),
            "bridge",
            function,
            vec![],
            args,
        ))
    }

    #[async_trait]
    impl BridgeProvider for FakeProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Attestation
        }

        async fn find_route(&self, _: Chain, _: Chain, _: U256) -> Result<Option<Route>> {
            self.route_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.route.clone())
        }

        fn transfer_payload(&self, quote: &Quote, recipient: AccountAddress) -> Result<TransactionPayload> {
            Ok(call(
                "burn",
                vec![bcs::to_bytes(&quote.amount.to::<u64>())?, bcs::to_bytes(&recipient)?],
            ))
        }

        async fn fetch_attestation(&self, _: Chain, _: &str) -> Result<AttestationStatus> {
            let polls = self.attestation_polls.fetch_add(1, Ordering::SeqCst);
            Ok(match self.pending_polls {
                Some(pending) if polls >= pending => AttestationStatus::Complete {
                    message: vec![0x01, 0x02],
                    attestation: vec![0xaa; 65],
                },
                _ => AttestationStatus::Pending,
            })
        }

        fn claim_payload(&self, message: &[u8], attestation: &[u8]) -> Result<TransactionPayload> {
            Ok(call("mint", vec![message.to_vec(), attestation.to_vec()]))
        }
    }

    struct Harness {
        provider: Arc<FakeProvider>,
        solana: Arc<RecordingChain>,
        cedra: Arc<RecordingChain>,
        orchestrator: TransferOrchestrator,
    }

    fn harness(network: Network, provider: FakeProvider) -> Harness {
        let provider = Arc::new(provider);
        let solana = Arc::new(RecordingChain::with_chain_id(101));
        let cedra = Arc::new(RecordingChain::with_chain_id(2));
        let orchestrator = TransferOrchestrator::new(network, provider.clone())
            .with_chain_client(Chain::Solana, solana.clone())
            .with_chain_client(Chain::Cedra, cedra.clone())
            .with_poll_policy(PollPolicy {
                initial_interval: Duration::from_secs(1),
                multiplier: 2,
                max_interval: Duration::from_secs(8),
                max_wait: Duration::from_secs(30),
            });
        Harness {
            provider,
            solana,
            cedra,
            orchestrator,
        }
    }

    fn account(seed: u8) -> LocalAccount {
        LocalAccount::from_private_key_hex(&alloy::hex::encode([seed; 32])).unwrap()
    }

    async fn initiated(h: &Harness) -> TransferReceipt {
        let quote = h.orchestrator.get_quote("Solana", "2.5").await.unwrap();
        h.orchestrator
            .initiate_transfer(&quote, &account(1), account(3).address(), None)
            .await
            .unwrap()
            .approved()
            .unwrap()
            .receipt
    }

    #[tokio::test]
    async fn quote_carries_route_and_base_units() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(0)));
        let quote = h.orchestrator.get_quote("solana", "2.5").await.unwrap();

        assert_eq!(quote.source_chain, Chain::Solana);
        assert_eq!(quote.destination_chain, Chain::Cedra);
        assert_eq!(quote.amount, U256::from(2_500_000u64));
        assert_eq!(quote.route_id, "standard");
        assert_eq!(quote.fee, U256::from(1_000u64));
    }

    #[tokio::test]
    async fn unknown_source_chain_has_no_route() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(0)));

        let err = h.orchestrator.get_quote("Dogechain", "1").await.unwrap_err();

        assert!(matches!(err, Error::RouteNotFound { .. }));
        assert_eq!(h.provider.route_queries.load(Ordering::SeqCst), 0);
        assert_eq!(h.solana.built_count(), 0);
        assert_eq!(h.cedra.built_count(), 0);
    }

    #[tokio::test]
    async fn chain_outside_network_has_no_route() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(0)));
        let err = h.orchestrator.get_quote("Ethereum", "1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::RouteNotFound { ref source_chain, .. } if source_chain == "Ethereum"
        ));
    }

    #[tokio::test]
    async fn provider_without_route_is_route_not_found() {
        let mut provider = FakeProvider::new(Some(0));
        provider.route = None;
        let h = harness(Network::Mainnet, provider);

        let err = h.orchestrator.get_quote("Solana", "10").await.unwrap_err();

        assert!(matches!(err, Error::RouteNotFound { .. }));
        assert_eq!(h.provider.route_queries.load(Ordering::SeqCst), 1);
        assert_eq!(h.solana.built_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transfer_runs_from_burn_to_sponsored_claim() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(2)));
        let mut receipt = initiated(&h).await;

        assert_eq!(h.solana.submitted_count(), 1);
        assert_eq!(receipt.source_tx_id, format!("0x{:064x}", 1));
        assert_eq!(receipt.recipient, account(3).address());
        assert!(!receipt.is_attested());

        let sponsor = account(9);
        let claimed = h
            .orchestrator
            .claim_transfer(&mut receipt, &account(3), Some(&sponsor as &dyn TransactionSigner))
            .await
            .unwrap()
            .approved()
            .unwrap();

        assert_eq!(claimed.destination_tx_id, format!("0x{:064x}", 1));
        assert_eq!(h.provider.attestation_polls.load(Ordering::SeqCst), 3);
        assert!(receipt.is_attested());

        let submitted = h.cedra.submitted.lock().unwrap();
        assert!(matches!(
            &submitted[0].authenticator,
            TransactionAuthenticator::FeePayer { fee_payer_address, .. } if *fee_payer_address == sponsor.address()
        ));
        let entry = submitted[0].raw_txn.payload.entry_function().unwrap();
        assert_eq!(entry.function, "mint");
        assert_eq!(entry.args[0], vec![0x01, 0x02]);
    }

    #[tokio::test(start_paused = true)]
    async fn attestation_timeout_keeps_receipt() {
        let h = harness(Network::Testnet, FakeProvider::new(None));
        let mut receipt = initiated(&h).await;
        let before = receipt.clone();

        let err = h
            .orchestrator
            .claim_transfer(&mut receipt, &account(3), None)
            .await
            .unwrap_err();

        match err {
            Error::AttestationTimeout {
                source_tx_id,
                waited,
            } => {
                assert_eq!(source_tx_id, before.source_tx_id);
                assert_eq!(waited, Duration::from_secs(30));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(receipt, before);
        assert_eq!(h.cedra.built_count(), 0);
    }

    #[tokio::test]
    async fn declined_source_leg_submits_nothing() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(0)));
        let quote = h.orchestrator.get_quote("Solana", "1").await.unwrap();
        let signer = DecliningSigner(AccountAddress::from_hex("0xabc").unwrap());

        let response = h
            .orchestrator
            .initiate_transfer(&quote, &signer, account(3).address(), None)
            .await
            .unwrap();

        assert!(response.is_rejected());
        assert_eq!(h.solana.submitted_count(), 0);
    }

    #[tokio::test]
    async fn declined_claim_keeps_attestation_for_retry() {
        let h = harness(Network::Testnet, FakeProvider::new(Some(0)));
        let mut receipt = initiated(&h).await;
        let decliner = DecliningSigner(account(3).address());

        let response = h
            .orchestrator
            .claim_transfer(&mut receipt, &decliner, None)
            .await
            .unwrap();
        assert!(response.is_rejected());
        assert!(receipt.is_attested());
        assert_eq!(h.cedra.submitted_count(), 0);

        h.orchestrator
            .claim_transfer(&mut receipt, &account(3), None)
            .await
            .unwrap()
            .approved()
            .unwrap();
        assert_eq!(h.provider.attestation_polls.load(Ordering::SeqCst), 1);
        assert_eq!(h.cedra.submitted_count(), 1);
    }

    #[tokio::test]
    async fn missing_chain_client_is_a_config_error() {
        let provider = Arc::new(FakeProvider::new(Some(0)));
        let orchestrator = TransferOrchestrator::new(Network::Testnet, provider);
        let quote = orchestrator.get_quote("Solana", "1").await.unwrap();

        let err = orchestrator
            .initiate_transfer(&quote, &account(1), account(3).address(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfig(_)));
    }

    fn cross_chain_config(network: Network, node_url: Option<&str>) -> CrossChainConfig {
        CrossChainConfig {
            network,
            bridge_api_url: url::Url::parse("https://iris.example.com").unwrap(),
            bridge_module: AccountAddress::from_hex("0xb1d9e").unwrap(),
            node_url: node_url.map(str::to_string),
            poll_policy: PollPolicy::default(),
            sponsor_key_path: None,
        }
    }

    #[tokio::test]
    async fn from_config_registers_cedra_node_for_claims() {
        let mut key_file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut key_file, alloy::hex::encode([9u8; 32]).as_bytes()).unwrap();
        let mut config = cross_chain_config(Network::Testnet, Some("http://127.0.0.1:9/v1"));
        config.sponsor_key_path = Some(key_file.path().to_path_buf());

        let provider = Arc::new(FakeProvider::new(Some(0)));
        let solana = Arc::new(RecordingChain::with_chain_id(101));
        let orchestrator = TransferOrchestrator::from_config(&config, provider)
            .unwrap()
            .with_chain_client(Chain::Solana, solana.clone());

        assert_eq!(
            orchestrator.claim_sponsor.as_ref().unwrap().account_address().await.unwrap(),
            account(9).address()
        );

        let quote = orchestrator.get_quote("Solana", "1").await.unwrap();
        let mut receipt = orchestrator
            .initiate_transfer(&quote, &account(1), account(3).address(), None)
            .await
            .unwrap()
            .approved()
            .unwrap()
            .receipt;
        assert_eq!(solana.submitted_count(), 1);

        // The claim reaches the configured node, which is not listening.
        let err = orchestrator
            .claim_transfer(&mut receipt, &account(3), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }), "unexpected {err:?}");
        assert!(receipt.is_attested());
    }

    #[test]
    fn from_config_needs_a_cedra_node() {
        let provider = Arc::new(FakeProvider::new(Some(0)));
        let config = cross_chain_config(Network::Custom, None);
        assert!(matches!(
            TransferOrchestrator::from_config(&config, provider),
            Err(Error::UnsupportedNetwork(_))
        ));
    }

    #[tokio::test]
    async fn claim_sponsor_pays_when_caller_passes_none() {
        let mut h = harness(Network::Testnet, FakeProvider::new(Some(0)));
        h.orchestrator = h.orchestrator.with_claim_sponsor(Arc::new(account(9)));
        let mut receipt = initiated(&h).await;

        h.orchestrator
            .claim_transfer(&mut receipt, &account(3), None)
            .await
            .unwrap()
            .approved()
            .unwrap();

        let submitted = h.cedra.submitted.lock().unwrap();
        assert!(matches!(
            &submitted[0].authenticator,
            TransactionAuthenticator::FeePayer { fee_payer_address, .. } if *fee_payer_address == account(9).address()
        ));
        // Source legs are never sponsored implicitly.
        let source = h.solana.submitted.lock().unwrap();
        assert!(!matches!(
            &source[0].authenticator,
            TransactionAuthenticator::FeePayer { .. }
        ));
    }

    #[test]
    fn receipt_survives_json_round_trip() {
        let receipt = TransferReceipt {
            id: Uuid::new_v4(),
            provider: ProviderKind::Attestation,
            source_chain: Chain::Solana,
            destination_chain: Chain::Cedra,
            source_tx_id: "5h8k".into(),
            recipient: AccountAddress::from_hex("0xcafe").unwrap(),
            amount: U256::from(2_500_000u64),
            attestation: AttestationState::Pending,
            created_at: DateTime::from_timestamp_millis(1_740_832_200_000).unwrap(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        assert_eq!(serde_json::from_str::<TransferReceipt>(&json).unwrap(), receipt);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction signer seam and the sign-then-submit flow.

use async_trait::async_trait;
use tracing::info;

use super::authenticator::{AccountAuthenticator, TransactionAuthenticator};
use super::client::ChainClient;
use super::local::LocalAccount;
use super::transaction::{AnyRawTransaction, SignedTransaction, TransactionPayload};
use super::types::AccountAddress;
use crate::error::Result;
use crate::wallet::UserResponse;

/// Anything that can authorize Cedra transactions for one account.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Account this signer authorizes for.
    async fn account_address(&self) -> Result<AccountAddress>;

    /// Produce an authenticator over the transaction's signing message.
    /// `as_fee_payer` marks the sponsor's signature on a sponsored transaction.
    async fn sign_transaction(
        &self,
        transaction: &AnyRawTransaction,
        as_fee_payer: bool,
    ) -> Result<UserResponse<AccountAuthenticator>>;
}

#[async_trait]
impl TransactionSigner for LocalAccount {
    async fn account_address(&self) -> Result<AccountAddress> {
        Ok(self.address())
    }

    async fn sign_transaction(
        &self,
        transaction: &AnyRawTransaction,
        _as_fee_payer: bool,
    ) -> Result<UserResponse<AccountAuthenticator>> {
        self.authenticate(transaction).map(UserResponse::Approved)
    }
}

/// Build, sign (sender, then sponsor), submit and wait for finality.
///
/// Returns the transaction hash, or `Rejected` without submitting when
/// either party declines.
pub async fn sign_and_submit(
    client: &dyn ChainClient,
    signer: &dyn TransactionSigner,
    payload: TransactionPayload,
    sponsor: Option<&dyn TransactionSigner>,
) -> Result<UserResponse<String>> {
    let sender = signer.account_address().await?;
    let fee_payer = match sponsor {
        Some(sponsor) => Some(sponsor.account_address().await?),
        None => None,
    };

    let transaction = client.build_transaction(sender, payload, fee_payer).await?;

    let UserResponse::Approved(sender_auth) = signer.sign_transaction(&transaction, false).await?
    else {
        info!(sender = %sender, "Sender declined to sign");
        return Ok(UserResponse::Rejected);
    };

    let authenticator = match (sponsor, fee_payer) {
        (Some(sponsor), Some(fee_payer_address)) => {
            let UserResponse::Approved(fee_payer_auth) =
                sponsor.sign_transaction(&transaction, true).await?
            else {
                info!(sender = %sender, fee_payer = %fee_payer_address, "Sponsor declined to sign");
                return Ok(UserResponse::Rejected);
            };
            TransactionAuthenticator::fee_payer(sender_auth, fee_payer_address, fee_payer_auth)
        }
        _ => TransactionAuthenticator::single_sender(sender_auth),
    };

    let signed = SignedTransaction {
        raw_txn: transaction.raw_transaction,
        authenticator,
    };

    info!(
        sender = %sender,
        sponsored = fee_payer.is_some(),
        "Submitting signed transaction"
    );
    let hash = client.submit_and_wait(&signed).await?;

    Ok(UserResponse::Approved(hash))
}

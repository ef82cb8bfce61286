// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cedra Derived Wallet - Foreign-key signing and cross-chain transfers
//!
//! Lets an Ethereum or Solana wallet act as a Cedra signer for an account
//! derived from its address and the dapp domain, and moves USDC into Cedra
//! through an attestation bridge.
//!
//! ## Modules
//!
//! - `chain` - Cedra addresses, transactions, authenticators and node client
//! - `wallet` - Foreign wallet seam plus headless Ethereum and Solana wallets
//! - `derived` - Derived identities, sign-in envelopes and the derived signer
//! - `transfer` - Quotes, source-leg burns, attestation polling and claims
//! - `config` - Environment-driven configuration

pub mod chain;
pub mod config;
pub mod derived;
pub mod error;
pub mod transfer;
pub mod wallet;

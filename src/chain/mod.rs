// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cedra chain integration.
//!
//! This module provides:
//! - Addresses, networks and chain-id naming
//! - BCS transaction and authenticator encodings
//! - Native ed25519 accounts (sponsors, operators)
//! - The node client used to build, submit and wait for transactions

pub mod authenticator;
pub mod client;
pub mod local;
pub mod signer;
pub mod transaction;
pub mod types;

pub use client::{ChainClient, NodeClient};
pub use local::LocalAccount;
pub use signer::{sign_and_submit, TransactionSigner};
pub use types::*;

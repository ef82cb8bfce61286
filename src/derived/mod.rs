// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Derived-identity signing: foreign Ethereum and Solana keys acting as
//! Cedra signers through account abstraction.

pub mod envelope;
pub mod identity;
pub mod listeners;
pub mod message;
pub mod signature;
pub mod signer;

pub use identity::DerivedIdentity;
pub use listeners::Listener;
pub use message::StructuredMessage;
pub use signature::DerivedSignature;
pub use signer::{
    ChangeNetworkOutput, ConnectionState, DerivedSigner, SignMessageInput, SignMessageOutput,
};

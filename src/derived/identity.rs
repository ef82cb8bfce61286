// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Derivation of Cedra accounts from foreign-chain addresses.
//!
//! The abstract public key is `bcs((identity, domain))` where `identity` is
//! the family's canonical address text. The authentication key, which is
//! also the account address, is
//! `sha3_256(bcs(function_info) || bcs(abstract_public_key) || 0x05)`.

use serde::Serialize;

use crate::chain::authenticator::FunctionInfo;
use crate::chain::transaction::sha3_256;
use crate::chain::types::AccountAddress;
use crate::error::Result;
use crate::wallet::{ChainFamily, ForeignAddress};

pub const ETHEREUM_AUTHENTICATION_FUNCTION: &str = "0x1::ethereum_derivable_account::authenticate";
pub const SOLANA_AUTHENTICATION_FUNCTION: &str = "0x1::solana_derivable_account::authenticate";

/// Authentication-key scheme byte for derivable abstracted accounts.
pub const DERIVABLE_ABSTRACTION_SCHEME: u8 = 0x05;

/// Framework function verifying envelopes for a family.
pub fn default_authentication_function(family: ChainFamily) -> FunctionInfo {
    let module_name = match family {
        ChainFamily::Ethereum => "ethereum_derivable_account",
        ChainFamily::Solana => "solana_derivable_account",
    };
    FunctionInfo {
        module_address: AccountAddress::ONE,
        module_name: module_name.to_string(),
        function_name: "authenticate".to_string(),
    }
}

/// Cedra account controlled by a foreign key for one domain.
///
/// Two identities are equal iff family, domain, foreign address and
/// authentication function all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedIdentity {
    family: ChainFamily,
    domain: String,
    foreign_address: ForeignAddress,
    authentication_function: FunctionInfo,
    abstract_public_key: Vec<u8>,
    address: AccountAddress,
}

#[derive(Serialize)]
struct AbstractPublicKey<'a> {
    identity: &'a [u8],
    domain: &'a [u8],
}

impl DerivedIdentity {
    pub fn derive(
        domain: impl Into<String>,
        foreign_address: ForeignAddress,
        authentication_function: FunctionInfo,
    ) -> Result<Self> {
        let domain = domain.into();
        let identity = foreign_address.canonical();

        let abstract_public_key = bcs::to_bytes(&AbstractPublicKey {
            identity: identity.as_bytes(),
            domain: domain.as_bytes(),
        })?;

        let mut preimage = bcs::to_bytes(&authentication_function)?;
        preimage.extend(bcs::to_bytes(&abstract_public_key)?);
        preimage.push(DERIVABLE_ABSTRACTION_SCHEME);
        let address = AccountAddress::new(sha3_256(&preimage));

        Ok(Self {
            family: foreign_address.family(),
            domain,
            foreign_address,
            authentication_function,
            abstract_public_key,
            address,
        })
    }

    pub fn family(&self) -> ChainFamily {
        self.family
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn foreign_address(&self) -> &ForeignAddress {
        &self.foreign_address
    }

    pub fn authentication_function(&self) -> &FunctionInfo {
        &self.authentication_function
    }

    pub fn abstract_public_key(&self) -> &[u8] {
        &self.abstract_public_key
    }

    /// Cedra address, equal to the authentication key.
    pub fn address(&self) -> AccountAddress {
        self.address
    }
}

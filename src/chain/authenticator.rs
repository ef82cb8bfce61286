// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account and transaction authenticators.

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeStructVariant, Serializer};
use serde::{Deserialize, Serialize};

use super::types::AccountAddress;
use crate::error::Error;

/// Reference to the Move function that authenticates an abstracted account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub module_address: AccountAddress,
    pub module_name: String,
    pub function_name: String,
}

impl FromStr for FunctionInfo {
    type Err = Error;

    /// Parse `<address>::<module>::<function>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        let [address, module, function] = parts.as_slice() else {
            return Err(Error::InvalidAuthenticationFunction(s.to_string()));
        };
        if module.is_empty() || function.is_empty() {
            return Err(Error::InvalidAuthenticationFunction(s.to_string()));
        }

        let module_address = AccountAddress::from_hex(address)
            .map_err(|_| Error::InvalidAuthenticationFunction(s.to_string()))?;

        Ok(Self {
            module_address,
            module_name: module.to_string(),
            function_name: function.to_string(),
        })
    }
}

impl fmt::Display for FunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.module_address, self.module_name, self.function_name
        )
    }
}

/// Data handed to an account-abstraction authentication function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbstractionAuthData {
    V1 {
        signing_message_digest: Vec<u8>,
        authenticator: Vec<u8>,
    },
    DerivableV1 {
        signing_message_digest: Vec<u8>,
        abstract_signature: Vec<u8>,
        abstract_public_key: Vec<u8>,
    },
}

/// Proof that one account approved a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAuthenticator {
    /// Native ed25519 account.
    Ed25519 {
        public_key: Vec<u8>,
        signature: Vec<u8>,
    },
    /// Account authenticated by an on-chain Move function.
    Abstraction {
        function_info: FunctionInfo,
        auth_data: AbstractionAuthData,
    },
}

impl AccountAuthenticator {
    const ED25519_INDEX: u32 = 0;
    const ABSTRACTION_INDEX: u32 = 5;
}

impl Serialize for AccountAuthenticator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AccountAuthenticator::Ed25519 {
                public_key,
                signature,
            } => {
                let mut v = serializer.serialize_struct_variant(
                    "AccountAuthenticator",
                    Self::ED25519_INDEX,
                    "Ed25519",
                    2,
                )?;
                v.serialize_field("public_key", public_key)?;
                v.serialize_field("signature", signature)?;
                v.end()
            }
            AccountAuthenticator::Abstraction {
                function_info,
                auth_data,
            } => {
                let mut v = serializer.serialize_struct_variant(
                    "AccountAuthenticator",
                    Self::ABSTRACTION_INDEX,
                    "Abstraction",
                    2,
                )?;
                v.serialize_field("function_info", function_info)?;
                v.serialize_field("auth_data", auth_data)?;
                v.end()
            }
        }
    }
}

/// Authenticator attached to a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAuthenticator {
    FeePayer {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
        fee_payer_address: AccountAddress,
        fee_payer_signer: AccountAuthenticator,
    },
    SingleSender {
        sender: AccountAuthenticator,
    },
}

impl TransactionAuthenticator {
    const FEE_PAYER_INDEX: u32 = 3;
    const SINGLE_SENDER_INDEX: u32 = 4;

    pub fn single_sender(sender: AccountAuthenticator) -> Self {
        Self::SingleSender { sender }
    }

    pub fn fee_payer(
        sender: AccountAuthenticator,
        fee_payer_address: AccountAddress,
        fee_payer_signer: AccountAuthenticator,
    ) -> Self {
        Self::FeePayer {
            sender,
            secondary_signer_addresses: Vec::new(),
            secondary_signers: Vec::new(),
            fee_payer_address,
            fee_payer_signer,
        }
    }
}

impl Serialize for TransactionAuthenticator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransactionAuthenticator::FeePayer {
                sender,
                secondary_signer_addresses,
                secondary_signers,
                fee_payer_address,
                fee_payer_signer,
            } => {
                let mut v = serializer.serialize_struct_variant(
                    "TransactionAuthenticator",
                    Self::FEE_PAYER_INDEX,
                    "FeePayer",
                    5,
                )?;
                v.serialize_field("sender", sender)?;
                v.serialize_field("secondary_signer_addresses", secondary_signer_addresses)?;
                v.serialize_field("secondary_signers", secondary_signers)?;
                v.serialize_field("fee_payer_address", fee_payer_address)?;
                v.serialize_field("fee_payer_signer", fee_payer_signer)?;
                v.end()
            }
            TransactionAuthenticator::SingleSender { sender } => {
                let mut v = serializer.serialize_struct_variant(
                    "TransactionAuthenticator",
                    Self::SINGLE_SENDER_INDEX,
                    "SingleSender",
                    1,
                )?;
                v.serialize_field("sender", sender)?;
                v.end()
            }
        }
    }
}

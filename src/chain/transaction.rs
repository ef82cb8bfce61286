// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cedra raw transactions, payloads and signing messages.
//!
//! Everything here is BCS-encoded exactly as the chain expects. Enum variant
//! indices are part of the wire format, so enums whose on-chain definition
//! has variants we never produce are serialized by hand with explicit
//! indices.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use super::authenticator::TransactionAuthenticator;
use super::types::AccountAddress;
use crate::error::Result;

/// Domain separator for single-signer transactions.
pub const RAW_TRANSACTION_SALT: &[u8] = b"CEDRA::RawTransaction";
/// Domain separator for transactions carrying extra signer data (fee payer).
pub const RAW_TRANSACTION_WITH_DATA_SALT: &[u8] = b"CEDRA::RawTransactionWithData";

/// SHA3-256 helper.
pub fn sha3_256(bytes: &[u8]) -> [u8; 32] {
    Sha3_256::digest(bytes).into()
}

/// Move type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// Fully qualified Move struct type, e.g. `0x1::cedra_coin::CedraCoin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_args: Vec<TypeTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

/// Call of a public entry function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: String,
    pub ty_args: Vec<TypeTag>,
    /// Each argument is individually BCS-encoded.
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    pub fn new(
        address: AccountAddress,
        module: impl Into<String>,
        function: impl Into<String>,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            module: ModuleId {
                address,
                name: module.into(),
            },
            function: function.into(),
            ty_args,
            args,
        }
    }

    /// `<addr>::<module>::<function>`, as shown to users.
    pub fn qualified_name(&self) -> String {
        format!(
            "{}::{}::{}",
            self.module.address, self.module.name, self.function
        )
    }
}

/// Argument of a script payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptArgument {
    U8(u8),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    U8Vector(Vec<u8>),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub code: Vec<u8>,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<ScriptArgument>,
}

/// Transaction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    Script(Script),
    EntryFunction(EntryFunction),
}

impl Serialize for TransactionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // index 1 is the retired module bundle payload
        match self {
            TransactionPayload::Script(script) => {
                serializer.serialize_newtype_variant("TransactionPayload", 0, "Script", script)
            }
            TransactionPayload::EntryFunction(entry) => serializer.serialize_newtype_variant(
                "TransactionPayload",
                2,
                "EntryFunction",
                entry,
            ),
        }
    }
}

impl TransactionPayload {
    /// Entry function being called, if any. Used to name the call in
    /// sign-in statements.
    pub fn entry_function(&self) -> Option<&EntryFunction> {
        match self {
            TransactionPayload::EntryFunction(entry) => Some(entry),
            TransactionPayload::Script(_) => None,
        }
    }
}

/// Unsigned Cedra transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

/// Raw transaction plus the signer data that changes what gets signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyRawTransaction {
    pub raw_transaction: RawTransaction,
    /// Sponsoring account. When set, every party signs the fee-payer message.
    pub fee_payer_address: Option<AccountAddress>,
}

#[derive(Serialize)]
enum RawTransactionWithData<'a> {
    #[allow(dead_code)]
    MultiAgent {
        raw_txn: &'a RawTransaction,
        secondary_signer_addresses: Vec<AccountAddress>,
    },
    MultiAgentWithFeePayer {
        raw_txn: &'a RawTransaction,
        secondary_signer_addresses: Vec<AccountAddress>,
        fee_payer_address: AccountAddress,
    },
}

fn salted(salt: &[u8], body: Vec<u8>) -> Vec<u8> {
    let mut message = sha3_256(salt).to_vec();
    message.extend(body);
    message
}

impl AnyRawTransaction {
    pub fn simple(raw_transaction: RawTransaction) -> Self {
        Self {
            raw_transaction,
            fee_payer_address: None,
        }
    }

    pub fn sponsored(raw_transaction: RawTransaction, fee_payer: AccountAddress) -> Self {
        Self {
            raw_transaction,
            fee_payer_address: Some(fee_payer),
        }
    }

    /// Bytes every signer of this transaction signs over.
    pub fn signing_message(&self) -> Result<Vec<u8>> {
        match self.fee_payer_address {
            None => Ok(salted(
                RAW_TRANSACTION_SALT,
                bcs::to_bytes(&self.raw_transaction)?,
            )),
            Some(fee_payer_address) => {
                let with_data = RawTransactionWithData::MultiAgentWithFeePayer {
                    raw_txn: &self.raw_transaction,
                    secondary_signer_addresses: Vec::new(),
                    fee_payer_address,
                };
                Ok(salted(
                    RAW_TRANSACTION_WITH_DATA_SALT,
                    bcs::to_bytes(&with_data)?,
                ))
            }
        }
    }
}

/// Transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    pub raw_txn: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub fn to_bcs(&self) -> Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawTransaction {
        RawTransaction {
            sender: AccountAddress::from_hex("0xcafe").unwrap(),
            sequence_number: 7,
            payload: TransactionPayload::EntryFunction(EntryFunction::new(
                AccountAddress::ONE,
                "cedra_account",
                "transfer",
                vec![],
                vec![bcs::to_bytes(&AccountAddress::ONE).unwrap(), bcs::to_bytes(&5u64).unwrap()],
            )),
            max_gas_amount: 2_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_000,
            chain_id: 2,
        }
    }

    #[test]
    fn entry_function_payload_uses_index_two() {
        let bytes = bcs::to_bytes(&sample_raw().payload).unwrap();
        assert_eq!(bytes[0], 2);
        // module address follows directly
        assert_eq!(bytes[32], 1);
    }

    #[test]
    fn raw_transaction_ends_with_chain_id() {
        let bytes = bcs::to_bytes(&sample_raw()).unwrap();
        assert_eq!(*bytes.last().unwrap(), 2);
        assert_eq!(&bytes[32..40], &7u64.to_le_bytes());
    }

    #[test]
    fn simple_signing_message_is_salted_raw_bcs() {
        let tx = AnyRawTransaction::simple(sample_raw());
        let message = tx.signing_message().unwrap();
        assert_eq!(&message[..32], &sha3_256(RAW_TRANSACTION_SALT));
        assert_eq!(&message[32..], bcs::to_bytes(&sample_raw()).unwrap().as_slice());
    }

    #[test]
    fn fee_payer_signing_message_commits_to_sponsor() {
        let sponsor = AccountAddress::from_hex("0xbeef").unwrap();
        let tx = AnyRawTransaction::sponsored(sample_raw(), sponsor);
        let message = tx.signing_message().unwrap();

        assert_eq!(&message[..32], &sha3_256(RAW_TRANSACTION_WITH_DATA_SALT));
        // MultiAgentWithFeePayer variant
        assert_eq!(message[32], 1);
        let raw_len = bcs::to_bytes(&sample_raw()).unwrap().len();
        // empty secondary signer list, then the sponsor
        assert_eq!(message[33 + raw_len], 0);
        assert_eq!(&message[34 + raw_len..], sponsor.as_bytes());

        let other = AnyRawTransaction::sponsored(sample_raw(), AccountAddress::ONE);
        assert_ne!(message, other.signing_message().unwrap());
    }

    #[test]
    fn qualified_name_uses_short_framework_address() {
        let entry = sample_raw().payload.entry_function().cloned().unwrap();
        assert_eq!(entry.qualified_name(), "0x1::cedra_account::transfer");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Abstract signature wrapping a foreign wallet's envelope signature.
//!
//! Byte layout (BCS, little-endian integers):
//!
//! ```text
//! [u8 tag][u64 issued_at_ms][uleb128 len][scheme utf8][uleb128 len][signature]
//! ```
//!
//! `tag` is `0` for SIWE and `1` for SIWS envelopes. Transaction
//! authenticators prepend a message-type byte (`1`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::{signing_time, EnvelopeKind};
use crate::error::{Error, Result};

/// Message-type byte telling the on-chain verifier this is a derived
/// envelope signature.
pub const TRANSACTION_MESSAGE_TYPE: u8 = 1;

#[derive(Serialize, Deserialize)]
struct SignatureLayout {
    tag: u8,
    issued_at_ms: u64,
    scheme: String,
    signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSignature {
    pub kind: EnvelopeKind,
    /// URL scheme of the dapp origin, e.g. `https`.
    pub scheme: String,
    pub issued_at: DateTime<Utc>,
    pub signature: Vec<u8>,
}

impl DerivedSignature {
    pub fn new(
        kind: EnvelopeKind,
        scheme: impl Into<String>,
        issued_at: DateTime<Utc>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            kind,
            scheme: scheme.into(),
            issued_at: signing_time(issued_at),
            signature,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let issued_at_ms = u64::try_from(self.issued_at.timestamp_millis()).map_err(|_| {
            Error::Encoding(format!("issued-at {} predates the epoch", self.issued_at))
        })?;

        Ok(bcs::to_bytes(&SignatureLayout {
            tag: self.kind as u8,
            issued_at_ms,
            scheme: self.scheme.clone(),
            signature: self.signature.clone(),
        })?)
    }

    /// Layout with the transaction message-type prefix.
    pub fn to_transaction_signature(&self) -> Result<Vec<u8>> {
        let mut bytes = vec![TRANSACTION_MESSAGE_TYPE];
        bytes.extend(self.to_bytes()?);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let layout: SignatureLayout = bcs::from_bytes(bytes)?;

        let kind = match layout.tag {
            0 => EnvelopeKind::Siwe,
            1 => EnvelopeKind::Siws,
            other => {
                return Err(Error::InvalidSignature(format!(
                    "unknown envelope tag {other}"
                )))
            }
        };
        let issued_at = i64::try_from(layout.issued_at_ms)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                Error::InvalidSignature(format!(
                    "issued-at {} out of range",
                    layout.issued_at_ms
                ))
            })?;

        Ok(Self {
            kind,
            scheme: layout.scheme,
            issued_at,
            signature: layout.signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DerivedSignature {
        let issued_at = DateTime::from_timestamp_millis(1_740_832_200_123).unwrap();
        DerivedSignature::new(EnvelopeKind::Siwe, "https", issued_at, vec![0xde, 0xad, 0xbe, 0xef])
    }

    #[test]
    fn round_trip_recovers_all_fields() {
        let original = sample();
        let parsed = DerivedSignature::from_bytes(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.scheme, "https");
        assert_eq!(parsed.issued_at.timestamp_millis(), 1_740_832_200_123);
        assert_eq!(parsed.signature, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn byte_layout_is_fixed() {
        let bytes = sample().to_bytes().unwrap();
        let mut expected = vec![0u8];
        expected.extend(1_740_832_200_123u64.to_le_bytes());
        expected.push(5);
        expected.extend(b"https");
        expected.push(4);
        expected.extend([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn transaction_signature_is_prefixed() {
        let signature = sample();
        let prefixed = signature.to_transaction_signature().unwrap();
        assert_eq!(prefixed[0], TRANSACTION_MESSAGE_TYPE);
        assert_eq!(&prefixed[1..], signature.to_bytes().unwrap().as_slice());
    }

    #[test]
    fn solana_tag_survives_round_trip() {
        let issued_at = DateTime::from_timestamp_millis(1).unwrap();
        let signature = DerivedSignature::new(EnvelopeKind::Siws, "http", issued_at, vec![1; 64]);
        let bytes = signature.to_bytes().unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(DerivedSignature::from_bytes(&bytes).unwrap().kind, EnvelopeKind::Siws);
    }

    #[test]
    fn rejects_unknown_tag_and_trailing_bytes() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[0] = 9;
        assert!(matches!(
            DerivedSignature::from_bytes(&bytes),
            Err(Error::InvalidSignature(_))
        ));

        let mut bytes = sample().to_bytes().unwrap();
        bytes.push(0);
        assert!(DerivedSignature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let issued_at = DateTime::from_timestamp_millis(1_000).unwrap()
            + chrono::Duration::microseconds(999);
        let signature = DerivedSignature::new(EnvelopeKind::Siwe, "https", issued_at, vec![]);
        let parsed = DerivedSignature::from_bytes(&signature.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.issued_at, signature.issued_at);
        assert_eq!(parsed.issued_at.timestamp_millis(), 1_000);
    }
}

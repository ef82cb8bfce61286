// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Canonical encoding of sign-in messages.
//!
//! Layout, on a single line:
//!
//! ```text
//! CEDRA[; address: <a>][; application: <app>][; chainId: <id>]; message: <m>; nonce: <n>
//! ```
//!
//! Absent fields are omitted. Every value is escaped so that field
//! boundaries stay unambiguous and no raw line break ever reaches the
//! encoded bytes.

use serde::{Deserialize, Serialize};

use crate::chain::transaction::sha3_256;

/// Leading token of every encoded message.
pub const MESSAGE_PREFIX: &str = "CEDRA";

const FIELD_SEPARATOR: &str = "; ";

/// Message a dapp asks a derived account to sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u8>,
    pub message: String,
    pub nonce: String,
}

impl StructuredMessage {
    pub fn new(message: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            nonce: nonce.into(),
            ..Self::default()
        }
    }

    pub fn with_chain_id(mut self, chain_id: u8) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Canonical single-line text.
    pub fn encode(&self) -> String {
        let mut encoded = String::from(MESSAGE_PREFIX);

        let mut push = |name: &str, value: &str| {
            encoded.push_str(FIELD_SEPARATOR);
            encoded.push_str(name);
            encoded.push_str(": ");
            encoded.push_str(&escape_value(value));
        };

        if let Some(address) = &self.address {
            push("address", address);
        }
        if let Some(application) = &self.application {
            push("application", application);
        }
        if let Some(chain_id) = self.chain_id {
            push("chainId", &chain_id.to_string());
        }
        push("message", &self.message);
        push("nonce", &self.nonce);

        encoded
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }

    /// SHA3-256 over the encoded bytes.
    pub fn digest(&self) -> [u8; 32] {
        sha3_256(&self.to_bytes())
    }
}

/// Escape a field value: backslash, line breaks and the field separator.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            ';' => escaped.push_str("\\;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape only what would break a single-line statement.
pub fn escape_line_breaks(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_vector() {
        let message = StructuredMessage::new("Hello from test", "abc123").with_chain_id(2);

        assert_eq!(
            message.encode(),
            "CEDRA; chainId: 2; message: Hello from test; nonce: abc123"
        );
        assert_eq!(
            alloy::hex::encode(message.digest()),
            "c9095a6b65137a5de1c2c611706f657757bb482962bbed5e073049f44c42c545"
        );
    }

    #[test]
    fn encoded_message_never_contains_raw_newline() {
        for text in ["a\nb", "\n", "line1\r\nline2\n", "trailing\n\n"] {
            let message = StructuredMessage {
                address: Some("0x1\n".to_string()),
                application: Some("https://app\n.example".to_string()),
                ..StructuredMessage::new(text, "n\n1")
            };
            let bytes = message.to_bytes();
            assert!(!bytes.contains(&b'\n'), "raw newline in {:?}", message.encode());
            assert!(!bytes.contains(&b'\r'));
        }
    }

    #[test]
    fn optional_fields_are_omitted_not_empty() {
        let message = StructuredMessage::new("hi", "1");
        assert_eq!(message.encode(), "CEDRA; message: hi; nonce: 1");
    }

    #[test]
    fn full_field_order_is_fixed() {
        let message = StructuredMessage {
            address: Some("0xabc".to_string()),
            application: Some("https://dapp.example".to_string()),
            chain_id: Some(1),
            message: "m".to_string(),
            nonce: "n".to_string(),
        };
        assert_eq!(
            message.encode(),
            "CEDRA; address: 0xabc; application: https://dapp.example; chainId: 1; message: m; nonce: n"
        );
    }

    #[test]
    fn separator_in_values_cannot_forge_fields() {
        let forged = StructuredMessage::new("x; nonce: evil", "n");
        let plain = StructuredMessage::new("x", "evil; nonce: n");
        assert_ne!(forged.encode(), plain.encode());
        assert_eq!(forged.encode(), "CEDRA; message: x\\; nonce: evil; nonce: n");
    }

    #[test]
    fn escaped_backslash_is_not_confused_with_escape() {
        let literal = StructuredMessage::new("a\\nb", "n");
        let newline = StructuredMessage::new("a\nb", "n");
        assert_ne!(literal.digest(), newline.digest());
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = StructuredMessage::new("same", "nonce").with_chain_id(4);
        let b = a.clone();
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn statement_escaping_keeps_semicolons() {
        assert_eq!(escape_line_breaks("a;b\nc"), "a;b\\nc");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cedra addresses, networks and chain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Cedra account address (32 bytes).
///
/// Display follows AIP-40: special addresses (`0x0`..`0xf`) use the short
/// form, everything else is printed as 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;
    pub const ZERO: Self = Self([0u8; 32]);
    pub const ONE: Self = Self::from_u8(1);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    const fn from_u8(value: u8) -> Self {
        let mut bytes = [0u8; 32];
        bytes[31] = value;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse `0x`-prefixed (or bare) hex, left-padding short forms.
    pub fn from_hex(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(Error::InvalidAddress(format!(
                "expected 1 to 64 hex characters, got `{raw}`"
            )));
        }

        let padded = format!("{:0>64}", digits);
        let decoded = alloy::hex::decode(&padded)
            .map_err(|e| Error::InvalidAddress(format!("`{raw}`: {e}")))?;

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Special addresses are reserved framework accounts (`0x0`..`0xf`).
    pub fn is_special(&self) -> bool {
        self.0[..31].iter().all(|b| *b == 0) && self.0[31] < 0x10
    }

    /// Always the full 64-character form.
    pub fn to_long_string(&self) -> String {
        format!("0x{}", alloy::hex::encode(self.0))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_special() {
            write!(f, "0x{:x}", self.0[31])
        } else {
            f.write_str(&self.to_long_string())
        }
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({self})")
    }
}

impl FromStr for AccountAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(&self.to_long_string())
        } else {
            // BCS: fixed 32 bytes, no length prefix
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let raw = String::deserialize(deserializer)?;
            Self::from_hex(&raw).map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Cedra network selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
    Custom,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
            Network::Custom => "custom",
        }
    }

    /// Static configuration for named networks; `None` for `Custom`.
    pub fn config(&self) -> Option<&'static NetworkConfig> {
        match self {
            Network::Mainnet => Some(&CEDRA_MAINNET),
            Network::Testnet => Some(&CEDRA_TESTNET),
            Network::Devnet => Some(&CEDRA_DEVNET),
            Network::Local => Some(&CEDRA_LOCAL),
            Network::Custom => None,
        }
    }

    /// Chain id when it is fixed for the network. Devnet resets, so its id
    /// has to be fetched from a node.
    pub fn known_chain_id(&self) -> Option<u8> {
        self.config().and_then(|c| c.chain_id)
    }

    pub fn node_url(&self) -> Option<&'static str> {
        self.config().map(|c| c.node_url)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "local" => Ok(Network::Local),
            "custom" => Ok(Network::Custom),
            other => Err(Error::UnsupportedNetwork(other.to_string())),
        }
    }
}

/// Cedra network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network selector
    pub network: Network,
    /// Chain ID, when fixed
    pub chain_id: Option<u8>,
    /// Fullnode REST endpoint
    pub node_url: &'static str,
}

/// Cedra mainnet configuration.
pub const CEDRA_MAINNET: NetworkConfig = NetworkConfig {
    network: Network::Mainnet,
    chain_id: Some(1),
    node_url: "https://fullnode.mainnet.cedralabs.com/v1",
};

/// Cedra testnet configuration.
pub const CEDRA_TESTNET: NetworkConfig = NetworkConfig {
    network: Network::Testnet,
    chain_id: Some(2),
    node_url: "https://fullnode.testnet.cedralabs.com/v1",
};

/// Cedra devnet configuration.
pub const CEDRA_DEVNET: NetworkConfig = NetworkConfig {
    network: Network::Devnet,
    chain_id: None,
    node_url: "https://fullnode.devnet.cedralabs.com/v1",
};

/// Local node configuration.
pub const CEDRA_LOCAL: NetworkConfig = NetworkConfig {
    network: Network::Local,
    chain_id: Some(4),
    node_url: "http://127.0.0.1:8080/v1",
};

/// Networks with a fixed chain id, in lookup order.
const KNOWN_CHAIN_IDS: [&NetworkConfig; 3] = [&CEDRA_MAINNET, &CEDRA_TESTNET, &CEDRA_LOCAL];

/// Human-readable name for a chain id, falling back to `custom network: <id>`.
pub fn chain_name(chain_id: u8) -> String {
    KNOWN_CHAIN_IDS
        .iter()
        .find(|config| config.chain_id == Some(chain_id))
        .map(|config| config.network.as_str().to_string())
        .unwrap_or_else(|| format!("custom network: {chain_id}"))
}

/// Network as reported to and accepted from dapps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: Network,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NetworkInfo {
    /// Describe a named network with its static chain id and node URL.
    pub fn named(network: Network) -> Self {
        Self {
            name: network,
            chain_id: network.known_chain_id(),
            url: network.node_url().map(str::to_string),
        }
    }
}

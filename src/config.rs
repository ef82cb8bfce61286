// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Settings for derived signers and the transfer orchestrator. Everything is
//! read from the environment by the binary; library callers may build the
//! structs directly. The dapp origin is always explicit configuration.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CEDRA_DAPP_ORIGIN` | Origin URL of the dapp requesting signatures | Required |
//! | `CEDRA_DAPP_DOMAIN` | Domain bound into derived identities | host[:port] of the origin |
//! | `CEDRA_ETHEREUM_AUTH_FUNCTION` | Authentication function for Ethereum-derived accounts | `0x1::ethereum_derivable_account::authenticate` |
//! | `CEDRA_SOLANA_AUTH_FUNCTION` | Authentication function for Solana-derived accounts | `0x1::solana_derivable_account::authenticate` |
//! | `CEDRA_NETWORK` | Active Cedra network (`mainnet`, `testnet`, `devnet`, `local`) | `mainnet` |
//! | `CEDRA_NODE_URL` | Override for the Cedra node REST endpoint | Per-network default |
//! | `BRIDGE_API_URL` | Attestation service base URL | Required for transfers |
//! | `BRIDGE_MODULE_ADDRESS` | Cedra address publishing the bridge module | Required for transfers |
//! | `ATTESTATION_POLL_INITIAL_MS` | First attestation poll interval | `2000` |
//! | `ATTESTATION_POLL_MAX_INTERVAL_MS` | Backoff ceiling | `30000` |
//! | `ATTESTATION_POLL_MAX_WAIT_SECS` | Give up waiting for an attestation after | `1200` |
//! | `SPONSOR_KEY_PATH` | File holding the fee-payer ed25519 key (hex) | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::chain::authenticator::FunctionInfo;
use crate::chain::client::NodeClient;
use crate::chain::local::LocalAccount;
use crate::chain::types::{AccountAddress, Network};
use crate::derived::identity::{ETHEREUM_AUTHENTICATION_FUNCTION, SOLANA_AUTHENTICATION_FUNCTION};
use crate::error::{Error, Result};
use crate::transfer::poll::PollPolicy;
use crate::wallet::ChainFamily;

pub const DAPP_ORIGIN_ENV: &str = "CEDRA_DAPP_ORIGIN";
pub const DAPP_DOMAIN_ENV: &str = "CEDRA_DAPP_DOMAIN";
pub const ETHEREUM_AUTH_FUNCTION_ENV: &str = "CEDRA_ETHEREUM_AUTH_FUNCTION";
pub const SOLANA_AUTH_FUNCTION_ENV: &str = "CEDRA_SOLANA_AUTH_FUNCTION";
pub const NETWORK_ENV: &str = "CEDRA_NETWORK";
pub const NODE_URL_ENV: &str = "CEDRA_NODE_URL";
pub const BRIDGE_API_URL_ENV: &str = "BRIDGE_API_URL";
pub const BRIDGE_MODULE_ADDRESS_ENV: &str = "BRIDGE_MODULE_ADDRESS";
pub const POLL_INITIAL_MS_ENV: &str = "ATTESTATION_POLL_INITIAL_MS";
pub const POLL_MAX_INTERVAL_MS_ENV: &str = "ATTESTATION_POLL_MAX_INTERVAL_MS";
pub const POLL_MAX_WAIT_SECS_ENV: &str = "ATTESTATION_POLL_MAX_WAIT_SECS";
pub const SPONSOR_KEY_PATH_ENV: &str = "SPONSOR_KEY_PATH";

/// Settings shared by every derived signer of one dapp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub origin: Url,
    /// Bound into every derived identity; usually `host[:port]` of `origin`.
    pub domain: String,
    pub ethereum_authentication_function: FunctionInfo,
    pub solana_authentication_function: FunctionInfo,
    pub default_network: Network,
}

impl WalletConfig {
    /// Defaults for `origin`: domain from its host, framework authentication
    /// functions, mainnet.
    pub fn new(origin: Url) -> Result<Self> {
        let domain = origin_domain(&origin)?;
        Ok(Self {
            origin,
            domain,
            ethereum_authentication_function: ETHEREUM_AUTHENTICATION_FUNCTION.parse()?,
            solana_authentication_function: SOLANA_AUTHENTICATION_FUNCTION.parse()?,
            default_network: Network::Mainnet,
        })
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_default_network(mut self, network: Network) -> Self {
        self.default_network = network;
        self
    }

    /// URL scheme of the origin (`http`, `https`), embedded in signatures.
    pub fn scheme(&self) -> &str {
        self.origin.scheme()
    }

    /// Serialized origin, e.g. `https://app.example.com`.
    pub fn application(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    pub fn authentication_function(&self, family: ChainFamily) -> &FunctionInfo {
        match family {
            ChainFamily::Ethereum => &self.ethereum_authentication_function,
            ChainFamily::Solana => &self.solana_authentication_function,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = EnvSource(lookup);

        let raw_origin = env.required(DAPP_ORIGIN_ENV)?;
        let origin = Url::parse(&raw_origin)
            .map_err(|e| Error::MissingConfig(format!("{DAPP_ORIGIN_ENV}: {e}")))?;

        let mut config = Self::new(origin)?;
        if let Some(domain) = env.optional(DAPP_DOMAIN_ENV) {
            config.domain = domain;
        }
        config.ethereum_authentication_function = env
            .or_default(ETHEREUM_AUTH_FUNCTION_ENV, ETHEREUM_AUTHENTICATION_FUNCTION)
            .parse()?;
        config.solana_authentication_function = env
            .or_default(SOLANA_AUTH_FUNCTION_ENV, SOLANA_AUTHENTICATION_FUNCTION)
            .parse()?;
        config.default_network = env.or_default(NETWORK_ENV, Network::Mainnet.as_str()).parse()?;

        Ok(config)
    }
}

fn origin_domain(origin: &Url) -> Result<String> {
    let host = origin
        .host_str()
        .ok_or_else(|| Error::MissingConfig(format!("origin {origin} has no host")))?;
    Ok(match origin.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Settings for the cross-chain transfer orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainConfig {
    pub network: Network,
    pub bridge_api_url: Url,
    /// Cedra account publishing the bridge's Move modules.
    pub bridge_module: AccountAddress,
    pub node_url: Option<String>,
    pub poll_policy: PollPolicy,
    pub sponsor_key_path: Option<PathBuf>,
}

impl CrossChainConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = EnvSource(lookup);

        let network = env.or_default(NETWORK_ENV, Network::Mainnet.as_str()).parse()?;
        let bridge_api_url = Url::parse(&env.required(BRIDGE_API_URL_ENV)?)
            .map_err(|e| Error::MissingConfig(format!("{BRIDGE_API_URL_ENV}: {e}")))?;
        let bridge_module = AccountAddress::from_hex(&env.required(BRIDGE_MODULE_ADDRESS_ENV)?)?;

        let defaults = PollPolicy::default();
        let poll_policy = PollPolicy {
            initial_interval: env
                .duration_ms(POLL_INITIAL_MS_ENV)?
                .unwrap_or(defaults.initial_interval),
            max_interval: env
                .duration_ms(POLL_MAX_INTERVAL_MS_ENV)?
                .unwrap_or(defaults.max_interval),
            max_wait: env
                .parsed::<u64>(POLL_MAX_WAIT_SECS_ENV)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_wait),
            ..defaults
        };

        Ok(Self {
            network,
            bridge_api_url,
            bridge_module,
            node_url: env.optional(NODE_URL_ENV),
            poll_policy,
            sponsor_key_path: env.optional(SPONSOR_KEY_PATH_ENV).map(PathBuf::from),
        })
    }

    /// Client for the Cedra node: `node_url` when set, otherwise the
    /// network's public fullnode.
    ///
    /// # Errors
    /// `UnsupportedNetwork` for a custom network without a node URL.
    pub fn node_client(&self) -> Result<NodeClient> {
        match &self.node_url {
            Some(url) => NodeClient::new(url),
            None => NodeClient::for_network(self.network),
        }
    }

    /// Fee payer loaded from `sponsor_key_path`, if one is configured.
    pub fn sponsor(&self) -> Result<Option<LocalAccount>> {
        self.sponsor_key_path
            .as_deref()
            .map(LocalAccount::from_key_file)
            .transpose()
    }
}

/// Trimmed variable lookup; blank values count as unset.
struct EnvSource<F>(F);

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .ok_or_else(|| Error::MissingConfig(name.to_string()))
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.optional(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| Error::MissingConfig(format!("{name}: cannot parse {raw:?}")))
            })
            .transpose()
    }

    fn duration_ms(&self, name: &str) -> Result<Option<Duration>> {
        Ok(self.parsed::<u64>(name)?.map(Duration::from_millis))
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command-line helper for derived Cedra accounts.
//!
//! Log output follows `RUST_LOG`; `LOG_FORMAT=json` switches to JSON lines.

use cedra_derived_wallet::chain::authenticator::FunctionInfo;
use cedra_derived_wallet::chain::{chain_name, ChainClient, Network, NetworkInfo, NodeClient};
use cedra_derived_wallet::config::WalletConfig;
use cedra_derived_wallet::derived::identity::default_authentication_function;
use cedra_derived_wallet::derived::DerivedIdentity;
use cedra_derived_wallet::error::{Error, Result};
use cedra_derived_wallet::wallet::{ChainFamily, ForeignAddress};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Derived Cedra accounts for Ethereum and Solana wallets.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Cedra address derived from a foreign account.
    Derive {
        /// Foreign chain family (`ethereum` or `solana`).
        #[arg(long)]
        family: ChainFamily,

        /// Foreign address: 0x-hex for Ethereum, base58 for Solana.
        #[arg(long)]
        address: String,

        /// Domain bound into the identity. Takes precedence over `--origin`.
        #[arg(long, env = "CEDRA_DAPP_DOMAIN")]
        domain: Option<String>,

        /// Dapp origin; its host[:port] is the domain when none is given.
        #[arg(long, env = "CEDRA_DAPP_ORIGIN")]
        origin: Option<Url>,

        /// Authentication function (`<address>::<module>::<function>`).
        /// Defaults to the framework function for the family.
        #[arg(long)]
        function: Option<FunctionInfo>,
    },

    /// Print the active network with its chain id and node URL.
    NetworkInfo {
        #[arg(long, env = "CEDRA_NETWORK", default_value = "mainnet")]
        network: Network,

        /// Node REST endpoint; also used to look up chain ids that are not fixed.
        #[arg(long, env = "CEDRA_NODE_URL")]
        node_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Command::Derive {
            family,
            address,
            domain,
            origin,
            function,
        } => derive(family, &address, domain, origin, function),
        Command::NetworkInfo { network, node_url } => network_info(network, node_url).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cedra_derived_wallet=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        Ok("pretty") => builder.pretty().init(),
        _ => builder.init(),
    }
}

fn derive(
    family: ChainFamily,
    address: &str,
    domain: Option<String>,
    origin: Option<Url>,
    function: Option<FunctionInfo>,
) -> Result<()> {
    let address = ForeignAddress::parse(family, address)?;
    let domain = match (domain, origin) {
        (Some(domain), _) => domain,
        (None, Some(origin)) => WalletConfig::new(origin)?.domain,
        (None, None) => {
            return Err(Error::MissingConfig(
                "--domain or --origin (CEDRA_DAPP_ORIGIN)".to_string(),
            ))
        }
    };
    let function = function.unwrap_or_else(|| default_authentication_function(family));

    let identity = DerivedIdentity::derive(domain, address, function)?;
    info!(
        family = %family,
        domain = identity.domain(),
        function = %identity.authentication_function(),
        "Derived account"
    );
    println!("{}", identity.address());
    Ok(())
}

async fn network_info(network: Network, node_url: Option<String>) -> Result<()> {
    let mut info = NetworkInfo::named(network);
    if node_url.is_some() {
        info.url = node_url;
    }
    if info.chain_id.is_none() {
        if let Some(url) = &info.url {
            info.chain_id = Some(NodeClient::new(url)?.chain_id().await?);
        }
    }

    let label = info.chain_id.map(chain_name).unwrap_or_else(|| network.to_string());
    println!(
        "{}",
        serde_json::to_string_pretty(&info).map_err(|e| Error::Encoding(e.to_string()))?
    );
    info!(network = %network, chain = %label, "Network resolved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_derive_arguments() {
        let cli = Cli::try_parse_from([
            "cedra-derived-wallet",
            "derive",
            "--family",
            "solana",
            "--address",
            "7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV",
            "--domain",
            "app.example.com",
            "--function",
            "0x1::solana_derivable_account::authenticate",
        ])
        .unwrap();

        match cli.command {
            Command::Derive {
                family,
                domain,
                function,
                ..
            } => {
                assert_eq!(family, ChainFamily::Solana);
                assert_eq!(domain.as_deref(), Some("app.example.com"));
                assert_eq!(function, Some(default_authentication_function(ChainFamily::Solana)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_family_and_network() {
        assert!(Cli::try_parse_from(["cedra-derived-wallet", "derive", "--family", "bitcoin", "--address", "x"]).is_err());
        assert!(Cli::try_parse_from(["cedra-derived-wallet", "network-info", "--network", "moonnet"]).is_err());
    }
}

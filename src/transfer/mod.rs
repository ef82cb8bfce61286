// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain USDC transfers into Cedra.
//!
//! This module provides:
//! - The chains a transfer can start from, per Cedra network
//! - The bridge provider seam and its attestation-service implementation
//! - Bounded attestation polling
//! - The orchestrator driving quote, source leg and claim

pub mod attestation;
pub mod orchestrator;
pub mod poll;
pub mod provider;

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::chain::types::Network;
use crate::error::{Error, Result};

pub use attestation::AttestationBridge;
pub use orchestrator::{ClaimedTransfer, InitiatedTransfer, TransferOrchestrator, TransferReceipt};
pub use poll::PollPolicy;
pub use provider::{AttestationStatus, BridgeProvider, ProviderKind, Quote, Route};

/// USDC has 6 decimals on every supported chain.
pub const USDC_DECIMALS: u8 = 6;

/// Chains taking part in a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Solana,
    Ethereum,
    Sepolia,
    Cedra,
}

const MAINNET_SOURCES: [Chain; 2] = [Chain::Solana, Chain::Ethereum];
const TESTNET_SOURCES: [Chain; 2] = [Chain::Solana, Chain::Sepolia];

impl Chain {
    /// Destination of every transfer.
    pub const DESTINATION: Chain = Chain::Cedra;

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Ethereum => "Ethereum",
            Chain::Sepolia => "Sepolia",
            Chain::Cedra => "Cedra",
        }
    }

    /// Attestation-service domain identifier.
    pub fn domain(&self) -> u32 {
        match self {
            Chain::Ethereum | Chain::Sepolia => 0,
            Chain::Solana => 5,
            Chain::Cedra => 9,
        }
    }

    /// Source chains available on a Cedra network. Mainnet pairs with
    /// Ethereum mainnet, every other network with Sepolia.
    pub fn sources_for(network: Network) -> &'static [Chain] {
        match network {
            Network::Mainnet => &MAINNET_SOURCES,
            _ => &TESTNET_SOURCES,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" => Ok(Chain::Solana),
            "ethereum" => Ok(Chain::Ethereum),
            "sepolia" => Ok(Chain::Sepolia),
            "cedra" => Ok(Chain::Cedra),
            _ => Err(Error::RouteNotFound {
                source_chain: s.trim().to_string(),
                destination_chain: Chain::DESTINATION.to_string(),
            }),
        }
    }
}

/// Parse a decimal USDC amount into base units.
pub fn parse_usdc_amount(amount: &str) -> Result<U256> {
    let trimmed = amount.trim();
    let parts: Vec<&str> = trimmed.split('.').collect();
    let all_digits = parts.iter().all(|part| part.bytes().all(|b| b.is_ascii_digit()));
    if parts.len() > 2 || parts[0].is_empty() || !all_digits {
        return Err(Error::InvalidAmount(format!("`{amount}` is not a decimal amount")));
    }

    let whole = parts[0]
        .parse::<u128>()
        .map_err(|_| Error::InvalidAmount(format!("invalid whole part in `{amount}`")))?;

    let fraction = match parts.get(1) {
        Some(digits) if digits.len() > USDC_DECIMALS as usize => {
            return Err(Error::InvalidAmount(format!(
                "too many decimal places (max {USDC_DECIMALS})"
            )))
        }
        Some(digits) if !digits.is_empty() => {
            format!("{:0<width$}", digits, width = USDC_DECIMALS as usize)
                .parse::<u128>()
                .map_err(|_| Error::InvalidAmount(format!("invalid fraction in `{amount}`")))?
        }
        _ => 0,
    };

    let base_units = whole
        .checked_mul(10u128.pow(USDC_DECIMALS as u32))
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| Error::InvalidAmount(format!("`{amount}` is too large")))?;

    if base_units == 0 {
        return Err(Error::InvalidAmount("amount must be positive".to_string()));
    }
    Ok(U256::from(base_units))
}

/// Render base units as a decimal USDC amount.
pub fn format_usdc_amount(amount: U256) -> String {
    let divisor = U256::from(10u64).pow(U256::from(USDC_DECIMALS));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }
    let fraction = format!("{:0>width$}", remainder, width = USDC_DECIMALS as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!(parse_usdc_amount("1").unwrap(), U256::from(1_000_000u64));
        assert_eq!(parse_usdc_amount("0.5").unwrap(), U256::from(500_000u64));
        assert_eq!(parse_usdc_amount(" 12.345678 ").unwrap(), U256::from(12_345_678u64));
        assert_eq!(parse_usdc_amount("3.").unwrap(), U256::from(3_000_000u64));
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in [
            "", "0", "0.000", "1.2345678", "1.2.3", "-1", "abc", ".5", "+1", "1.+5", "1_000", "1 000",
        ] {
            assert!(
                matches!(parse_usdc_amount(bad), Err(Error::InvalidAmount(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn formats_base_units() {
        assert_eq!(format_usdc_amount(U256::from(1_500_000u64)), "1.5");
        assert_eq!(format_usdc_amount(U256::from(2_000_000u64)), "2");
        assert_eq!(format_usdc_amount(U256::from(1u64)), "0.000001");
    }

    #[test]
    fn unknown_chain_is_a_missing_route() {
        match "Dogechain".parse::<Chain>() {
            Err(Error::RouteNotFound {
                source_chain,
                destination_chain,
            }) => {
                assert_eq!(source_chain, "Dogechain");
                assert_eq!(destination_chain, "Cedra");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!("sepolia".parse::<Chain>().unwrap(), Chain::Sepolia);
    }

    #[test]
    fn network_selects_source_chains() {
        assert!(Chain::sources_for(Network::Mainnet).contains(&Chain::Ethereum));
        assert!(!Chain::sources_for(Network::Testnet).contains(&Chain::Ethereum));
        assert!(Chain::sources_for(Network::Devnet).contains(&Chain::Sepolia));
    }
}

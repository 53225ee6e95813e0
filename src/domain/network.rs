//! Network configuration for Celo networks.
//!
//! This module defines the supported Celo networks and their associated
//! configuration such as chain ids, RPC endpoints, and explorer URLs.

use serde::{Deserialize, Serialize};

// ============================================================================
// Network Configuration
// ============================================================================

/// Celo network variants.
///
/// Payments are only ever sent on one required network (the configured
/// one, MainNet by default); the other variants exist so the wallet can
/// report being on the wrong chain and so development setups work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChainNetwork {
    /// Celo MainNet - the production network.
    #[default]
    MainNet,
    /// Alfajores - the Celo test network.
    Alfajores,
    /// LocalNet - a local development node.
    LocalNet,
}

impl ChainNetwork {
    /// Returns the human-readable name of the network.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::MainNet => "MainNet",
            Self::Alfajores => "Alfajores",
            Self::LocalNet => "LocalNet",
        }
    }

    /// Returns the EVM chain id for this network.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::MainNet => 42220,
            Self::Alfajores => 44787,
            Self::LocalNet => 1337,
        }
    }

    /// Returns the default JSON-RPC endpoint for this network.
    #[must_use]
    pub const fn rpc_url(&self) -> &str {
        match self {
            Self::MainNet => "https://forno.celo.org",
            Self::Alfajores => "https://alfajores-forno.celo-testnet.org",
            Self::LocalNet => "http://localhost:8545",
        }
    }

    /// Returns the block-explorer base URL, if the network has one.
    #[must_use]
    pub const fn explorer_url(&self) -> Option<&str> {
        match self {
            Self::MainNet => Some("https://celoscan.io"),
            Self::Alfajores => Some("https://alfajores.celoscan.io"),
            Self::LocalNet => None,
        }
    }

    /// Builds an explorer link for a transaction hash.
    ///
    /// # Returns
    ///
    /// `Some` with the full URL if the network has an explorer, `None`
    /// for LocalNet.
    #[must_use]
    pub fn explorer_tx_url(&self, hash: &str) -> Option<String> {
        self.explorer_url().map(|base| format!("{base}/tx/{hash}"))
    }

    /// Returns the native currency symbol.
    #[must_use]
    pub const fn native_symbol(&self) -> &str {
        "CELO"
    }

    /// Returns the number of decimal places of the native currency.
    ///
    /// CELO uses 18 decimals; one whole unit is 10^18 wei.
    #[must_use]
    pub const fn native_decimals(&self) -> u32 {
        18
    }

    /// Resolves a network from a chain id reported by a node.
    #[must_use]
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            42220 => Some(Self::MainNet),
            44787 => Some(Self::Alfajores),
            1337 => Some(Self::LocalNet),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChainNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_as_str() {
        assert_eq!(ChainNetwork::MainNet.as_str(), "MainNet");
        assert_eq!(ChainNetwork::Alfajores.as_str(), "Alfajores");
        assert_eq!(ChainNetwork::LocalNet.as_str(), "LocalNet");
    }

    #[test]
    fn test_chain_ids_roundtrip() {
        for network in [
            ChainNetwork::MainNet,
            ChainNetwork::Alfajores,
            ChainNetwork::LocalNet,
        ] {
            assert_eq!(
                ChainNetwork::from_chain_id(network.chain_id()),
                Some(network)
            );
        }
        assert_eq!(ChainNetwork::from_chain_id(1), None);
    }

    #[test]
    fn test_rpc_urls() {
        assert!(ChainNetwork::MainNet.rpc_url().contains("forno"));
        assert!(ChainNetwork::Alfajores.rpc_url().contains("alfajores"));
        assert!(ChainNetwork::LocalNet.rpc_url().contains("localhost"));
    }

    #[test]
    fn test_explorer_tx_url() {
        assert_eq!(
            ChainNetwork::MainNet.explorer_tx_url("0xabc").as_deref(),
            Some("https://celoscan.io/tx/0xabc")
        );
        assert!(ChainNetwork::LocalNet.explorer_tx_url("0xabc").is_none());
    }

    #[test]
    fn test_network_default() {
        assert_eq!(ChainNetwork::default(), ChainNetwork::MainNet);
    }

    #[test]
    fn test_native_currency() {
        assert_eq!(ChainNetwork::MainNet.native_symbol(), "CELO");
        assert_eq!(ChainNetwork::MainNet.native_decimals(), 18);
    }

    #[test]
    fn test_network_serialization() {
        let network = ChainNetwork::Alfajores;
        let serialized = serde_json::to_string(&network).unwrap();
        let deserialized: ChainNetwork = serde_json::from_str(&serialized).unwrap();
        assert_eq!(network, deserialized);
    }
}

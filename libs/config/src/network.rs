//! Network presets
//!
//! Chain ids, the pool registry deployment and the API host names used by
//! the default adapters.

use std::fmt;

use floorswap_types::Address;
use serde::{Deserialize, Serialize};

/// Pool registry deployed on Goerli
pub const GOERLI_REGISTRY: &str = "0x15B9D8ba57E67D6683f3E7Bec24A32b98a7cdb6b";

/// Default attestation oracle host
pub const DEFAULT_ORACLE_ENDPOINT: &str = "https://api.reservoir.tools";

/// Shared key accepted by the public oracle tier
pub const DEMO_ORACLE_API_KEY: &str = "demo-api-key";

/// Supported EVM networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Goerli,
    Sepolia,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Goerli => 5,
            Self::Sepolia => 11_155_111,
        }
    }

    /// Registry address when a deployment is known for this network
    pub fn default_registry(&self) -> Option<Address> {
        match self {
            Self::Goerli => GOERLI_REGISTRY.parse().ok(),
            Self::Mainnet | Self::Sepolia => None,
        }
    }

    /// Host of the NFT holdings index for this network
    pub fn holdings_host(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://eth-mainnet.g.alchemy.com",
            Self::Goerli => "https://eth-goerli.g.alchemy.com",
            Self::Sepolia => "https://eth-sepolia.g.alchemy.com",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Goerli => write!(f, "goerli"),
            Self::Sepolia => write!(f, "sepolia"),
        }
    }
}

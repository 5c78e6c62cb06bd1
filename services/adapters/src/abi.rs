//! Pool registry, pair, ERC-721 and ERC-20 ABI definitions
//!
//! Only the functions the swap flow calls are declared. Pair swap functions
//! come in two variants: current pools take a trailing deadline, legacy
//! pools do not.

#![allow(deprecated)] // ethabi's `constant` field is deprecated but still required

use ethers::abi::{Function, Param, ParamType, StateMutability};
use once_cell::sync::Lazy;

fn param(name: &str, kind: ParamType) -> Param {
    Param {
        name: name.to_string(),
        kind,
        internal_type: None,
    }
}

fn function(
    name: &str,
    inputs: Vec<Param>,
    outputs: Vec<Param>,
    state_mutability: StateMutability,
) -> Function {
    Function {
        name: name.to_string(),
        inputs,
        outputs,
        constant: None,
        state_mutability,
    }
}

fn token_ids() -> Param {
    param("tokenIds", ParamType::Array(Box::new(ParamType::Uint(256))))
}

/// `bytes32[][]`, one merkle proof per token id
fn proofs() -> Param {
    param(
        "proofs",
        ParamType::Array(Box::new(ParamType::Array(Box::new(ParamType::FixedBytes(32))))),
    )
}

/// Oracle message tuple `(bytes32 id, bytes payload, uint256 timestamp, bytes signature)[]`
fn messages() -> Param {
    param(
        "messages",
        ParamType::Array(Box::new(ParamType::Tuple(vec![
            ParamType::FixedBytes(32),
            ParamType::Bytes,
            ParamType::Uint(256),
            ParamType::Bytes,
        ]))),
    )
}

/// function pairs(address nft, address baseToken, bytes32 merkleRoot) view returns (address)
pub static REGISTRY_PAIRS: Lazy<Function> = Lazy::new(|| {
    function(
        "pairs",
        vec![
            param("nft", ParamType::Address),
            param("baseToken", ParamType::Address),
            param("merkleRoot", ParamType::FixedBytes(32)),
        ],
        vec![param("", ParamType::Address)],
        StateMutability::View,
    )
});

/// function baseTokenReserves() view returns (uint256)
pub static BASE_TOKEN_RESERVES: Lazy<Function> = Lazy::new(|| {
    function(
        "baseTokenReserves",
        vec![],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    )
});

/// function fractionalTokenReserves() view returns (uint256)
pub static FRACTIONAL_TOKEN_RESERVES: Lazy<Function> = Lazy::new(|| {
    function(
        "fractionalTokenReserves",
        vec![],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    )
});

/// function nftBuy(uint256[] tokenIds, uint256 maxInputAmount, uint256 deadline) payable returns (uint256)
pub static NFT_BUY: Lazy<Function> = Lazy::new(|| {
    function(
        "nftBuy",
        vec![
            token_ids(),
            param("maxInputAmount", ParamType::Uint(256)),
            param("deadline", ParamType::Uint(256)),
        ],
        vec![param("inputAmount", ParamType::Uint(256))],
        StateMutability::Payable,
    )
});

/// function nftBuy(uint256[] tokenIds, uint256 maxInputAmount) payable returns (uint256)
pub static NFT_BUY_LEGACY: Lazy<Function> = Lazy::new(|| {
    function(
        "nftBuy",
        vec![token_ids(), param("maxInputAmount", ParamType::Uint(256))],
        vec![param("inputAmount", ParamType::Uint(256))],
        StateMutability::Payable,
    )
});

/// function nftSell(uint256[] tokenIds, uint256 minOutputAmount, uint256 deadline,
///     bytes32[][] proofs, Message[] messages) returns (uint256)
pub static NFT_SELL: Lazy<Function> = Lazy::new(|| {
    function(
        "nftSell",
        vec![
            token_ids(),
            param("minOutputAmount", ParamType::Uint(256)),
            param("deadline", ParamType::Uint(256)),
            proofs(),
            messages(),
        ],
        vec![param("outputAmount", ParamType::Uint(256))],
        StateMutability::NonPayable,
    )
});

/// function nftSell(uint256[] tokenIds, uint256 minOutputAmount,
///     bytes32[][] proofs, Message[] messages) returns (uint256)
pub static NFT_SELL_LEGACY: Lazy<Function> = Lazy::new(|| {
    function(
        "nftSell",
        vec![
            token_ids(),
            param("minOutputAmount", ParamType::Uint(256)),
            proofs(),
            messages(),
        ],
        vec![param("outputAmount", ParamType::Uint(256))],
        StateMutability::NonPayable,
    )
});

/// function isApprovedForAll(address owner, address operator) view returns (bool)
pub static IS_APPROVED_FOR_ALL: Lazy<Function> = Lazy::new(|| {
    function(
        "isApprovedForAll",
        vec![
            param("owner", ParamType::Address),
            param("operator", ParamType::Address),
        ],
        vec![param("", ParamType::Bool)],
        StateMutability::View,
    )
});

/// function setApprovalForAll(address operator, bool approved)
pub static SET_APPROVAL_FOR_ALL: Lazy<Function> = Lazy::new(|| {
    function(
        "setApprovalForAll",
        vec![
            param("operator", ParamType::Address),
            param("approved", ParamType::Bool),
        ],
        vec![],
        StateMutability::NonPayable,
    )
});

/// function allowance(address owner, address spender) view returns (uint256)
pub static ALLOWANCE: Lazy<Function> = Lazy::new(|| {
    function(
        "allowance",
        vec![
            param("owner", ParamType::Address),
            param("spender", ParamType::Address),
        ],
        vec![param("", ParamType::Uint(256))],
        StateMutability::View,
    )
});

/// function approve(address spender, uint256 amount) returns (bool)
pub static APPROVE: Lazy<Function> = Lazy::new(|| {
    function(
        "approve",
        vec![
            param("spender", ParamType::Address),
            param("amount", ParamType::Uint(256)),
        ],
        vec![param("", ParamType::Bool)],
        StateMutability::NonPayable,
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        assert_eq!(
            REGISTRY_PAIRS.signature(),
            "pairs(address,address,bytes32):(address)"
        );
        assert_eq!(
            NFT_BUY.signature(),
            "nftBuy(uint256[],uint256,uint256):(uint256)"
        );
        assert_eq!(
            NFT_BUY_LEGACY.signature(),
            "nftBuy(uint256[],uint256):(uint256)"
        );
        assert_eq!(
            NFT_SELL.signature(),
            "nftSell(uint256[],uint256,uint256,bytes32[][],(bytes32,bytes,uint256,bytes)[]):(uint256)"
        );
        assert_eq!(
            SET_APPROVAL_FOR_ALL.signature(),
            "setApprovalForAll(address,bool)"
        );
        assert_eq!(
            ALLOWANCE.signature(),
            "allowance(address,address):(uint256)"
        );
        // Standard ERC-20 selector
        assert_eq!(APPROVE.short_signature(), [0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn test_variants_have_distinct_selectors() {
        assert_ne!(NFT_BUY.short_signature(), NFT_BUY_LEGACY.short_signature());
        assert_ne!(NFT_SELL.short_signature(), NFT_SELL_LEGACY.short_signature());
    }
}

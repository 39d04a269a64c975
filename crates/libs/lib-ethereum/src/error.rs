//! # Centralized Error Handling
//!
//! The library-wide error type [`ChainError`] used by the provider, the
//! client, the contract wrappers and the services.
//!
//! ## Error Categories
//!
//! 1. **Local validation** - rejected before any transaction is submitted
//!    - [`InvalidInput`](ChainError::InvalidInput)
//!    - [`InsufficientFunds`](ChainError::InsufficientFunds)
//! 2. **Transport** - the RPC endpoint or wallet provider failed
//!    - [`Provider`](ChainError::Provider)
//! 3. **Contract** - the call reverted or the mined receipt reports failure
//!    - [`Contract`](ChainError::Contract)
//! 4. **Encoding** - calldata/return/event (de)serialization
//!    - [`Abi`](ChainError::Abi)
//! 5. **Off-chain store** - metadata upload or fetch
//!    - [`Metadata`](ChainError::Metadata)
//!
//! No variant is retried anywhere; every failure is terminal for the user
//! action that produced it and is surfaced with its raw message.

use alloy_primitives::U256;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Library-wide error type.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Configuration error (bad address, invalid limits).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport or RPC failure from the provider (network, wallet, node).
    #[error("provider error: {0}")]
    Provider(String),

    /// Calldata encoding or return/event decoding failure.
    #[error("ABI error: {0}")]
    Abi(String),

    /// The contract call reverted, or the transaction was mined with a
    /// failure status.
    #[error("contract error: {0}")]
    Contract(String),

    /// Input rejected by local validation; no transaction was submitted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The buyer's balance cannot cover the listing price; rejected locally.
    #[error("insufficient funds: balance {balance} wei is below price {price} wei")]
    InsufficientFunds { balance: U256, price: U256 },

    /// Metadata store upload or fetch failure.
    #[error("metadata store error: {0}")]
    Metadata(String),
}

impl From<alloy_sol_types::Error> for ChainError {
    fn from(err: alloy_sol_types::Error) -> Self {
        ChainError::Abi(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Provider(format!("malformed RPC payload: {err}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        ChainError::Provider(err.to_string())
    }
}

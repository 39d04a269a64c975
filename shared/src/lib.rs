//! # Shared Domain Types
//!
//! Data types and pure helpers shared between the chain-integration library
//! (`lib-ethereum`) and the browser front-end (`market-web`).
//!
//! ## Structure
//!
//! - **[`dto`]**: domain records for collections, tokens and listings
//!   - **[`dto::collections`]**: factory-owned collection records
//!   - **[`dto::market`]**: token records, listing views, off-chain metadata
//! - **[`utils`]**: display and URI helpers
//!   - **[`utils::format_address`]**: shorten wallet addresses for display
//!   - **[`utils::ipfs_to_http`]**: rewrite `ipfs://` URIs to a gateway URL
//!
//! Everything in this crate is I/O-free and compiles unchanged for native
//! targets and `wasm32-unknown-unknown`.
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON with default `serde` behavior: snake_case
//! field names, `U256` values as hex quantities, addresses as checksummed
//! hex strings.

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;

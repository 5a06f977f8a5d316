//! Tapyrus node JSON-RPC integration module
//!
//! This module provides the node-side query functionality:
//! - **Cookie** - RPC credential resolution from a static value or the
//!   node's `.cookie` file
//! - **Client** - Blocking JSON-RPC client with single and batched calls
//!
//! The mempool analysis depends on the batched call path: one HTTP round
//! trip carries the metadata requests for the entire pool.

pub mod client;
pub mod cookie;

pub use client::{NodeRpcClient, RawMempoolEntry};
pub use cookie::CookieSource;

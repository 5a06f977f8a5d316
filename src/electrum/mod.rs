//! Electrum protocol integration module
//!
//! Provides the blocking request/response client used by the balance
//! lookup. The protocol is newline-delimited JSON over a plain TCP
//! connection: one request line out, one reply line back.

pub mod client;

pub use client::{ElectrumClient, GetBalance};

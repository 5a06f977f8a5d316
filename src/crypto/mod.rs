//! Cryptographic derivations for the query protocols

pub mod script_hash;

pub use script_hash::{parse_address, script_hash_key};

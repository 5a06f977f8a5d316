//! Address to script-hash key derivation
//!
//! The Electrum-style lookup protocol indexes balances by the SHA-256
//! digest of an address's scriptPubKey, hex-encoded in REVERSE byte order.
//! The reversal is part of the wire protocol: a key derived without it is
//! still well-formed hex, so the server answers for the wrong (almost
//! certainly nonexistent) key instead of raising an error.

use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::{Network, Script, ScriptBuf};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

/// Resolve an address string to its scriptPubKey on the given network
///
/// Fails with `InvalidAddress` if the string is malformed or encodes an
/// address for a different network.
pub fn parse_address(address: &str, network: Network) -> AppResult<ScriptBuf> {
    let parsed: Address<NetworkUnchecked> =
        address.parse().map_err(|e: bitcoin::address::ParseError| {
            AppError::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;
    let checked = parsed
        .require_network(network)
        .map_err(|e| AppError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;
    Ok(checked.script_pubkey())
}

/// Compute the reverse-byte-order hex SHA-256 key for a script
pub fn script_hash_key(script: &Script) -> String {
    let mut digest: [u8; 32] = Sha256::digest(script.as_bytes()).into();
    digest.reverse();
    hex::encode(digest)
}

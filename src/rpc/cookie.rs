//! RPC authentication cookie handling
//!
//! The node writes a `USER:PASSWORD` line to `<datadir>/.cookie` on
//! startup. Credentials can also be supplied directly on the command line.

use std::fs;
use std::path::PathBuf;

use crate::errors::{ClientError, ClientResult};

/// Where the RPC credentials come from
#[derive(Debug, Clone)]
pub enum CookieSource {
    /// Literal `USER:PASSWORD` value supplied by the caller
    Static(String),
    /// Directory containing the node's `.cookie` file
    File(PathBuf),
}

impl CookieSource {
    /// Resolve to a (user, password) pair
    ///
    /// A missing or malformed cookie is an authentication failure raised
    /// before any request is sent.
    pub fn credentials(&self) -> ClientResult<(String, String)> {
        let raw = match self {
            CookieSource::Static(value) => value.clone(),
            CookieSource::File(dir) => {
                let path = dir.join(".cookie");
                fs::read_to_string(&path).map_err(|e| {
                    ClientError::Authentication(format!(
                        "failed to read cookie from {:?}: {}",
                        path, e
                    ))
                })?
            }
        };
        let raw = raw.trim_end();
        let (user, password) = raw.split_once(':').ok_or_else(|| {
            ClientError::Authentication("malformed cookie, expected USER:PASSWORD".to_string())
        })?;
        Ok((user.to_string(), password.to_string()))
    }
}

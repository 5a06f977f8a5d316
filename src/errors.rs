use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Address is malformed or belongs to the wrong network
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Remote query transport or protocol failure
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// One or more per-address lookups failed in a batch invocation
    #[error("{failed} of {total} address lookups failed")]
    LookupFailures { failed: usize, total: usize },
}

/// Errors raised by the remote query clients (Electrum and node RPC)
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to reach the remote service, or the transport died mid-call
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Cookie missing/unreadable, or the server rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Reply is malformed, carries a server-side error, or lacks the
    /// expected result field
    #[error("Protocol error: {method} - {message}")]
    Protocol { method: String, message: String },
}

impl ClientError {
    pub fn protocol(method: &str, message: impl Into<String>) -> Self {
        ClientError::Protocol {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for remote query operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = NitroError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NitroError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{operation} is not supported by the {transport} transport")]
    UnsupportedOperation {
        transport: &'static str,
        operation: &'static str,
    },
    #[error("RPC request failed: {0}")]
    Transport(String),
    #[error("failed to parse RPC response: {0}")]
    Parse(String),
    #[error("numeric conversion failed: {0}")]
    Numeric(String),
    #[error("RPC call timed out after {0:?}")]
    Timeout(Duration),
    /// The node answered with a JSON-RPC `error` object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
}

impl NitroError {
    pub(crate) fn unsupported(transport: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            transport,
            operation,
        }
    }
}

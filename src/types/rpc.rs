use crate::error::{NitroError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request identifier. Numbers are what this crate generates, strings
/// are accepted from peers that echo them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(u64),
    String(String),
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Id::Number(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id::String(id.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::String(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: Id,
}

impl JsonRpcRequest {
    pub fn new(method: &str, params: Vec<Value>, id: impl Into<Id>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonRpcResponse<T = Value> {
    pub jsonrpc: String,
    /// `None` only when the key is absent; `"result": null` is a real result.
    #[serde(default = "Option::default", deserialize_with = "present")]
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
    pub id: Option<Id>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<T> JsonRpcResponse<T> {
    /// Splits the envelope into its payload, enforcing that exactly one of
    /// `result` and `error` is present.
    pub fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(error.into()),
            (Some(_), Some(_)) => Err(NitroError::Parse(
                "response carries both `result` and `error`".to_string(),
            )),
            (None, None) => Err(NitroError::Parse(
                "response is missing the `result` field".to_string(),
            )),
        }
    }

    /// Checks that the response answers the request carrying `expected`.
    pub fn ensure_id(&self, expected: &Id) -> Result<()> {
        match &self.id {
            Some(id) if id == expected => Ok(()),
            Some(id) => Err(NitroError::Parse(format!(
                "response id {id} does not match request id {expected}"
            ))),
            None => Err(NitroError::Parse(format!(
                "response has no id, expected {expected}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<JsonRpcError> for NitroError {
    fn from(error: JsonRpcError) -> Self {
        NitroError::Rpc {
            code: error.code,
            message: error.message,
            data: error.data,
        }
    }
}

use crate::error::{NitroError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint and per-call deadline shared by the transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub rpc_url: Url,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let rpc_url = rpc_url.trim();
        if rpc_url.is_empty() {
            return Err(NitroError::InvalidArgument(
                "RPC URL must not be empty".to_string(),
            ));
        }

        let rpc_url = Url::parse(rpc_url.trim_end_matches('/'))
            .map_err(|e| NitroError::InvalidArgument(format!("invalid RPC URL '{rpc_url}': {e}")))?;

        match rpc_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(NitroError::InvalidArgument(format!(
                    "unsupported RPC URL scheme '{scheme}'"
                )))
            }
        }

        Ok(Self {
            rpc_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint() {
        let config = ClientConfig::new("https://rpc.example.org/").unwrap();
        assert_eq!(config.rpc_url.as_str(), "https://rpc.example.org/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn keeps_path_without_trailing_slash() {
        let config = ClientConfig::new("https://rpc.example.org/v1/key/").unwrap();
        assert_eq!(config.rpc_url.as_str(), "https://rpc.example.org/v1/key");
    }

    #[test]
    fn rejects_blank_and_malformed_urls() {
        assert!(matches!(
            ClientConfig::new("   "),
            Err(NitroError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(NitroError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClientConfig::new("ws://localhost:8546"),
            Err(NitroError::InvalidArgument(_))
        ));
    }

    #[test]
    fn timeout_override() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
    }
}

//! JSON-RPC 2.0 over HTTP POST.
//!
//! Every call gets a fresh id from a per-transport counter, is bounded by the
//! configured deadline, and is decoded into the typed response envelope.

use crate::{
    config::ClientConfig,
    error::{NitroError, Result},
    transport::{MessageHandler, Transport},
    types::{Balance, Id, JsonRpcRequest, JsonRpcResponse, TxParams, NATIVE_ASSET},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tokio::time;
use tracing::{debug, info, warn};
use url::Url;

const TRANSPORT_NAME: &str = "http";

pub struct HttpTransport {
    http_client: reqwest::Client,
    rpc_url: Url,
    timeout: Duration,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NitroError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            rpc_url: config.rpc_url,
            timeout: config.request_timeout,
            next_id: AtomicU64::new(1),
        })
    }

    /// Shorthand for [`HttpTransport::new`] with default settings for `rpc_url`.
    pub fn connect(rpc_url: &str) -> Result<Self> {
        Self::new(ClientConfig::new(rpc_url)?)
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn next_id(&self) -> Id {
        Id::Number(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Invokes `method` and decodes its `result` as `T`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        let request = JsonRpcRequest::new(method, params, self.next_id());

        match time::timeout(self.timeout, self.exchange(&request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(method, id = %request.id, timeout = ?self.timeout, "JSON-RPC call timed out");
                Err(NitroError::Timeout(self.timeout))
            }
        }
    }

    async fn exchange<T: DeserializeOwned>(&self, request: &JsonRpcRequest) -> Result<T> {
        debug!(
            method = %request.method,
            id = %request.id,
            url = %self.rpc_url,
            "Sending JSON-RPC request"
        );

        let response = self
            .http_client
            .post(self.rpc_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%status, error = %e, "Failed to read HTTP error body");
                    format!("<unreadable body: {e}>")
                }
            };
            warn!(%status, method = %request.method, "RPC endpoint returned HTTP error");
            return Err(NitroError::Transport(format!("HTTP {status}: {body}")));
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        debug!(id = %request.id, body = %body, "Received JSON-RPC response");

        let envelope: JsonRpcResponse = serde_json::from_str(&body)
            .map_err(|e| NitroError::Parse(format!("{e}: {body}")))?;

        // Error objects may carry a null id when the node could not read ours.
        if envelope.error.is_none() || envelope.id.is_some() {
            envelope.ensure_id(&request.id)?;
        }

        let result = envelope.into_result().inspect_err(|e| {
            warn!(method = %request.method, error = %e, "JSON-RPC call failed");
        })?;

        serde_json::from_value(result).map_err(|e| {
            NitroError::Parse(format!("unexpected `result` for {}: {e}", request.method))
        })
    }

    fn request_error(&self, error: reqwest::Error) -> NitroError {
        if error.is_timeout() {
            NitroError::Timeout(self.timeout)
        } else {
            NitroError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        TRANSPORT_NAME
    }

    async fn login(&self) -> Result<String> {
        // Identity needs a signer; plain HTTP has none.
        Err(NitroError::unsupported(TRANSPORT_NAME, "login"))
    }

    async fn get_balance(&self, address: &str, asset: &str) -> Result<Balance> {
        if address.trim().is_empty() {
            return Err(NitroError::InvalidArgument(
                "address must not be empty".to_string(),
            ));
        }
        if !asset.eq_ignore_ascii_case(NATIVE_ASSET) {
            return Err(NitroError::unsupported(
                TRANSPORT_NAME,
                "balance query for non-native assets",
            ));
        }

        let quantity: String = self
            .call(
                "eth_getBalance",
                vec![Value::from(address), Value::from("latest")],
            )
            .await?;
        let balance = Balance::from_hex_quantity(&quantity)?;

        debug!(address, %balance, "Fetched balance");
        Ok(balance)
    }

    async fn send_transaction(&self, tx: TxParams) -> Result<String> {
        tx.validate()?;

        let (method, param) = match tx {
            TxParams::Signed(signed) => ("eth_sendRawTransaction", Value::String(signed.raw.to_string())),
            TxParams::Unsigned(unsigned) => ("eth_sendTransaction", unsigned.into_value()),
        };

        let tx_hash: String = self.call(method, vec![param]).await?;
        info!(method, tx_hash = %tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    async fn subscribe(&self, _channel: &str, _on_message: MessageHandler) -> Result<()> {
        // Request/response HTTP has no push channel.
        Err(NitroError::unsupported(TRANSPORT_NAME, "subscribe"))
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

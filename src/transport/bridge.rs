//! Transport for a wallet hosted outside the process (a browser page, a
//! custodian service).
//!
//! The transport never signs anything itself. Each operation becomes a
//! [`BridgeCall`] sent to the [`BridgeHost`], which owns the wallet and answers
//! through the call's reply slot.

use crate::{
    error::{NitroError, Result},
    transport::{MessageHandler, Transport},
    types::{Balance, TxParams},
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time,
};
use tracing::{debug, warn};

const TRANSPORT_NAME: &str = "bridge";

pub const DEFAULT_BRIDGE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeRequest {
    /// Ask the wallet for the active account.
    RequestAccounts,
    /// Ask the wallet to sign and broadcast the transaction fields.
    SignAndSend { tx: Value },
}

pub type BridgeReply = std::result::Result<String, String>;

/// A request in flight across the bridge, awaiting the host's answer.
#[derive(Debug)]
pub struct BridgeCall {
    pub request: BridgeRequest,
    reply: oneshot::Sender<BridgeReply>,
}

impl BridgeCall {
    /// Answers the call. A caller that already gave up is ignored.
    pub fn respond(self, reply: BridgeReply) {
        if self.reply.send(reply).is_err() {
            debug!("Bridge caller dropped before the reply arrived");
        }
    }
}

/// Host side of the bridge.
#[derive(Debug)]
pub struct BridgeHost {
    calls: mpsc::Receiver<BridgeCall>,
}

impl BridgeHost {
    /// Next pending call, or `None` once every transport handle is gone.
    pub async fn next_call(&mut self) -> Option<BridgeCall> {
        self.calls.recv().await
    }
}

#[derive(Debug, Clone)]
pub struct BridgeTransport {
    calls: mpsc::Sender<BridgeCall>,
    timeout: Duration,
}

impl BridgeTransport {
    pub fn channel(capacity: usize) -> (Self, BridgeHost) {
        let (calls, rx) = mpsc::channel(capacity);
        let transport = Self {
            calls,
            timeout: DEFAULT_BRIDGE_TIMEOUT,
        };
        (transport, BridgeHost { calls: rx })
    }

    /// Wallet prompts wait on a human, so the deadline is separate from the
    /// HTTP one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request(&self, request: BridgeRequest) -> Result<String> {
        let (reply, answer) = oneshot::channel();
        debug!(?request, "Calling bridge host");

        let exchange = async move {
            self.calls
                .send(BridgeCall { request, reply })
                .await
                .map_err(|_| NitroError::Transport("bridge host is disconnected".to_string()))?;
            answer.await.map_err(|_| {
                NitroError::Transport("bridge host dropped the call without replying".to_string())
            })
        };

        match time::timeout(self.timeout, exchange).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(message))) => {
                warn!(error = %message, "Bridge host rejected the call");
                Err(NitroError::Transport(message))
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(NitroError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl Transport for BridgeTransport {
    fn name(&self) -> &'static str {
        TRANSPORT_NAME
    }

    async fn login(&self) -> Result<String> {
        self.request(BridgeRequest::RequestAccounts).await
    }

    async fn get_balance(&self, _address: &str, _asset: &str) -> Result<Balance> {
        Err(NitroError::unsupported(TRANSPORT_NAME, "balance query"))
    }

    async fn send_transaction(&self, tx: TxParams) -> Result<String> {
        tx.validate()?;
        match tx {
            TxParams::Unsigned(unsigned) => {
                self.request(BridgeRequest::SignAndSend {
                    tx: unsigned.into_value(),
                })
                .await
            }
            TxParams::Signed(_) => Err(NitroError::unsupported(
                TRANSPORT_NAME,
                "raw transaction broadcast",
            )),
        }
    }

    async fn subscribe(&self, _channel: &str, _on_message: MessageHandler) -> Result<()> {
        Err(NitroError::unsupported(TRANSPORT_NAME, "subscribe"))
    }
}

pub mod bridge;
pub mod http;

pub use bridge::*;
pub use http::*;

use crate::{
    error::Result,
    types::{Balance, TxParams},
};
use async_trait::async_trait;

/// Callback receiving raw push messages for a subscribed channel.
pub type MessageHandler = Box<dyn Fn(String) + Send + Sync + 'static>;

/// Capabilities a Nitrolite endpoint may offer. A transport that cannot
/// provide one of them fails that call with
/// [`NitroError::UnsupportedOperation`](crate::NitroError::UnsupportedOperation).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> &'static str;

    /// Establishes the caller's identity and returns its token (an account
    /// address for wallet-backed transports).
    async fn login(&self) -> Result<String>;

    /// Balance of `address` in `asset`.
    async fn get_balance(&self, address: &str, asset: &str) -> Result<Balance>;

    /// Submits a transaction and returns its id.
    async fn send_transaction(&self, tx: TxParams) -> Result<String>;

    async fn subscribe(&self, channel: &str, on_message: MessageHandler) -> Result<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn login(&self) -> Result<String> {
        (**self).login().await
    }

    async fn get_balance(&self, address: &str, asset: &str) -> Result<Balance> {
        (**self).get_balance(address, asset).await
    }

    async fn send_transaction(&self, tx: TxParams) -> Result<String> {
        (**self).send_transaction(tx).await
    }

    async fn subscribe(&self, channel: &str, on_message: MessageHandler) -> Result<()> {
        (**self).subscribe(channel, on_message).await
    }
}

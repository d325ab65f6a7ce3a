use crate::{
    error::Result,
    transport::{MessageHandler, Transport},
    types::{Balance, TxParams},
};

/// Entry point for callers. Owns one transport and forwards every operation
/// to it; results and errors come back untouched.
#[derive(Debug)]
pub struct NitroliteClient<T> {
    transport: T,
}

impl<T: Transport> NitroliteClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn login(&self) -> Result<String> {
        self.transport.login().await
    }

    pub async fn get_balance(&self, address: &str, asset: &str) -> Result<Balance> {
        self.transport.get_balance(address, asset).await
    }

    pub async fn send_transaction(&self, tx: TxParams) -> Result<String> {
        self.transport.send_transaction(tx).await
    }

    pub async fn subscribe(&self, channel: &str, on_message: MessageHandler) -> Result<()> {
        self.transport.subscribe(channel, on_message).await
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

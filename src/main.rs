use clap::Parser;
use eyre::Result;
use nitrolite::{
    cli::{Cli, Commands},
    ClientConfig, HttpTransport, NitroliteClient, SignedTransaction, TxParams,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config =
        ClientConfig::new(&cli.rpc_url)?.with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = NitroliteClient::new(HttpTransport::new(config)?);

    match cli.command {
        Commands::Balance { address, asset } => {
            let balance = client.get_balance(&address, &asset).await?;
            info!("Balance for {address}:");
            info!("  Wei: {}", balance.wei());
            info!("  {asset}: {}", balance.ether()?.normalized());
        }
        Commands::SendRaw { raw } => {
            let tx = TxParams::Signed(SignedTransaction::from_hex(&raw)?);
            let tx_hash = client.send_transaction(tx).await?;
            info!("Transaction hash: {tx_hash}");
        }
        Commands::Send { tx_json } => {
            let tx = TxParams::from_value(serde_json::from_str(&tx_json)?)?;
            let tx_hash = client.send_transaction(tx).await?;
            info!("Transaction hash: {tx_hash}");
        }
        Commands::Login => {
            let identity = client.login().await?;
            info!("Logged in as {identity}");
        }
        Commands::Subscribe { channel } => {
            client
                .subscribe(&channel, Box::new(|message: String| info!("Event: {message}")))
                .await?;
            info!("Subscribed to {channel}");
        }
    }

    Ok(())
}

use crate::config::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS};
use crate::types::NATIVE_ASSET;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON-RPC endpoint
    #[arg(long, global = true, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Per-call deadline in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the balance of an address
    Balance {
        address: String,
        #[arg(long, default_value = NATIVE_ASSET)]
        asset: String,
    },
    /// Broadcast a signed transaction given as hex
    SendRaw { raw: String },
    /// Submit transaction params as JSON, e.g. '{"raw":"0x..."}' or '{"to":"0x..","value":"0x1"}'
    Send { tx_json: String },
    Login,
    Subscribe { channel: String },
}

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::*;
pub use config::*;
pub use error::*;
pub use transport::*;
pub use types::*;

pub mod balance;
pub mod rpc;
pub mod transaction;

pub use balance::*;
pub use rpc::*;
pub use transaction::*;

#[allow(clippy::module_inception)]
pub mod rpc;

pub use rpc::*;

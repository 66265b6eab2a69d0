pub mod cli;
pub mod common;
pub mod config;
pub mod estimator;
pub mod gas;
pub mod price;
pub mod quantity;
pub mod rpc;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use estimator::{Estimate, Estimator};
pub use gas::{GasCalculator, GasConfig};
pub use price::{DuneGasPriceClient, GasPrice, GasPriceFeed, PriceCache};
pub use quantity::{Quantity, QuantityInput};
pub use rpc::MintCostRpcImpl;
pub use server::MintCostServer;

// Export anyhow::Result for convenience
pub use anyhow::Result;

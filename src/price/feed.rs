use alloy::primitives::U256;
use async_trait::async_trait;
use std::fmt::Debug;

use super::{FeedError, GasPrice};

/// Source of the current price per gas.
#[async_trait]
pub trait GasPriceFeed: Send + Sync + Debug {
    async fn fetch_gas_price(&self) -> Result<GasPrice, FeedError>;
}

// Feed that always reports the same configured price, for offline use
#[derive(Debug, Clone)]
pub struct FixedGasPriceFeed {
    price: GasPrice,
}

impl FixedGasPriceFeed {
    pub fn new(wei: U256) -> Self {
        Self {
            price: GasPrice::from_wei(wei),
        }
    }
}

#[async_trait]
impl GasPriceFeed for FixedGasPriceFeed {
    async fn fetch_gas_price(&self) -> Result<GasPrice, FeedError> {
        Ok(self.price.clone())
    }
}

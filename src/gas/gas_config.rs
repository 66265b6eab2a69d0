use alloy::primitives::U256;
use serde::Serialize;

use crate::common::{TX_GAS_BASE, TX_GAS_PER_PHOTO};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasConfig {
    pub base_gas: U256,      // Fixed cost of the batch mint transaction
    pub gas_per_photo: U256, // Cost added by every photo in the batch
}

impl GasConfig {
    pub fn new(base_gas: u64, gas_per_photo: u64) -> Self {
        Self {
            base_gas: U256::from(base_gas),
            gas_per_photo: U256::from(gas_per_photo),
        }
    }
}

impl Default for GasConfig {
    fn default() -> Self {
        Self::new(TX_GAS_BASE, TX_GAS_PER_PHOTO)
    }
}

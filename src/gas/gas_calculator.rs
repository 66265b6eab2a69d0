use super::gas_config::GasConfig;
use crate::quantity::Quantity;
use alloy::primitives::U256;

pub struct GasCalculator;

impl GasCalculator {
    // gas used by one batch mint transaction of `quantity` photos
    // base + per_photo * quantity, exact in 256 bits
    pub fn mint_gas(config: &GasConfig, quantity: Quantity) -> U256 {
        let mut gas = config.base_gas;

        gas += config.gas_per_photo * U256::from(quantity.get());

        gas
    }

    // total cost in wei, None if the product does not fit in 256 bits
    pub fn gas_cost(gas: U256, gas_price: U256) -> Option<U256> {
        gas.checked_mul(gas_price)
    }
}

use alloy::primitives::U256;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    #[error("Cost overflows 256 bits: {gas_units} gas at {gas_price} wei per gas")]
    Overflow { gas_units: U256, gas_price: U256 },
}

use alloy::primitives::U256;

use super::{EstimateError, format_ether_rounded};
use crate::common::{DISPLAY_DECIMALS, PLACEHOLDER};
use crate::gas::{GasCalculator, GasConfig};
use crate::price::GasPrice;
use crate::price::gas_price::wei_to_gwei_string;
use crate::quantity::Quantity;

// Result of one estimation, cost is None until a gas price is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Estimate {
    pub quantity: Quantity,
    pub gas_units: U256,
    pub gas_price: Option<GasPrice>,
    pub cost_wei: Option<U256>,
}

impl Estimate {
    // cost in ether rounded for display
    pub fn cost_ether(&self) -> Option<String> {
        self.cost_wei
            .map(|wei| format_ether_rounded(wei, DISPLAY_DECIMALS))
    }

    /// `"0.07687 ETH"`, or `"… ETH"` while the price is unknown.
    pub fn display_cost(&self) -> String {
        match self.cost_ether() {
            Some(ether) => format!("{} ETH", ether),
            None => format!("{} ETH", PLACEHOLDER),
        }
    }

    pub fn display_gas_price(&self) -> String {
        match &self.gas_price {
            Some(price) => format!("{} gwei per gas", price.gwei_display()),
            None => format!("{} gwei per gas", PLACEHOLDER),
        }
    }

    // where the gas price comes from, with the feed's extra fee fields if any
    pub fn gas_price_note(&self) -> Option<String> {
        let price = self.gas_price.as_ref()?;
        let mut note = format!(
            "{} gwei is the median gas price over the last week",
            price.gwei_display()
        );

        let extras: Vec<String> = [
            ("fee cap", price.max_fee_per_gas),
            ("priority fee", price.priority_fee_per_gas),
        ]
        .into_iter()
        .filter_map(|(label, wei)| {
            wei.map(|wei| format!("{} {} gwei", label, wei_to_gwei_string(wei)))
        })
        .collect();

        if !extras.is_empty() {
            note.push_str(&format!(" ({})", extras.join(", ")));
        }

        Some(note)
    }
}

/// Combines the mint gas formula with a gas price.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: GasConfig,
}

impl Estimator {
    pub fn new(config: GasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GasConfig {
        &self.config
    }

    pub fn estimate(
        &self,
        quantity: Quantity,
        gas_price: Option<&GasPrice>,
    ) -> Result<Estimate, EstimateError> {
        let gas_units = GasCalculator::mint_gas(&self.config, quantity);

        let cost_wei = match gas_price {
            Some(price) => Some(GasCalculator::gas_cost(gas_units, price.wei).ok_or(
                EstimateError::Overflow {
                    gas_units,
                    gas_price: price.wei,
                },
            )?),
            None => None,
        };

        Ok(Estimate {
            quantity,
            gas_units,
            gas_price: gas_price.cloned(),
            cost_wei,
        })
    }

    // "(100 × 25687 + 506061) tx gas × 25 gwei per gas"
    pub fn breakdown(&self, estimate: &Estimate) -> String {
        format!(
            "({} × {} + {}) tx gas × {}",
            estimate.quantity,
            self.config.gas_per_photo,
            self.config.base_gas,
            estimate.display_gas_price()
        )
    }
}

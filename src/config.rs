use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::common::{DEFAULT_RPC_ADDR, Environment, QuantityPolicy};
use crate::price::{DuneGasPriceClient, FixedGasPriceFeed, GasPrice, GasPriceFeed};

pub const ENV_PREFIX: &str = "MINT_COST_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),
    #[error("No gas price source: set MINT_COST_GAS_QUERY_API_URL or MINT_COST_FIXED_GAS_PRICE_GWEI")]
    MissingGasPriceSource,
    #[error("Invalid fixed gas price: {0}")]
    InvalidFixedGasPrice(String),
    #[error("Refresh interval must be at least one second")]
    ZeroRefreshInterval,
}

/// Settings read from `MINT_COST_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Endpoint returning the gas price query results.
    #[serde(default)]
    pub gas_query_api_url: Option<Url>,

    /// Use this price in gwei instead of calling the endpoint.
    #[serde(default)]
    pub fixed_gas_price_gwei: Option<String>,

    #[serde(default)]
    pub environment: Environment,

    /// Seconds between gas price refreshes. Without it the price is fetched once.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,

    #[serde(default = "default_rpc_addr")]
    pub rpc_addr: SocketAddr,

    /// Reject invalid quantities instead of treating them as zero.
    #[serde(default)]
    pub strict_quantity: bool,
}

fn default_rpc_addr() -> SocketAddr {
    DEFAULT_RPC_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8545)))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Config = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()
    }

    // same as from_env, over an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.gas_query_api_url.is_none() && self.fixed_gas_price_gwei.is_none() {
            return Err(ConfigError::MissingGasPriceSource);
        }
        if self.refresh_interval_secs == Some(0) {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if let Some(gwei) = &self.fixed_gas_price_gwei {
            GasPrice::parse_gwei(gwei)
                .map_err(|e| ConfigError::InvalidFixedGasPrice(e.to_string()))?;
        }
        Ok(self)
    }

    pub fn quantity_policy(&self) -> QuantityPolicy {
        if self.strict_quantity {
            QuantityPolicy::Strict
        } else {
            QuantityPolicy::Lenient
        }
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs.map(Duration::from_secs)
    }

    // a fixed price wins over the endpoint
    pub fn gas_price_feed(&self) -> Result<Arc<dyn GasPriceFeed>, ConfigError> {
        if let Some(gwei) = &self.fixed_gas_price_gwei {
            let wei = GasPrice::parse_gwei(gwei)
                .map_err(|e| ConfigError::InvalidFixedGasPrice(e.to_string()))?;
            return Ok(Arc::new(FixedGasPriceFeed::new(wei)));
        }

        let endpoint = self
            .gas_query_api_url
            .clone()
            .ok_or(ConfigError::MissingGasPriceSource)?;
        Ok(Arc::new(DuneGasPriceClient::new(
            endpoint,
            reqwest::Client::new(),
        )))
    }
}

use chrono::{DateTime, Utc};
use jsonrpsee::core::{RpcResult, async_trait};
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::types::error::{INTERNAL_ERROR_CODE, INVALID_PARAMS_CODE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::QuantityPolicy;
use crate::estimator::{Estimate, Estimator};
use crate::price::{CachedGasPrice, PriceCache};
use crate::quantity::Quantity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub quantity: u64,
    pub gas_units: String,
    pub gas_price_gwei: Option<String>,
    pub cost_wei: Option<String>,
    pub cost_eth: Option<String>,
    pub display: String,
    pub breakdown: String,
    pub gas_price_note: Option<String>,
    pub price_fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    pub gas_price_gwei: String,
    pub gas_price_wei: String,
    pub max_fee_per_gas_wei: Option<String>,
    pub priority_fee_per_gas_wei: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormulaResponse {
    pub base_gas: String,
    pub gas_per_photo: String,
}

impl From<CachedGasPrice> for GasPriceResponse {
    fn from(cached: CachedGasPrice) -> Self {
        Self {
            gas_price_gwei: cached.price.gwei_display(),
            gas_price_wei: cached.price.wei.to_string(),
            max_fee_per_gas_wei: cached.price.max_fee_per_gas.map(|v| v.to_string()),
            priority_fee_per_gas_wei: cached.price.priority_fee_per_gas.map(|v| v.to_string()),
            fetched_at: cached.fetched_at,
        }
    }
}

#[rpc(server, namespace = "mint")]
pub trait MintCostRpc {
    /// Estimate the cost of minting the quantity written in `quantity`.
    #[method(name = "estimate")]
    async fn estimate(&self, quantity: String) -> RpcResult<EstimateResponse>;

    /// Last fetched gas price, null until the feed has answered.
    #[method(name = "gasPrice")]
    async fn gas_price(&self) -> RpcResult<Option<GasPriceResponse>>;

    #[method(name = "formula")]
    fn formula(&self) -> RpcResult<FormulaResponse>;
}

pub struct MintCostRpcImpl {
    estimator: Estimator,
    cache: PriceCache,
    policy: QuantityPolicy,
}

impl MintCostRpcImpl {
    pub fn new(estimator: Estimator, cache: PriceCache, policy: QuantityPolicy) -> Self {
        Self {
            estimator,
            cache,
            policy,
        }
    }

    fn parse_quantity(&self, text: &str) -> RpcResult<Quantity> {
        match self.policy {
            QuantityPolicy::Lenient => Ok(Quantity::parse_lenient(text)),
            QuantityPolicy::Strict => text
                .parse::<Quantity>()
                .map_err(|e| ErrorObjectOwned::owned(INVALID_PARAMS_CODE, e.to_string(), None::<()>)),
        }
    }

    fn to_response(&self, estimate: &Estimate, cached: Option<&CachedGasPrice>) -> EstimateResponse {
        EstimateResponse {
            quantity: estimate.quantity.get(),
            gas_units: estimate.gas_units.to_string(),
            gas_price_gwei: estimate.gas_price.as_ref().map(|p| p.gwei_display()),
            cost_wei: estimate.cost_wei.map(|v| v.to_string()),
            cost_eth: estimate.cost_ether(),
            display: estimate.display_cost(),
            breakdown: self.estimator.breakdown(estimate),
            gas_price_note: estimate.gas_price_note(),
            price_fetched_at: cached.map(|c| c.fetched_at),
        }
    }
}

#[async_trait]
impl MintCostRpcServer for MintCostRpcImpl {
    async fn estimate(&self, quantity: String) -> RpcResult<EstimateResponse> {
        let quantity = self.parse_quantity(&quantity)?;
        let cached = self.cache.latest();

        let estimate = self
            .estimator
            .estimate(quantity, cached.as_ref().map(|c| &c.price))
            .map_err(|e| ErrorObjectOwned::owned(INTERNAL_ERROR_CODE, e.to_string(), None::<()>))?;

        debug!("Estimated {} for {} photos", estimate.display_cost(), quantity);
        Ok(self.to_response(&estimate, cached.as_ref()))
    }

    async fn gas_price(&self) -> RpcResult<Option<GasPriceResponse>> {
        Ok(self.cache.latest().map(GasPriceResponse::from))
    }

    fn formula(&self) -> RpcResult<FormulaResponse> {
        let config = self.estimator.config();
        Ok(FormulaResponse {
            base_gas: config.base_gas.to_string(),
            gas_per_photo: config.gas_per_photo.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::FixedGasPriceFeed;
    use alloy::primitives::U256;
    use std::sync::Arc;

    fn make_rpc(policy: QuantityPolicy) -> (MintCostRpcImpl, PriceCache) {
        let feed = FixedGasPriceFeed::new(U256::from(25_000_000_000u64));
        let cache = PriceCache::new(Arc::new(feed));
        (
            MintCostRpcImpl::new(Estimator::default(), cache.clone(), policy),
            cache,
        )
    }

    #[tokio::test]
    async fn test_estimate_before_price_is_known() {
        let (rpc, _cache) = make_rpc(QuantityPolicy::Lenient);
        let response = MintCostRpcServer::estimate(&rpc, "abc".to_string())
            .await
            .unwrap();

        assert_eq!(response.quantity, 0);
        assert_eq!(response.gas_units, "506061");
        assert_eq!(response.cost_eth, None);
        assert_eq!(response.display, "… ETH");
        assert_eq!(response.price_fetched_at, None);
    }

    #[tokio::test]
    async fn test_estimate_after_refresh() {
        let (rpc, cache) = make_rpc(QuantityPolicy::Lenient);
        cache.refresh().await.unwrap();

        let response = MintCostRpcServer::estimate(&rpc, "100".to_string())
            .await
            .unwrap();

        assert_eq!(response.gas_units, "3074761");
        assert_eq!(response.cost_wei.as_deref(), Some("76869025000000000"));
        assert_eq!(response.display, "0.07687 ETH");
        assert!(response.price_fetched_at.is_some());

        let price = MintCostRpcServer::gas_price(&rpc).await.unwrap().unwrap();
        assert_eq!(price.gas_price_gwei, "25");
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_text() {
        let (rpc, _cache) = make_rpc(QuantityPolicy::Strict);
        let err = MintCostRpcServer::estimate(&rpc, "ten".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.code(), INVALID_PARAMS_CODE);
    }

    #[tokio::test]
    async fn test_strict_policy_accepts_count() {
        let (rpc, _cache) = make_rpc(QuantityPolicy::Strict);
        let response = MintCostRpcServer::estimate(&rpc, "42".to_string())
            .await
            .unwrap();

        assert_eq!(response.quantity, 42);
    }

    #[test]
    fn test_formula() {
        let (rpc, _cache) = make_rpc(QuantityPolicy::Lenient);
        let formula = rpc.formula().unwrap();

        assert_eq!(formula.base_gas, "506061");
        assert_eq!(formula.gas_per_photo, "25687");
    }
}

use alloy::primitives::U256;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{FeedError, GasPrice, GasPriceFeed};

/// Reads the weekly median gas price from a Dune query results endpoint.
///
/// The endpoint must answer with a single result row carrying
/// `p50_gas_price` in gwei, or with an `error` message.
#[derive(Debug)]
pub struct DuneGasPriceClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl DuneGasPriceClient {
    pub fn new(endpoint: Url, client: reqwest::Client) -> Self {
        Self { endpoint, client }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GasPriceFeed for DuneGasPriceClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_gas_price(&self) -> Result<GasPrice, FeedError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.bytes().await?;
        let price = parse_gas_price_response(&body)?;
        debug!("Fetched gas price: {} gwei", price.gwei_display());

        Ok(price)
    }
}

#[derive(Debug, Deserialize)]
struct DuneQueryResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    result: Option<DuneQueryResult>,
}

#[derive(Debug, Deserialize)]
struct DuneQueryResult {
    rows: Vec<GasPriceRow>,
}

#[derive(Debug, Deserialize)]
struct GasPriceRow {
    p50_gas_price: serde_json::Number,
    #[serde(default)]
    p50_max_fee_per_gas: Option<serde_json::Number>,
    #[serde(default)]
    p50_max_priority_fee_per_gas: Option<serde_json::Number>,
}

// validate a response body and turn its only row into a gas price
pub fn parse_gas_price_response(body: &[u8]) -> Result<GasPrice, FeedError> {
    let response: DuneQueryResponse =
        serde_json::from_slice(body).map_err(|e| FeedError::Schema(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(FeedError::Upstream(error));
    }

    let result = response
        .result
        .ok_or_else(|| FeedError::Schema("missing `result`".to_string()))?;

    let row = match <[GasPriceRow; 1]>::try_from(result.rows) {
        Ok([row]) => row,
        Err(rows) => {
            return Err(FeedError::Schema(format!(
                "expected exactly one row, got {}",
                rows.len()
            )));
        }
    };

    let wei = GasPrice::parse_gwei(&row.p50_gas_price.to_string())?;
    let max_fee = optional_gwei(row.p50_max_fee_per_gas)?;
    let priority_fee = optional_gwei(row.p50_max_priority_fee_per_gas)?;

    Ok(GasPrice::from_wei(wei).with_context(max_fee, priority_fee))
}

fn optional_gwei(value: Option<serde_json::Number>) -> Result<Option<U256>, FeedError> {
    value
        .map(|number| GasPrice::parse_gwei(&number.to_string()))
        .transpose()
}

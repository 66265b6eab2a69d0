use anyhow::Result;
use httpmock::{Method::GET, MockServer};
use mint_cost::common::QuantityPolicy;
use mint_cost::price::FeedError;
use mint_cost::rpc::{EstimateResponse, GasPriceResponse};
use mint_cost::{DuneGasPriceClient, Estimator, GasPriceFeed, MintCostServer, PriceCache};
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

const RESULTS_PATH: &str = "/api/v1/query/2426668/results";

fn mock_results(server: &MockServer, status: u16, body: &str) {
    server.mock(|when, then| {
        when.method(GET).path(RESULTS_PATH);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    });
}

fn dune_client(server: &MockServer) -> DuneGasPriceClient {
    let endpoint = Url::parse(&server.url(RESULTS_PATH)).unwrap();
    DuneGasPriceClient::new(endpoint, reqwest::Client::new())
}

// Helper sending one JSON-RPC request and returning its `result`
async fn rpc_call(addr: std::net::SocketAddr, method: &str, params: Value) -> Result<Value> {
    let response: Value = reqwest::Client::new()
        .post(format!("http://{}", addr))
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params}))
        .send()
        .await?
        .json()
        .await?;

    Ok(response["result"].clone())
}

#[tokio::test]
async fn test_dune_client_happy_path() {
    let server = MockServer::start();
    mock_results(
        &server,
        200,
        r#"{"execution_id":"01HX","state":"QUERY_STATE_COMPLETED","result":{"rows":[{"p50_gas_price":25}],"metadata":{"column_names":["p50_gas_price"]}}}"#,
    );

    let price = dune_client(&server).fetch_gas_price().await.unwrap();
    assert_eq!(price.gwei_display(), "25");
}

#[tokio::test]
async fn test_dune_client_http_error() {
    let server = MockServer::start();
    mock_results(&server, 401, r#"{"error":"invalid API Key"}"#);

    let err = dune_client(&server).fetch_gas_price().await.unwrap_err();
    assert!(matches!(err, FeedError::Status { .. }));
    assert!(
        err.to_string()
            .starts_with("Failed to fetch gas prices: 401 Unauthorized")
    );
}

#[tokio::test]
async fn test_dune_client_upstream_error_payload() {
    let server = MockServer::start();
    mock_results(&server, 200, r#"{"error":"Query execution failed"}"#);

    let err = dune_client(&server).fetch_gas_price().await.unwrap_err();
    assert!(matches!(err, FeedError::Upstream(message) if message == "Query execution failed"));
}

#[tokio::test]
async fn test_dune_client_schema_error() {
    let server = MockServer::start();
    mock_results(&server, 200, r#"{"result":{"rows":[]}}"#);

    let err = dune_client(&server).fetch_gas_price().await.unwrap_err();
    assert!(matches!(err, FeedError::Schema(_)));
}

#[tokio::test]
async fn test_rpc_server_end_to_end() -> Result<()> {
    let feed_server = MockServer::start();
    mock_results(
        &feed_server,
        200,
        r#"{"result":{"rows":[{"p50_gas_price":25,"p50_max_fee_per_gas":31.5}]}}"#,
    );

    let cache = PriceCache::new(Arc::new(dune_client(&feed_server)));
    let server = MintCostServer::new(
        Estimator::default(),
        cache.clone(),
        QuantityPolicy::Lenient,
        None,
        "127.0.0.1:0".parse()?,
    );
    let (addr, handle) = server.start().await?;

    // nothing fetched yet: placeholder
    let result = rpc_call(addr, "mint_estimate", json!(["100"])).await?;
    let estimate: EstimateResponse = serde_json::from_value(result)?;
    assert_eq!(estimate.display, "… ETH");
    assert_eq!(estimate.gas_units, "3074761");
    assert_eq!(rpc_call(addr, "mint_gasPrice", json!([])).await?, Value::Null);

    server.start_price_refresh().await?;

    let result = rpc_call(addr, "mint_estimate", json!(["12 photos"])).await?;
    let estimate: EstimateResponse = serde_json::from_value(result)?;
    assert_eq!(estimate.quantity, 12);
    assert_eq!(estimate.gas_units, "814305");
    assert_eq!(estimate.display, "0.02036 ETH");
    assert_eq!(
        estimate.breakdown,
        "(12 × 25687 + 506061) tx gas × 25 gwei per gas"
    );
    assert_eq!(
        estimate.gas_price_note.as_deref(),
        Some("25 gwei is the median gas price over the last week (fee cap 31.5 gwei)")
    );

    let result = rpc_call(addr, "mint_gasPrice", json!([])).await?;
    let price: GasPriceResponse = serde_json::from_value(result)?;
    assert_eq!(price.gas_price_wei, "25000000000");
    assert_eq!(price.max_fee_per_gas_wei.as_deref(), Some("31500000000"));

    let formula = rpc_call(addr, "mint_formula", json!([])).await?;
    assert_eq!(formula, json!({"baseGas": "506061", "gasPerPhoto": "25687"}));

    handle.stop()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to reach gas price feed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch gas prices: {status} {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Unexpected gas price response: {0}")]
    Schema(String),
    #[error("Gas price feed returned an error: {0}")]
    Upstream(String),
    #[error("Invalid gas price {value:?}: {reason}")]
    InvalidPrice { value: String, reason: String },
}

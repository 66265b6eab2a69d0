#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("Quantity is empty")]
    Empty,
    #[error("Not a whole number of photos: {0:?}")]
    NotACount(String),
    #[error("Quantity is too large: {0}")]
    TooLarge(String),
}

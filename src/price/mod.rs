pub mod cache;
pub mod dune;
pub mod error;
pub mod feed;
pub mod gas_price;

pub use cache::*;
pub use dune::*;
pub use error::*;
pub use feed::*;
pub use gas_price::*;

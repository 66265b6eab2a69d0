pub mod error;
pub mod input;
#[allow(clippy::module_inception)]
pub mod quantity;

pub use error::*;
pub use input::*;
pub use quantity::*;

pub mod error;
#[allow(clippy::module_inception)]
pub mod estimator;
pub mod format;

pub use error::*;
pub use estimator::*;
pub use format::*;

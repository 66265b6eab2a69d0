use tracing::debug;

use super::{Quantity, QuantityError};
use crate::common::QuantityPolicy;

// Editable quantity field, reports every accepted edit to its owner
pub struct QuantityInput<F>
where
    F: FnMut(Quantity),
{
    current: Quantity,
    policy: QuantityPolicy,
    on_change: F,
}

impl<F> QuantityInput<F>
where
    F: FnMut(Quantity),
{
    pub fn new(initial: Quantity, policy: QuantityPolicy, on_change: F) -> Self {
        Self {
            current: initial,
            policy,
            on_change,
        }
    }

    pub fn current(&self) -> Quantity {
        self.current
    }

    // handle the raw text of the field after an edit
    // in strict mode an invalid edit is returned as an error and nothing is emitted
    pub fn on_input(&mut self, text: &str) -> Result<Quantity, QuantityError> {
        let quantity = match self.policy {
            QuantityPolicy::Lenient => Quantity::parse_lenient(text),
            QuantityPolicy::Strict => text.parse::<Quantity>().inspect_err(|e| {
                debug!("Rejected quantity edit {:?}: {}", text, e);
            })?,
        };

        self.current = quantity;
        (self.on_change)(quantity);

        Ok(quantity)
    }
}

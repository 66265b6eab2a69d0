use serde::{Deserialize, Serialize};

// Deployment mode, only affects how verbose the logs are
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    // default tracing filter for this mode, RUST_LOG takes precedence
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "mint_cost=debug,info",
            Environment::Production => "info",
        }
    }
}

// What the quantity input does with text that is not a valid count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantityPolicy {
    #[default]
    Lenient, // coerce to zero
    Strict,  // reject and keep the previous value
}

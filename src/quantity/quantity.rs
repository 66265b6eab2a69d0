use serde::{Deserialize, Serialize};
use std::{fmt, num::IntErrorKind, str::FromStr};

use super::QuantityError;
use crate::common::DEFAULT_QUANTITY;

/// Number of photos minted in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    // quantity shown before the user edits anything
    pub fn initial() -> Self {
        Self(DEFAULT_QUANTITY)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Reads the integer at the start of user-edited text.
    ///
    /// Leading whitespace and a sign are skipped and parsing stops at the
    /// first non-digit, so `" 12 photos"` is 12. Anything that does not
    /// yield a non-negative count in range becomes zero.
    pub fn parse_lenient(text: &str) -> Self {
        leading_integer(text).map(Self).unwrap_or(Self::ZERO)
    }
}

fn leading_integer(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];

    // "-0" is still zero, every other negative is rejected
    if negative {
        return digits.bytes().all(|b| b == b'0').then_some(0);
    }

    digits.parse().ok()
}

// strict parse: the whole (trimmed) text must be a count
impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }

        trimmed.parse::<u64>().map(Self).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => QuantityError::TooLarge(trimmed.to_string()),
            _ => QuantityError::NotACount(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

use alloy::primitives::{
    U256,
    utils::{ParseUnits, format_units, parse_units},
};

use super::FeedError;

const WEI_PER_GWEI: u64 = 1_000_000_000; // 1 gwei = 10^9 wei
// larger exponents overflow U256 wei anyway
const MAX_EXPONENT: u32 = 96;

/// Price per unit of gas, kept in wei so that costs stay exact.
///
/// The fee cap and priority fee are carried along when the feed reports
/// them. They are informational and never enter the cost formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasPrice {
    pub wei: U256,
    pub max_fee_per_gas: Option<U256>,
    pub priority_fee_per_gas: Option<U256>,
}

impl GasPrice {
    pub fn from_wei(wei: U256) -> Self {
        Self {
            wei,
            max_fee_per_gas: None,
            priority_fee_per_gas: None,
        }
    }

    pub fn from_gwei(gwei: u64) -> Self {
        Self::from_wei(U256::from(gwei) * U256::from(WEI_PER_GWEI))
    }

    /// Parses a gwei figure such as `25`, `12.5` or `1e-6` into wei.
    ///
    /// Digits past the ninth fractional place are below one wei and are
    /// truncated, so `18.234567890123` becomes `18234567890` wei.
    pub fn parse_gwei(text: &str) -> Result<U256, FeedError> {
        let invalid = |reason: String| FeedError::InvalidPrice {
            value: text.to_string(),
            reason,
        };

        let expanded = expand_exponent(text);
        let plain = expanded.as_deref().unwrap_or(text);

        match parse_units(plain, "gwei").map_err(|e| invalid(e.to_string()))? {
            ParseUnits::U256(wei) => Ok(wei),
            ParseUnits::I256(_) => Err(invalid("price is negative".to_string())),
        }
    }

    pub fn with_context(
        mut self,
        max_fee_per_gas: Option<U256>,
        priority_fee_per_gas: Option<U256>,
    ) -> Self {
        self.max_fee_per_gas = max_fee_per_gas;
        self.priority_fee_per_gas = priority_fee_per_gas;
        self
    }

    /// Price in gwei without trailing zeros, e.g. `25` or `12.5`.
    pub fn gwei_display(&self) -> String {
        wei_to_gwei_string(self.wei)
    }
}

// "1.5e-6" -> "0.0000015", None when there is no exponent to expand
fn expand_exponent(text: &str) -> Option<String> {
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let exponent: i32 = exponent.parse().ok()?;
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{}{}", whole, fraction);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some("0".to_string());
    }
    let point = whole.len() as i32 + exponent - (digits.len() - significant.len()) as i32;

    let expanded = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), significant)
    } else if point as usize >= significant.len() {
        format!("{}{}", significant, "0".repeat(point as usize - significant.len()))
    } else {
        let (int, frac) = significant.split_at(point as usize);
        format!("{}.{}", int, frac)
    };

    Some(format!("{}{}", sign, expanded))
}

pub(crate) fn wei_to_gwei_string(wei: U256) -> String {
    // gwei has 9 decimals, formatting a U256 with it cannot fail
    let formatted = format_units(wei, "gwei").unwrap_or_else(|_| wei.to_string());
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => formatted,
    }
}

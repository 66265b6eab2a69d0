use alloy::primitives::{U256, utils::format_units};

const ETHER_DECIMALS: u8 = 18;

// wei / 10^(18 - decimals), halves round up
// never overflows: with decimals below 18 the quotient is at most U256::MAX / 10
fn rounded_steps(wei: U256, decimals: u8) -> U256 {
    if decimals >= ETHER_DECIMALS {
        return wei;
    }

    let step = U256::from(10).pow(U256::from(ETHER_DECIMALS - decimals));
    let half = step / U256::from(2);

    let mut whole_steps = wei / step;
    if wei % step >= half {
        whole_steps += U256::from(1);
    }

    whole_steps
}

// round a wei amount to `decimals` fractional ether digits, halves round up
// None when the rounded amount no longer fits in 256 bits
pub fn round_wei(wei: U256, decimals: u8) -> Option<U256> {
    if decimals >= ETHER_DECIMALS {
        return Some(wei);
    }

    let step = U256::from(10).pow(U256::from(ETHER_DECIMALS - decimals));
    rounded_steps(wei, decimals).checked_mul(step)
}

/// Formats wei as ether rounded to `decimals` fractional digits.
///
/// Trailing zeros are dropped but one fractional digit always remains,
/// so zero prints as `0.0` and one ether as `1.0`. The rounded amount is
/// formatted in units of `10^-decimals` ether, so amounts close to
/// `U256::MAX` are still exact.
pub fn format_ether_rounded(wei: U256, decimals: u8) -> String {
    let decimals = decimals.min(ETHER_DECIMALS);
    let steps = rounded_steps(wei, decimals);
    // at most 18 decimals, formatting a U256 with them cannot fail
    let formatted = format_units(steps, decimals).unwrap_or_else(|_| steps.to_string());

    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            let fraction = if fraction.is_empty() { "0" } else { fraction };
            format!("{}.{}", whole, fraction)
        }
        None => format!("{}.0", formatted),
    }
}

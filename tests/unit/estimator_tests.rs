use alloy::primitives::U256;
use mint_cost::{Estimator, GasCalculator, GasConfig, GasPrice, Quantity};
use proptest::prelude::*;

fn gas(quantity: u64) -> U256 {
    GasCalculator::mint_gas(&GasConfig::default(), Quantity::new(quantity))
}

#[test]
fn test_documented_gas_values() {
    assert_eq!(gas(0), U256::from(506_061));
    assert_eq!(gas(1), U256::from(531_748));
    assert_eq!(gas(100), U256::from(3_074_761));
}

#[test]
fn test_placeholder_never_shows_a_number() {
    let estimator = Estimator::default();

    for quantity in [0u64, 1, 100, u64::MAX] {
        let estimate = estimator.estimate(Quantity::new(quantity), None).unwrap();
        assert_eq!(estimate.display_cost(), "… ETH");
        assert!(!estimate.display_cost().chars().any(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_fractional_gwei_price_stays_exact() {
    // 3074761 gas at 12.5 gwei = 38434512500000000 wei
    let price = GasPrice::from_wei(GasPrice::parse_gwei("12.5").unwrap());
    let estimate = Estimator::default()
        .estimate(Quantity::initial(), Some(&price))
        .unwrap();

    assert_eq!(estimate.cost_wei, Some(U256::from(38_434_512_500_000_000u64)));
    assert_eq!(estimate.display_cost(), "0.03843 ETH");
}

proptest! {
    #[test]
    fn gas_matches_formula(quantity in any::<u64>()) {
        let expected = U256::from(506_061u64) + U256::from(25_687u64) * U256::from(quantity);
        prop_assert_eq!(gas(quantity), expected);
    }

    #[test]
    fn gas_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(gas(low) <= gas(high));
    }

    #[test]
    fn default_quantity_cost_is_linear_in_price(price in any::<u64>()) {
        let price = GasPrice::from_wei(U256::from(price));
        let estimate = Estimator::default()
            .estimate(Quantity::initial(), Some(&price))
            .unwrap();

        prop_assert_eq!(estimate.cost_wei, Some(U256::from(3_074_761u64) * price.wei));
    }

    #[test]
    fn non_numeric_text_parses_to_zero(text in "[^0-9+\\-\\s][^0-9]*") {
        prop_assert_eq!(Quantity::parse_lenient(&text), Quantity::ZERO);
    }

    #[test]
    fn displayed_quantity_round_trips(quantity in any::<u64>()) {
        let quantity = Quantity::new(quantity);
        prop_assert_eq!(Quantity::parse_lenient(&quantity.to_string()), quantity);
    }
}

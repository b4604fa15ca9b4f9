//! Property-based tests for the pricing and fee math.
//!
//! These tests verify bounds and monotonicity hold under random inputs.

use perps_fees::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Strategies for generating test data
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|x| Decimal::new(x, 2)) // $0.01 to $10,000
}

fn skew_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=1_000_000i64).prop_map(|x| Decimal::new(x, 2)) // -10,000 to +10,000
}

fn skew_scale_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(Decimal::from)
}

fn nonzero_size_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64, any::<bool>())
        .prop_map(|(x, long)| if long { Decimal::new(x, 2) } else { Decimal::new(-x, 2) })
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100i64).prop_map(|x| Decimal::new(x, 4)) // 0 to 100 bps
}

fn gwei_strategy() -> impl Strategy<Value = Gwei> {
    (0i64..1_000_000i64).prop_map(|x| Gwei::new(Decimal::new(x, 2))) // 0 to 10,000 gwei
}

fn keeper_strategy() -> impl Strategy<Value = GlobalKeeperConfig> {
    (
        1u64..5_000_000u64,
        0i64..=100i64,
        0i64..=2_000i64,
        0i64..=10_000i64,
        0i64..=1_000_000i64,
    )
        .prop_map(|(gas, margin_pct, margin_usd, min, spread)| {
            let min = Decimal::new(min, 2);
            GlobalKeeperConfig {
                keeper_settlement_gas_units: GasUnits(gas),
                keeper_flag_gas_units: GasUnits(gas),
                keeper_liquidation_gas_units: GasUnits(gas),
                keeper_profit_margin_percent: Decimal::new(margin_pct, 2),
                keeper_profit_margin_usd: Quote::new(Decimal::new(margin_usd, 2)),
                min_keeper_fee_usd: Quote::new(min),
                max_keeper_fee_usd: Quote::new(min + Decimal::new(spread, 2)),
            }
        })
}

fn fee_config() -> MarketFeeConfig {
    MarketFeeConfig::default()
}

proptest! {
    /// Zero agrees with either side
    #[test]
    fn zero_is_same_side_as_anything(a in skew_strategy()) {
        prop_assert!(is_same_side(a, Decimal::ZERO));
        prop_assert!(is_same_side(Decimal::ZERO, a));
    }

    /// Side agreement is symmetric
    #[test]
    fn same_side_symmetric(a in skew_strategy(), b in skew_strategy()) {
        prop_assert_eq!(is_same_side(a, b), is_same_side(b, a));
    }

    /// No skew scale, no price impact
    #[test]
    fn zero_skew_scale_is_identity(
        skew in skew_strategy(),
        size in skew_strategy(),
        price in price_strategy(),
    ) {
        let oracle_price = Price::new_unchecked(price);
        let fill = calc_fill_price(SignedSize::new(skew), Decimal::ZERO, SignedSize::new(size), oracle_price);
        prop_assert_eq!(fill, Ok(price));
    }

    /// Bigger buys never fill cheaper
    #[test]
    fn fill_price_monotonic_in_size(
        skew in skew_strategy(),
        skew_scale in skew_scale_strategy(),
        a in skew_strategy(),
        b in skew_strategy(),
        price in price_strategy(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let oracle_price = Price::new_unchecked(price);
        let skew = SignedSize::new(skew);

        let fill_small = calc_fill_price(skew, skew_scale, SignedSize::new(small), oracle_price).unwrap();
        let fill_large = calc_fill_price(skew, skew_scale, SignedSize::new(large), oracle_price).unwrap();

        prop_assert!(
            fill_small <= fill_large,
            "fill for {} ({}) above fill for {} ({})",
            small, fill_small, large, fill_large
        );
    }

    /// Maker and taker shares are fractions that add up to the whole order
    #[test]
    fn fee_split_is_partition(
        skew in skew_strategy(),
        size in nonzero_size_strategy(),
    ) {
        let split = allocate_fee_split(SignedSize::new(skew), SignedSize::new(size)).unwrap();

        prop_assert!(split.taker_ratio >= Decimal::ZERO && split.taker_ratio <= Decimal::ONE);
        prop_assert!(split.maker_ratio >= Decimal::ZERO && split.maker_ratio <= Decimal::ONE);
        prop_assert_eq!(split.taker_ratio + split.maker_ratio, Decimal::ONE);
    }

    /// Nil orders never quote a fee
    #[test]
    fn nil_order_always_rejected(
        skew in skew_strategy(),
        skew_scale in skew_scale_strategy(),
        price in price_strategy(),
    ) {
        let market = MarketSnapshot::new(MarketId(1), SignedSize::new(skew), skew_scale, Price::new_unchecked(price));
        let oracle = OracleReading::new(Price::new_unchecked(dec!(2000)), Gwei::new(dec!(20)));

        let result = calc_order_fees(
            &market,
            &fee_config(),
            &GlobalKeeperConfig::default(),
            &oracle,
            &OrderIntent::market(SignedSize::zero()),
        );
        prop_assert_eq!(result, Err(FeeError::InvalidOrder));
    }

    /// Order fee sits between the cheaper and the dearer rate on the notional
    #[test]
    fn order_fee_between_rates(
        skew in skew_strategy(),
        size in nonzero_size_strategy(),
        price in price_strategy(),
        maker_fee in rate_strategy(),
        taker_fee in rate_strategy(),
    ) {
        let market = MarketSnapshot::new(MarketId(1), SignedSize::new(skew), Decimal::ZERO, Price::new_unchecked(price));
        let oracle = OracleReading::new(Price::new_unchecked(dec!(2000)), Gwei::new(dec!(20)));
        let fees = MarketFeeConfig { maker_fee, taker_fee };

        let quote = calc_order_fees(
            &market,
            &fees,
            &GlobalKeeperConfig::default(),
            &oracle,
            &OrderIntent::market(SignedSize::new(size)),
        ).unwrap();

        let notional = quote.notional.value();
        prop_assert!(quote.order_fee.value() >= Decimal::ZERO);
        prop_assert!(quote.order_fee.value() <= notional * maker_fee.max(taker_fee));
        prop_assert_eq!(notional, size.abs() * price);
    }

    /// Quoting twice gives the same answer
    #[test]
    fn order_quote_is_deterministic(
        skew in skew_strategy(),
        skew_scale in skew_scale_strategy(),
        size in nonzero_size_strategy(),
        price in price_strategy(),
    ) {
        let market = MarketSnapshot::new(MarketId(1), SignedSize::new(skew), skew_scale, Price::new_unchecked(price));
        let oracle = OracleReading::new(Price::new_unchecked(dec!(2000)), Gwei::new(dec!(20)));
        let order = OrderIntent::market(SignedSize::new(size));
        let keeper = GlobalKeeperConfig::default();

        let first = calc_order_fees(&market, &fee_config(), &keeper, &oracle, &order);
        let second = calc_order_fees(&market, &fee_config(), &keeper, &oracle, &order);
        prop_assert_eq!(first, second);
    }

    /// Settlement fee never leaves [min, max] and is exactly the shared bounded fee
    #[test]
    fn bounded_fee_within_bounds(
        keeper in keeper_strategy(),
        gwei in gwei_strategy(),
        eth in price_strategy(),
        buffer in (0i64..=50i64).prop_map(|x| Decimal::new(x, 2)),
    ) {
        let bounds = keeper.bounds().unwrap();
        let margin = ProfitMargin::Percent { percent: keeper.keeper_profit_margin_percent, buffer };

        let fee = bounded_keeper_fee(
            keeper.keeper_settlement_gas_units,
            gwei,
            Price::new_unchecked(eth),
            margin,
            &bounds,
        ).unwrap();

        prop_assert!(fee >= keeper.min_keeper_fee_usd);
        prop_assert!(fee <= keeper.max_keeper_fee_usd);

        let settlement = SettlementKeeperFee::new(&keeper, Price::new_unchecked(eth), buffer).unwrap();
        prop_assert_eq!(settlement.evaluate(gwei), Ok(fee));
    }

    /// Flag reward never pays more than the max keeper fee
    #[test]
    fn flag_reward_capped(
        keeper in keeper_strategy(),
        gwei in gwei_strategy(),
        size in (0i64..10_000_000i64).prop_map(|x| Decimal::new(x, 2)),
        price in price_strategy(),
        reward_bps in 0i64..=100i64,
    ) {
        let oracle = OracleReading::new(Price::new_unchecked(dec!(2000)), gwei);
        let position = PositionSnapshot::new(SignedSize::new(size), Price::new_unchecked(price));
        let liquidation = MarketLiquidationConfig {
            liquidation_reward_percent: Decimal::new(reward_bps, 4),
            max_liquidation_capacity: dec!(100),
        };

        let reward = calc_flag_reward(&oracle, &position, &keeper, &liquidation).unwrap();

        prop_assert!(reward.result <= keeper.max_keeper_fee_usd);
        prop_assert!(reward.flag_fee_usd >= reward.flag_execution_cost_usd);
        prop_assert!(reward.result <= reward.flag_fee_with_reward_usd);
    }

    /// Liquidation fee is the capped per-call fee times ceil(size / capacity)
    #[test]
    fn liquidation_fee_linear_in_iterations(
        keeper in keeper_strategy(),
        gwei in gwei_strategy(),
        size in (1i64..100_000i64).prop_map(|x| Decimal::new(x, 1)),
        capacity in (1i64..1_000i64).prop_map(Decimal::from),
    ) {
        let oracle = OracleReading::new(Price::new_unchecked(dec!(2000)), gwei);
        let position = PositionSnapshot::new(SignedSize::new(size), Price::new_unchecked(dec!(2000)));
        let fee = calc_liquidation_keeper_fee(&oracle, &position, capacity, &keeper).unwrap();

        prop_assert_eq!(fee.iterations, (size / capacity).ceil());
        prop_assert!(fee.iterations >= Decimal::ONE);
        prop_assert!(fee.per_iteration <= keeper.max_keeper_fee_usd);
        prop_assert_eq!(fee.total.value(), fee.per_iteration.value() * fee.iterations);
    }

    /// Collateral discount stays in [min, max] and never prices below zero
    #[test]
    fn collateral_discount_bounded(
        price in price_strategy(),
        amount in (0i64..100_000_000i64).prop_map(|x| Decimal::new(x, 2)),
        skew_scale in skew_scale_strategy(),
        min in 0i64..=50i64,
        spread in 0i64..=50i64,
    ) {
        let min = Decimal::new(min, 2);
        let max = min + Decimal::new(spread, 2);

        let discount = calc_collateral_discount(amount, skew_scale, min, max).unwrap();
        prop_assert!(discount >= min && discount <= max);

        let discounted = calc_discounted_collateral_price(Price::new_unchecked(price), amount, skew_scale, min, max).unwrap();
        prop_assert!(discounted >= Decimal::ZERO);
        prop_assert!(discounted <= price);
    }
}

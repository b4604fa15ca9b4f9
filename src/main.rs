//! Perpetual DEX Fee Engine Simulation.
//!
//! Walks a single market through order quotes, settlement, flagging, liquidation
//! and collateral valuation. Set `RUST_LOG=debug` to see the engine's quote traces.

use perps_fees::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Perpetual DEX Fee Engine Simulation");
    println!("Single Market, Skew Priced, Keeper Compensated\n");

    let engine = match FeeEngine::for_environment(Environment::Development) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let scenarios: [(&str, fn(&FeeEngine) -> Result<(), EngineError>); 5] = [
        ("Price Impact", scenario_1_price_impact),
        ("Maker / Taker Allocation", scenario_2_fee_allocation),
        ("Deferred Settlement Fee", scenario_3_settlement),
        ("Flag And Liquidation", scenario_4_liquidation),
        ("Collateral Discounts", scenario_5_collateral),
    ];

    for (i, (name, run)) in scenarios.iter().enumerate() {
        println!("Scenario {}: {}\n", i + 1, name);
        if let Err(e) = run(&engine) {
            eprintln!("  scenario failed: {e}");
            std::process::exit(1);
        }
        println!();
    }

    println!("All simulations completed successfully.");
}

fn eth_market(skew: Decimal) -> MarketSnapshot {
    MarketSnapshot::new(
        MarketId(1),
        SignedSize::new(skew),
        dec!(1_000_000),
        Price::new_unchecked(dec!(2000)),
    )
}

fn oracle(base_fee_gwei: Decimal) -> OracleReading {
    OracleReading::new(Price::new_unchecked(dec!(2000)), Gwei::new(base_fee_gwei))
}

/// Fill price as orders of growing size walk the impact curve.
fn scenario_1_price_impact(engine: &FeeEngine) -> Result<(), EngineError> {
    let market = eth_market(dec!(5_000));
    println!("  Oracle $2,000, skew +5,000, skew scale 1,000,000");

    for size in [dec!(-20_000), dec!(-1_000), dec!(1), dec!(1_000), dec!(20_000)] {
        let fill = engine.fill_price(&market, SignedSize::new(size))?;
        println!("  size {:>8}: fill ${}", size, fill);
    }
    Ok(())
}

/// Orders that grow, shrink, and flip skew.
fn scenario_2_fee_allocation(engine: &FeeEngine) -> Result<(), EngineError> {
    let oracle = oracle(dec!(20));
    let cases = [
        ("long into long skew", dec!(1_000), dec!(500)),
        ("short into long skew", dec!(1_000), dec!(-500)),
        ("short flips long skew", dec!(1_000), dec!(-1_500)),
    ];

    for (label, skew, size) in cases {
        let market = eth_market(skew);
        let fees = engine.quote_order(&market, &oracle, &OrderIntent::market(SignedSize::new(size)))?;
        println!(
            "  {}: notional ${}, fee ${} (taker {}, maker {})",
            label,
            fees.notional.value().round_dp(2),
            fees.order_fee.value().round_dp(4),
            fees.split.taker_ratio.round_dp(4),
            fees.split.maker_ratio.round_dp(4),
        );
    }

    let nil = engine.quote_order(&eth_market(dec!(1_000)), &oracle, &OrderIntent::market(SignedSize::zero()));
    if let Err(e) = nil {
        println!("  nil order rejected: {e}");
    }
    Ok(())
}

/// Same quote settled under different gas conditions.
fn scenario_3_settlement(engine: &FeeEngine) -> Result<(), EngineError> {
    let order = OrderIntent::new(SignedSize::new(dec!(10)), dec!(0.1));
    let fees = engine.quote_order(&eth_market(Decimal::ZERO), &oracle(dec!(20)), &order)?;

    println!("  Quoted 10 ETH long with a 10% keeper buffer");
    for gwei in [dec!(0.05), dec!(5), dec!(50), dec!(5_000)] {
        let keeper_fee = engine.settlement_fee(&fees, Gwei::new(gwei))?;
        println!("  base fee {:>6} gwei: keeper fee ${}", gwei, keeper_fee);
    }
    Ok(())
}

/// Flag and liquidation rewards for a small and a large position.
fn scenario_4_liquidation(engine: &FeeEngine) -> Result<(), EngineError> {
    let oracle = oracle(dec!(30));
    let capacity = engine.config().liquidation.max_liquidation_capacity;
    println!("  Liquidation capacity {} per call", capacity);

    for size in [dec!(8), dec!(450)] {
        let position = PositionSnapshot::new(SignedSize::new(size), Price::new_unchecked(dec!(2000)));
        let flag = engine.flag_reward(&oracle, &position)?;
        let liquidation = engine.liquidation_fee(&oracle, &position)?;
        println!(
            "  size {:>4}: flag ${} (gas ${}, size ${}), liquidation ${} over {} calls",
            size,
            flag.result,
            flag.flag_execution_cost_usd,
            flag.size_reward,
            liquidation.total,
            liquidation.iterations,
        );
    }
    Ok(())
}

/// Deposits of growing size priced against the spot market depth.
fn scenario_5_collateral(engine: &FeeEngine) -> Result<(), EngineError> {
    let eth = Price::new_unchecked(dec!(2000));
    for amount in [dec!(1_000), dec!(100_000), dec!(5_000_000)] {
        let price = engine.discounted_collateral_price(CollateralType::Eth, eth, amount)?;
        println!("  deposit {:>9} ETH: valued at ${}", amount, price);
    }
    Ok(())
}

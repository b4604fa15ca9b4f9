//! Keeper compensation for settling, flagging and liquidating positions.
//!
//! Every keeper fee starts from the same base: the USD cost of the gas the keeper burns.
//! A profit margin is layered on top and the result is bounded by the configured USD
//! limits. Three call sites share that pipeline:
//!
//! - order settlement: single percentage margin plus the trader's buffer, clamped to
//!   `[min, max]`. The gas price is only known at settlement, so the fee is returned as
//!   a [`SettlementKeeperFee`] to be evaluated later.
//! - flag reward: greater of a percentage or a flat USD margin, plus a reward
//!   proportional to the position's notional, capped at `max`.
//! - liquidation: greater-of margin capped at `max` per call, times the number of calls
//!   needed to work through the position.

use crate::config::{GlobalKeeperConfig, MarketLiquidationConfig};
use crate::fees::FeeError;
use crate::market::{OracleReading, PositionSnapshot};
use crate::types::{checked_add, div_ceil, mul_wad, GasUnits, Gwei, MathResult, Price, Quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD cost of `gas_units` at `base_fee_per_gas`.
pub fn calc_transaction_cost_usd(base_fee_per_gas: Gwei, gas_units: GasUnits, eth_price: Price) -> MathResult<Quote> {
    let cost_in_eth = mul_wad(gas_units.as_decimal(), base_fee_per_gas.to_eth())?;
    mul_wad(cost_in_eth, eth_price.value()).map(Quote::new)
}

/// How a keeper's profit is added on top of the raw gas cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProfitMargin {
    /// `cost * (1 + percent + buffer)`
    Percent { percent: Decimal, buffer: Decimal },
    /// `max(cost * (1 + percent), cost + usd)`
    GreaterOf { percent: Decimal, usd: Quote },
}

impl ProfitMargin {
    pub fn apply(&self, cost: Quote) -> MathResult<Quote> {
        match *self {
            ProfitMargin::Percent { percent, buffer } => {
                cost.mul(checked_add(checked_add(Decimal::ONE, percent)?, buffer)?)
            }
            ProfitMargin::GreaterOf { percent, usd } => {
                let by_percent = cost.mul(checked_add(Decimal::ONE, percent)?)?;
                let by_usd = cost.add(usd)?;
                Ok(by_percent.max(by_usd))
            }
        }
    }
}

/// USD limits on a single keeper payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperFeeBounds {
    pub min: Quote,
    pub max: Quote,
}

impl KeeperFeeBounds {
    pub fn new(min: Quote, max: Quote) -> Result<Self, FeeError> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    // an inverted clamp would silently pin every fee to max
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.min.is_negative() || self.min > self.max {
            return Err(FeeError::InvalidKeeperBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Lower bound first, then upper.
    pub fn clamp(&self, fee: Quote) -> Quote {
        fee.max(self.min).min(self.max)
    }

    pub fn cap(&self, fee: Quote) -> Quote {
        fee.min(self.max)
    }
}

/// Gas cost plus margin, before any bound is applied.
pub fn keeper_fee_with_margin(
    gas_units: GasUnits,
    base_fee_per_gas: Gwei,
    eth_price: Price,
    margin: ProfitMargin,
) -> MathResult<Quote> {
    margin.apply(calc_transaction_cost_usd(base_fee_per_gas, gas_units, eth_price)?)
}

/// Gas cost plus margin, clamped to `[bounds.min, bounds.max]`. Settlement goes through here.
pub fn bounded_keeper_fee(
    gas_units: GasUnits,
    base_fee_per_gas: Gwei,
    eth_price: Price,
    margin: ProfitMargin,
    bounds: &KeeperFeeBounds,
) -> Result<Quote, FeeError> {
    bounds.validate()?;
    let fee = keeper_fee_with_margin(gas_units, base_fee_per_gas, eth_price, margin)?;
    Ok(bounds.clamp(fee))
}

/// 4.1: settlement fee for an order, waiting on the settlement block's base fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementKeeperFee {
    gas_units: GasUnits,
    eth_price: Price,
    margin: ProfitMargin,
    bounds: KeeperFeeBounds,
}

impl SettlementKeeperFee {
    pub fn new(config: &GlobalKeeperConfig, eth_price: Price, keeper_fee_buffer: Decimal) -> Result<Self, FeeError> {
        if keeper_fee_buffer < Decimal::ZERO {
            return Err(FeeError::NegativeKeeperFeeBuffer(keeper_fee_buffer));
        }
        Ok(Self {
            gas_units: config.keeper_settlement_gas_units,
            eth_price,
            margin: ProfitMargin::Percent {
                percent: config.keeper_profit_margin_percent,
                buffer: keeper_fee_buffer,
            },
            bounds: config.bounds()?,
        })
    }

    /// Fee owed to the settling keeper given the block's base fee.
    pub fn evaluate(&self, base_fee_per_gas: Gwei) -> Result<Quote, FeeError> {
        bounded_keeper_fee(self.gas_units, base_fee_per_gas, self.eth_price, self.margin, &self.bounds)
    }
}

/// 4.2: breakdown of the reward paid to the keeper that flags a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagReward {
    /// Amount actually paid, capped at the max keeper fee
    pub result: Quote,
    pub flag_execution_cost_usd: Quote,
    pub flag_fee_usd: Quote,
    pub size_reward: Quote,
    pub flag_fee_with_reward_usd: Quote,
}

pub fn calc_flag_reward(
    oracle: &OracleReading,
    position: &PositionSnapshot,
    keeper: &GlobalKeeperConfig,
    liquidation: &MarketLiquidationConfig,
) -> Result<FlagReward, FeeError> {
    check_position(position)?;
    let bounds = keeper.bounds()?;

    let flag_execution_cost_usd =
        calc_transaction_cost_usd(oracle.base_fee_per_gas, keeper.keeper_flag_gas_units, oracle.eth_price_usd)?;
    let flag_fee_usd = keeper.greater_of_margin().apply(flag_execution_cost_usd)?;
    let size_reward = position.notional()?.mul(liquidation.liquidation_reward_percent)?;
    let flag_fee_with_reward_usd = flag_fee_usd.add(size_reward)?;

    Ok(FlagReward {
        result: bounds.cap(flag_fee_with_reward_usd),
        flag_execution_cost_usd,
        flag_fee_usd,
        size_reward,
        flag_fee_with_reward_usd,
    })
}

/// 4.3: liquidation keeper fee, one capped payment per liquidation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidationKeeperFee {
    /// Whole number of calls needed, `ceil(size / capacity)`
    pub iterations: Decimal,
    pub per_iteration: Quote,
    pub total: Quote,
}

impl LiquidationKeeperFee {
    pub fn zero() -> Self {
        Self {
            iterations: Decimal::ZERO,
            per_iteration: Quote::zero(),
            total: Quote::zero(),
        }
    }
}

pub fn calc_liquidation_keeper_fee(
    oracle: &OracleReading,
    position: &PositionSnapshot,
    max_liquidation_capacity: Decimal,
    keeper: &GlobalKeeperConfig,
) -> Result<LiquidationKeeperFee, FeeError> {
    check_position(position)?;
    if position.is_empty() {
        return Ok(LiquidationKeeperFee::zero());
    }
    if max_liquidation_capacity <= Decimal::ZERO {
        return Err(FeeError::ZeroLiquidationCapacity(max_liquidation_capacity));
    }
    let bounds = keeper.bounds()?;

    let iterations = div_ceil(position.size_abs, max_liquidation_capacity)
        .ok_or(FeeError::ZeroLiquidationCapacity(max_liquidation_capacity))?;

    let fee = keeper_fee_with_margin(
        keeper.keeper_liquidation_gas_units,
        oracle.base_fee_per_gas,
        oracle.eth_price_usd,
        keeper.greater_of_margin(),
    )?;
    let per_iteration = bounds.cap(fee);

    Ok(LiquidationKeeperFee {
        iterations,
        per_iteration,
        total: per_iteration.mul(iterations)?,
    })
}

// fields are public, so a hand-built snapshot can carry a negative size
fn check_position(position: &PositionSnapshot) -> Result<(), FeeError> {
    if position.size_abs < Decimal::ZERO {
        return Err(FeeError::NegativePositionSize(position.size_abs));
    }
    Ok(())
}

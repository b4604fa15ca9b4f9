//! Order fee allocation.
//!
//! An order that pushes skew further from zero is a taker and pays the taker rate. One
//! that pulls skew toward zero is a maker. An order that crosses zero is both: the part
//! that unwinds the existing skew is maker flow and the part past zero is taker flow, so
//! its notional is split between the two rates in proportion.

use crate::config::{GlobalKeeperConfig, MarketFeeConfig};
use crate::keeper::SettlementKeeperFee;
use crate::market::{MarketSnapshot, OracleReading, OrderIntent};
use crate::side::is_same_side;
use crate::types::{checked_add, div_wad, mul_wad, MathError, MathResult, Quote, SignedSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    #[error("Nil order: a size delta of 0 has no fee")]
    InvalidOrder,

    #[error("Keeper fee buffer must not be negative, got {0}")]
    NegativeKeeperFeeBuffer(Decimal),

    #[error("Invalid keeper fee bounds: min {min}, max {max}")]
    InvalidKeeperBounds { min: Quote, max: Quote },

    #[error("Invalid collateral discount bounds: min {min}, max {max}")]
    InvalidDiscountBounds { min: Decimal, max: Decimal },

    #[error("Max liquidation capacity must be positive, got {0}")]
    ZeroLiquidationCapacity(Decimal),

    #[error("Spot market skew scale must be positive, got {0}")]
    ZeroSpotSkewScale(Decimal),

    #[error("Position size must not be negative, got {0}")]
    NegativePositionSize(Decimal),

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Share of an order's notional charged at each rate. Always sums to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub taker_ratio: Decimal,
    pub maker_ratio: Decimal,
}

impl FeeSplit {
    pub fn taker() -> Self {
        Self {
            taker_ratio: Decimal::ONE,
            maker_ratio: Decimal::ZERO,
        }
    }

    pub fn maker() -> Self {
        Self {
            taker_ratio: Decimal::ZERO,
            maker_ratio: Decimal::ONE,
        }
    }
}

/// Splits an order between maker and taker flow based on how it moves skew.
///
/// `size_delta` must be non-zero; [`calc_order_fees`] checks this before calling.
pub fn allocate_fee_split(skew_before: SignedSize, size_delta: SignedSize) -> MathResult<FeeSplit> {
    let skew_after = skew_before.add(size_delta)?;

    if is_same_side(skew_after.value(), skew_before.value()) {
        // whole order on one side of zero
        if is_same_side(size_delta.value(), skew_before.value()) {
            Ok(FeeSplit::taker())
        } else {
            Ok(FeeSplit::maker())
        }
    } else {
        // crossed zero: the remainder past zero is taker flow
        let taker_ratio = div_wad(skew_after.value(), size_delta.value())?;
        Ok(FeeSplit {
            taker_ratio,
            maker_ratio: Decimal::ONE - taker_ratio,
        })
    }
}

/// Fee quote for a prospective order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderFees {
    pub fill_price: Decimal,
    pub notional: Quote,
    pub order_fee: Quote,
    pub split: FeeSplit,
    /// Keeper fee for settling the order, pending the settlement block's base fee
    pub settlement_fee: SettlementKeeperFee,
}

pub fn calc_order_fees(
    market: &MarketSnapshot,
    fees: &MarketFeeConfig,
    keeper: &GlobalKeeperConfig,
    oracle: &OracleReading,
    order: &OrderIntent,
) -> Result<OrderFees, FeeError> {
    let size_delta = order.size_delta;
    if size_delta.is_zero() {
        return Err(FeeError::InvalidOrder);
    }

    let fill_price = market.fill_price(size_delta)?;
    let split = allocate_fee_split(market.skew, size_delta)?;

    let notional = mul_wad(size_delta.abs(), fill_price)?;
    let taker_fee = mul_wad(mul_wad(notional, split.taker_ratio)?, fees.taker_fee)?;
    let maker_fee = mul_wad(mul_wad(notional, split.maker_ratio)?, fees.maker_fee)?;

    let settlement_fee = SettlementKeeperFee::new(keeper, oracle.eth_price_usd, order.keeper_fee_buffer)?;

    Ok(OrderFees {
        fill_price,
        notional: Quote::new(notional),
        order_fee: Quote::new(checked_add(taker_fee, maker_fee)?),
        split,
        settlement_fee,
    })
}

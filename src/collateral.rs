// 6.0 collateral.rs: non-cash collateral is valued below its oracle price.
// the haircut grows with deposit size relative to the spot market's depth.

use crate::fees::FeeError;
use crate::types::{div_wad, mul_wad, MathError, Price};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// Supported collateral types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralType {
    Usd,
    Eth,
    Btc,
    Steth,
}

impl CollateralType {
    pub fn symbol(&self) -> &'static str {
        match self {
            CollateralType::Usd => "USD",
            CollateralType::Eth => "ETH",
            CollateralType::Btc => "BTC",
            CollateralType::Steth => "stETH",
        }
    }

    // cash collateral is never discounted
    pub fn is_cash(&self) -> bool {
        matches!(self, CollateralType::Usd)
    }
}

/// 6.1: discount parameters for one collateral type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollateralDiscountConfig {
    // skew scale of the spot market the collateral would be sold into
    pub spot_market_skew_scale: Decimal,
    pub min_discount: Decimal,
    pub max_discount: Decimal,
}

impl CollateralDiscountConfig {
    pub fn validate(&self) -> Result<(), FeeError> {
        validate_discount_bounds(self.min_discount, self.max_discount)?;
        if self.spot_market_skew_scale <= Decimal::ZERO {
            return Err(FeeError::ZeroSpotSkewScale(self.spot_market_skew_scale));
        }
        Ok(())
    }

    pub fn discounted_price(&self, collateral_price: Price, amount: Decimal) -> Result<Decimal, FeeError> {
        calc_discounted_collateral_price(
            collateral_price,
            amount,
            self.spot_market_skew_scale,
            self.min_discount,
            self.max_discount,
        )
    }
}

// a discount above 100% would price collateral below zero
fn validate_discount_bounds(min: Decimal, max: Decimal) -> Result<(), FeeError> {
    if min < Decimal::ZERO || min > max || max > Decimal::ONE {
        return Err(FeeError::InvalidDiscountBounds { min, max });
    }
    Ok(())
}

/// Discount applied to a deposit of `amount`, clamped to `[min, max]`.
pub fn calc_collateral_discount(
    amount: Decimal,
    spot_market_skew_scale: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, FeeError> {
    validate_discount_bounds(min, max)?;
    if spot_market_skew_scale <= Decimal::ZERO {
        return Err(FeeError::ZeroSpotSkewScale(spot_market_skew_scale));
    }

    let denominator = spot_market_skew_scale
        .checked_mul(dec!(2))
        .ok_or(MathError::Overflow("discount denominator"))?;
    let raw = div_wad(amount, denominator)?;
    Ok(raw.max(min).min(max))
}

/// price = oracle_price * (1 - clamp(amount / (skew_scale * 2), min, max))
pub fn calc_discounted_collateral_price(
    collateral_price: Price,
    amount: Decimal,
    spot_market_skew_scale: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, FeeError> {
    let discount = calc_collateral_discount(amount, spot_market_skew_scale, min, max)?;
    Ok(mul_wad(collateral_price.value(), Decimal::ONE - discount)?)
}

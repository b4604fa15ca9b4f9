//! Market, oracle, order and position snapshots.
//!
//! Every calculation takes its inputs as one of these immutable values. The caller
//! builds a fresh snapshot from market state and the oracle for each call and drops it
//! once the result is consumed. Nothing here is validated against staleness: the
//! oracle's numbers are taken as-is.

use crate::pricing::calc_fill_price;
use crate::types::{mul_wad, Gwei, MarketId, MathResult, Price, Quote, SignedSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a market's skew and oracle price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market_id: MarketId,
    /// Net open interest (long minus short)
    pub skew: SignedSize,
    /// Price impact denominator. Zero disables impact.
    pub skew_scale: Decimal,
    /// Oracle price the fill price is derived from
    pub price: Price,
}

impl MarketSnapshot {
    pub fn new(market_id: MarketId, skew: SignedSize, skew_scale: Decimal, price: Price) -> Self {
        Self {
            market_id,
            skew,
            skew_scale,
            price,
        }
    }

    /// Fill price for an order of `size` against this snapshot.
    pub fn fill_price(&self, size: SignedSize) -> MathResult<Decimal> {
        calc_fill_price(self.skew, self.skew_scale, size, self.price)
    }
}

/// Gas and ETH readings supplied by the oracle collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OracleReading {
    pub eth_price_usd: Price,
    pub base_fee_per_gas: Gwei,
}

impl OracleReading {
    pub fn new(eth_price_usd: Price, base_fee_per_gas: Gwei) -> Self {
        Self {
            eth_price_usd,
            base_fee_per_gas,
        }
    }
}

/// A prospective order being quoted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Signed size change. Must be non-zero.
    pub size_delta: SignedSize,
    /// Extra settlement margin on top of the keeper profit margin, as a fraction
    pub keeper_fee_buffer: Decimal,
}

impl OrderIntent {
    pub fn new(size_delta: SignedSize, keeper_fee_buffer: Decimal) -> Self {
        Self {
            size_delta,
            keeper_fee_buffer,
        }
    }

    pub fn market(size_delta: SignedSize) -> Self {
        Self::new(size_delta, Decimal::ZERO)
    }
}

/// Absolute size and price of an open position, as seen by flag and liquidation keepers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub size_abs: Decimal,
    pub price: Price,
}

impl PositionSnapshot {
    pub fn new(size: SignedSize, price: Price) -> Self {
        Self {
            size_abs: size.abs(),
            price,
        }
    }

    pub fn notional(&self) -> MathResult<Quote> {
        mul_wad(self.size_abs, self.price.value()).map(Quote::new)
    }

    pub fn is_empty(&self) -> bool {
        self.size_abs.is_zero()
    }
}

//! Fill price lookups.

use super::core::FeeEngine;
use super::results::EngineError;
use crate::fees::FeeError;
use crate::market::MarketSnapshot;
use crate::types::SignedSize;
use rust_decimal::Decimal;
use tracing::debug;

impl FeeEngine {
    /// Fill price for an order of `size` against the snapshot.
    pub fn fill_price(&self, market: &MarketSnapshot, size: SignedSize) -> Result<Decimal, EngineError> {
        self.check_market(market)?;
        let fill_price = market.fill_price(size).map_err(FeeError::from)?;

        debug!(
            market_id = %market.market_id,
            skew = %market.skew,
            size = %size,
            oracle_price = %market.price,
            fill_price = %fill_price,
            "fill price"
        );

        Ok(fill_price)
    }
}

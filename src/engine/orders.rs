//! Order fee quotes and settlement fees.

use super::core::FeeEngine;
use super::results::EngineError;
use crate::fees::{calc_order_fees, OrderFees};
use crate::market::{MarketSnapshot, OracleReading, OrderIntent};
use crate::types::{Gwei, Quote};
use tracing::debug;

impl FeeEngine {
    /// Quote the trading fee and deferred settlement fee for an order.
    pub fn quote_order(
        &self,
        market: &MarketSnapshot,
        oracle: &OracleReading,
        order: &OrderIntent,
    ) -> Result<OrderFees, EngineError> {
        self.check_market(market)?;

        let fees = calc_order_fees(market, &self.config.fees, &self.config.keeper, oracle, order)?;

        debug!(
            market_id = %market.market_id,
            size_delta = %order.size_delta,
            fill_price = %fees.fill_price,
            notional = %fees.notional,
            order_fee = %fees.order_fee,
            taker_ratio = %fees.split.taker_ratio,
            maker_ratio = %fees.split.maker_ratio,
            "order quoted"
        );

        Ok(fees)
    }

    /// Settle a quoted order's keeper fee once the block's base fee is known.
    pub fn settlement_fee(&self, fees: &OrderFees, base_fee_per_gas: Gwei) -> Result<Quote, EngineError> {
        let keeper_fee = fees.settlement_fee.evaluate(base_fee_per_gas)?;

        debug!(
            market_id = %self.config.market_id,
            base_fee_per_gas = %base_fee_per_gas,
            keeper_fee = %keeper_fee,
            "settlement keeper fee"
        );

        Ok(keeper_fee)
    }
}

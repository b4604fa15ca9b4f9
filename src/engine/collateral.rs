//! Collateral valuation.

use super::core::FeeEngine;
use super::results::EngineError;
use crate::collateral::CollateralType;
use crate::types::Price;
use rust_decimal::Decimal;
use tracing::debug;

impl FeeEngine {
    /// Price a deposit of `amount` units of collateral after the size discount.
    pub fn discounted_collateral_price(
        &self,
        collateral_type: CollateralType,
        collateral_price: Price,
        amount: Decimal,
    ) -> Result<Decimal, EngineError> {
        if collateral_type.is_cash() {
            return Ok(collateral_price.value());
        }

        let discount = self
            .config
            .collateral_discount(collateral_type)
            .ok_or(EngineError::UnsupportedCollateral(collateral_type))?;
        let price = discount.discounted_price(collateral_price, amount)?;

        debug!(
            collateral = collateral_type.symbol(),
            amount = %amount,
            oracle_price = %collateral_price,
            discounted_price = %price,
            "collateral priced"
        );

        Ok(price)
    }
}

//! Flag and liquidation keeper rewards.

use super::core::FeeEngine;
use super::results::EngineError;
use crate::keeper::{calc_flag_reward, calc_liquidation_keeper_fee, FlagReward, LiquidationKeeperFee};
use crate::market::{OracleReading, PositionSnapshot};
use tracing::debug;

impl FeeEngine {
    /// Reward for flagging `position` for liquidation.
    pub fn flag_reward(
        &self,
        oracle: &OracleReading,
        position: &PositionSnapshot,
    ) -> Result<FlagReward, EngineError> {
        let reward = calc_flag_reward(oracle, position, &self.config.keeper, &self.config.liquidation)?;

        debug!(
            market_id = %self.config.market_id,
            size_abs = %position.size_abs,
            execution_cost = %reward.flag_execution_cost_usd,
            size_reward = %reward.size_reward,
            reward = %reward.result,
            "flag reward"
        );

        Ok(reward)
    }

    /// Total keeper fee for liquidating `position` across as many calls as it takes.
    pub fn liquidation_fee(
        &self,
        oracle: &OracleReading,
        position: &PositionSnapshot,
    ) -> Result<LiquidationKeeperFee, EngineError> {
        let fee = calc_liquidation_keeper_fee(
            oracle,
            position,
            self.config.liquidation.max_liquidation_capacity,
            &self.config.keeper,
        )?;

        debug!(
            market_id = %self.config.market_id,
            size_abs = %position.size_abs,
            iterations = %fee.iterations,
            per_iteration = %fee.per_iteration,
            total = %fee.total,
            "liquidation keeper fee"
        );

        Ok(fee)
    }
}

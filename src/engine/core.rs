// 8.0 engine/core.rs: the engine. holds one market's config, nothing else.

use super::results::EngineError;
use crate::config::{Environment, FeeEngineConfig};
use crate::market::MarketSnapshot;
use crate::types::MarketId;
use tracing::info;

/** 8.1: config is validated once here so every quote can trust it */
#[derive(Debug, Clone)]
pub struct FeeEngine {
    pub(super) config: FeeEngineConfig,
}

impl FeeEngine {
    pub fn new(config: FeeEngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        info!(
            market_id = %config.market_id,
            maker_fee = %config.fees.maker_fee,
            taker_fee = %config.fees.taker_fee,
            min_keeper_fee_usd = %config.keeper.min_keeper_fee_usd,
            max_keeper_fee_usd = %config.keeper.max_keeper_fee_usd,
            "fee engine configured"
        );

        Ok(Self { config })
    }

    pub fn for_environment(environment: Environment) -> Result<Self, EngineError> {
        Self::new(environment.config())
    }

    pub fn config(&self) -> &FeeEngineConfig {
        &self.config
    }

    pub fn market_id(&self) -> MarketId {
        self.config.market_id
    }

    pub(super) fn check_market(&self, market: &MarketSnapshot) -> Result<(), EngineError> {
        if market.market_id != self.config.market_id {
            return Err(EngineError::MarketMismatch {
                expected: self.config.market_id,
                actual: market.market_id,
            });
        }
        Ok(())
    }
}

// 8.0.2: errors for engine operations.

use crate::collateral::CollateralType;
use crate::config::ConfigError;
use crate::fees::FeeError;
use crate::types::MarketId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Snapshot is for market {actual}, engine quotes market {expected}")]
    MarketMismatch { expected: MarketId, actual: MarketId },

    #[error("Collateral {} is not accepted", .0.symbol())]
    UnsupportedCollateral(CollateralType),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),
}

// 7.0 config.rs: all settings in one place. fee rates, keeper gas and bounds, liquidation
// capacity, collateral discounts. owned by the caller and passed in by value.
// 7.1 FeeEngineConfig bundles them, validates, and ships presets per environment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::collateral::{CollateralDiscountConfig, CollateralType};
use crate::fees::FeeError;
use crate::keeper::{KeeperFeeBounds, ProfitMargin};
use crate::types::{GasUnits, MarketId, Quote};

/** 7.2: per market fee rates as fractions. 0.0006 = 6 bps */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketFeeConfig {
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
}

impl Default for MarketFeeConfig {
    fn default() -> Self {
        Self {
            maker_fee: dec!(0.0002), // 2 bps
            taker_fee: dec!(0.0006), // 6 bps
        }
    }
}

// 7.3: keeper gas and compensation limits shared by every market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalKeeperConfig {
    pub keeper_settlement_gas_units: GasUnits,
    pub keeper_flag_gas_units: GasUnits,
    pub keeper_liquidation_gas_units: GasUnits,
    pub keeper_profit_margin_percent: Decimal,
    pub keeper_profit_margin_usd: Quote,
    pub min_keeper_fee_usd: Quote,
    pub max_keeper_fee_usd: Quote,
}

impl Default for GlobalKeeperConfig {
    fn default() -> Self {
        Self {
            keeper_settlement_gas_units: GasUnits(500_000),
            keeper_flag_gas_units: GasUnits(700_000),
            keeper_liquidation_gas_units: GasUnits(900_000),
            keeper_profit_margin_percent: dec!(0.3),
            keeper_profit_margin_usd: Quote::new(dec!(5)),
            min_keeper_fee_usd: Quote::new(dec!(5)),
            max_keeper_fee_usd: Quote::new(dec!(500)),
        }
    }
}

impl GlobalKeeperConfig {
    pub fn bounds(&self) -> Result<KeeperFeeBounds, FeeError> {
        KeeperFeeBounds::new(self.min_keeper_fee_usd, self.max_keeper_fee_usd)
    }

    // flag and liquidation keepers get whichever margin pays more
    pub fn greater_of_margin(&self) -> ProfitMargin {
        ProfitMargin::GreaterOf {
            percent: self.keeper_profit_margin_percent,
            usd: self.keeper_profit_margin_usd,
        }
    }
}

// 7.4: per market liquidation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketLiquidationConfig {
    // share of notional paid to the flagging keeper
    pub liquidation_reward_percent: Decimal,
    // size one liquidation call can absorb
    pub max_liquidation_capacity: Decimal,
}

impl Default for MarketLiquidationConfig {
    fn default() -> Self {
        Self {
            liquidation_reward_percent: dec!(0.0001), // 1 bp
            max_liquidation_capacity: dec!(100),
        }
    }
}

// The complete fee engine configuration for one market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEngineConfig {
    pub market_id: MarketId,
    pub fees: MarketFeeConfig,
    pub keeper: GlobalKeeperConfig,
    pub liquidation: MarketLiquidationConfig,
    // non-cash collateral accepted as margin and how it is discounted
    pub collateral_discounts: HashMap<CollateralType, CollateralDiscountConfig>,
}

impl Default for FeeEngineConfig {
    fn default() -> Self {
        let mut collateral_discounts = HashMap::new();
        collateral_discounts.insert(
            CollateralType::Eth,
            CollateralDiscountConfig {
                spot_market_skew_scale: dec!(1_000_000),
                min_discount: dec!(0.01),
                max_discount: dec!(0.1),
            },
        );
        collateral_discounts.insert(
            CollateralType::Btc,
            CollateralDiscountConfig {
                spot_market_skew_scale: dec!(50_000),
                min_discount: dec!(0.01),
                max_discount: dec!(0.1),
            },
        );
        collateral_discounts.insert(
            CollateralType::Steth,
            CollateralDiscountConfig {
                spot_market_skew_scale: dec!(500_000),
                min_discount: dec!(0.02),
                max_discount: dec!(0.15),
            },
        );

        Self {
            market_id: MarketId(1),
            fees: MarketFeeConfig::default(),
            keeper: GlobalKeeperConfig::default(),
            liquidation: MarketLiquidationConfig::default(),
            collateral_discounts,
        }
    }
}

impl FeeEngineConfig {
    // Create a configuration preset for testnet
    pub fn testnet() -> Self {
        let mut config = Self::default();
        config.fees.maker_fee = Decimal::ZERO; // free makers on testnet
        config.fees.taker_fee = dec!(0.0001);
        config.keeper.min_keeper_fee_usd = Quote::new(dec!(1));
        config.keeper.max_keeper_fee_usd = Quote::new(dec!(50));
        config
    }

    // Create a configuration preset for mainnet with conservative settings
    pub fn mainnet_conservative() -> Self {
        let mut config = Self::default();
        config.fees.taker_fee = dec!(0.001); // 10 bps
        config.keeper.keeper_profit_margin_percent = dec!(0.5);
        config.keeper.keeper_profit_margin_usd = Quote::new(dec!(10));
        config.keeper.max_keeper_fee_usd = Quote::new(dec!(1000));
        config.liquidation.max_liquidation_capacity = dec!(50);
        config
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        // fee checks
        if self.fees.maker_fee < Decimal::ZERO || self.fees.taker_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidFees {
                reason: "Fee rates must not be negative".to_string(),
            });
        }
        if self.fees.taker_fee > dec!(0.01) || self.fees.maker_fee > dec!(0.01) {
            return Err(ConfigError::InvalidFees {
                reason: "Fee rate too high (>1%)".to_string(),
            });
        }

        // keeper checks
        self.keeper.bounds().map_err(|e| ConfigError::InvalidKeeper {
            reason: e.to_string(),
        })?;
        if self.keeper.keeper_profit_margin_percent < Decimal::ZERO
            || self.keeper.keeper_profit_margin_usd.is_negative()
        {
            return Err(ConfigError::InvalidKeeper {
                reason: "Profit margins must not be negative".to_string(),
            });
        }

        // liquidation checks
        if self.liquidation.max_liquidation_capacity <= Decimal::ZERO {
            return Err(ConfigError::InvalidLiquidation {
                reason: "Max liquidation capacity must be positive".to_string(),
            });
        }
        if self.liquidation.liquidation_reward_percent < Decimal::ZERO
            || self.liquidation.liquidation_reward_percent > Decimal::ONE
        {
            return Err(ConfigError::InvalidLiquidation {
                reason: "Liquidation reward must be between 0 and 1".to_string(),
            });
        }

        // collateral checks
        for (collateral_type, discount) in &self.collateral_discounts {
            if collateral_type.is_cash() {
                return Err(ConfigError::InvalidCollateral {
                    reason: "Cash collateral is never discounted".to_string(),
                });
            }
            discount.validate().map_err(|e| ConfigError::InvalidCollateral {
                reason: format!("{}: {}", collateral_type.symbol(), e),
            })?;
        }

        Ok(())
    }

    pub fn collateral_discount(&self, collateral_type: CollateralType) -> Option<&CollateralDiscountConfig> {
        self.collateral_discounts.get(&collateral_type)
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid fees: {reason}")]
    InvalidFees { reason: String },
    #[error("Invalid keeper config: {reason}")]
    InvalidKeeper { reason: String },
    #[error("Invalid liquidation config: {reason}")]
    InvalidLiquidation { reason: String },
    #[error("Invalid collateral config: {reason}")]
    InvalidCollateral { reason: String },
}

// Environment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Testnet,
    Mainnet,
}

impl Environment {
    pub fn config(&self) -> FeeEngineConfig {
        match self {
            Environment::Development => FeeEngineConfig::default(),
            Environment::Testnet => FeeEngineConfig::testnet(),
            Environment::Mainnet => FeeEngineConfig::mainnet_conservative(),
        }
    }
}

// perps-fees: perpetual futures pricing and fee engine.
// every calculation that moves money on a trade or liquidation lives here.
// all computation is deterministic 18 decimal fixed point with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: wad helpers, SignedSize, Price, Quote, Gwei, GasUnits
//   2.x  side.rs: same-side check, zero agrees with anything
//   3.x  pricing.rs: skew based fill price, pnl
//   4.x  keeper.rs: gas cost, profit margins, bounded keeper fees
//   5.x  fees.rs: maker/taker split, order fee quote, FeeError
//   6.x  collateral.rs: size based collateral discount
//   7.x  config.rs: fee rates, keeper config, presets, validation
//   8.x  engine/: FeeEngine facade over a validated config
//   12.x market.rs: market, oracle, order and position snapshots

// core calculation modules
pub mod collateral;
pub mod fees;
pub mod keeper;
pub mod pricing;
pub mod side;
pub mod types;

// inputs and composition
pub mod config;
pub mod engine;
pub mod market;

// re exports for convenience
pub use collateral::*;
pub use config::*;
pub use engine::*;
pub use fees::*;
pub use keeper::*;
pub use market::*;
pub use pricing::*;
pub use side::*;
pub use types::*;

// 8.0: fee engine facade. holds one market's validated config and composes the pure
// pricing, fee, keeper and collateral functions over caller supplied snapshots.
// stateless and deterministic with no external I/O. quotes are traced at debug level.

mod collateral;
mod core;
mod liquidations;
mod orders;
mod pricing;
mod results;

pub use core::FeeEngine;
pub use results::EngineError;

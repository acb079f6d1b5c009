//! The scoring core: pure, stateless risk and recommendation rules.
//!
//! - `tier`: probability of default -> risk tier + label
//! - `loan`: loan ceiling and monthly installment
//! - `allocation`: allocation normalization and rebalancing
//! - `alerts`: concentration severity and liquidity status
//! - `explain`: ranking of factor contributions
//!
//! Nothing here logs above `debug`, performs I/O, or keeps state; identical
//! inputs always produce identical outputs.

pub mod alerts;
pub mod allocation;
pub mod explain;
pub mod loan;
pub mod tier;

pub use alerts::*;
pub use allocation::*;
pub use explain::*;
pub use loan::*;
pub use tier::*;

pub mod error;
pub mod strategies;
pub mod sweep;
pub mod types;

#[cfg(feature = "validation")]
pub mod validation;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::PayoffError;
pub use strategies::{
    BreakEven, PayoffProfile, PayoffRow, PayoffTable, Strategy, StrategyKind, StrategyParameters,
};
pub use sweep::{PriceSweep, SweepRange};
pub use types::*;

/// Standard result type for all payoff operations
pub type PayoffResult<T> = Result<T, PayoffError>;

pub mod error;
pub mod types;

#[cfg(feature = "valuation")]
pub mod validator;

#[cfg(feature = "valuation")]
pub mod valuation;

pub use error::BondCalcError;
pub use types::*;

/// Standard result type for all bond-calc operations
pub type BondCalcResult<T> = Result<T, BondCalcError>;

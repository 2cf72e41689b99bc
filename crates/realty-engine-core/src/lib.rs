pub mod error;
pub mod numeric;
pub mod policy;
pub mod types;

#[cfg(feature = "underwriting")]
pub mod underwriting;

#[cfg(any(feature = "capital_stack", feature = "waterfall"))]
pub mod equity;

#[cfg(feature = "deal")]
pub mod deal;

pub use error::RealtyError;
pub use numeric::{to_number, RawValue};
pub use policy::EnginePolicy;
pub use types::*;

/// Standard result type for all realty-engine operations
pub type RealtyResult<T> = Result<T, RealtyError>;

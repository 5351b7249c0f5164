//! hs-core: shared foundation for the HVAC topology synthesizer.
//!
//! Arena handles, the common error type, argument checks and the
//! imperial/SI conversions design data is published in.

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{HsError, HsResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;

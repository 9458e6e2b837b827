//! gf-core: stable foundation for geoflow.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real + argument guards + clipping)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GfError, GfResult};
pub use numeric::*;
pub use units::*;

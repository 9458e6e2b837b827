//! gf-plant: single-flash surface plant downstream of the wellhead.
//!
//! - [`SeparatorSweep`]: flash the wellhead enthalpy across a range of
//!   separator pressures and report steam yield, turbine power and specific
//!   steam consumption per pressure (rayon-parallel).
//! - [`PowerSweep`]: turbine power across total mass flow at one separator
//!   pressure.
//! - [`Condenser`]: cooling-tower or fixed back-pressure.

pub mod condenser;
pub mod error;
pub mod power;
pub mod separator;
pub mod sweep;
pub mod turbine;

pub use condenser::Condenser;
pub use error::{PlantError, PlantResult};
pub use power::{PowerReport, PowerSample, PowerSweep, SteamFraction};
pub use separator::{SeparatorPoint, SeparatorReport, SeparatorSample, SeparatorSweep};
pub use sweep::{SweepRange, SweepSpacing};
pub use turbine::{
    DEFAULT_EJECTOR_FRACTION, SteamTurbine, TurbineExhaust, specific_steam_consumption,
};

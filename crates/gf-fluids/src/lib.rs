//! gf-fluids: thermodynamic property lookups for geoflow.
//!
//! Provides:
//! - Working-fluid definitions (water)
//! - State specifications (two independent properties) and property targets
//! - `PropertyOracle` trait for fallible property lookups
//! - CoolProp backend for real fluid properties
//! - Tabulated saturated-water backend for offline runs
//! - The isoenthalpic flash-quality closure shared by wellbore and separator
//!
//! # Architecture
//!
//! The `PropertyOracle` trait isolates the rest of geoflow from backend
//! dependencies. CoolProp (via `rfluids`) is the reference backend; the steam
//! table backend needs no native library and is what most tests run against.
//!
//! # Example
//!
//! ```no_run
//! use gf_fluids::{CoolPropOracle, PropertyOracle, SaturatedPhase, Species};
//! use gf_core::units::bar;
//!
//! let oracle = CoolPropOracle::new();
//! let liquid = oracle
//!     .saturated(bar(10.0), SaturatedPhase::Liquid, Species::Water)
//!     .unwrap();
//! println!("h_f at 10 bar: {} J/kg", liquid.h);
//! ```

pub mod coolprop;
pub mod error;
pub mod flash;
pub mod oracle;
pub mod species;
pub mod state;
pub mod steam_table;

// Re-exports for ergonomics
pub use coolprop::CoolPropOracle;
pub use error::{FluidError, FluidResult};
pub use flash::{FlashQuality, isoenthalpic_quality};
pub use oracle::{OracleKind, PropertyOracle};
pub use species::Species;
pub use state::{PhaseProperties, Property, SaturatedPhase, StateInput};
pub use steam_table::SteamTableOracle;

pub use gf_core::units::SpecEnthalpy;

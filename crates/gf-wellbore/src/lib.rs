//! gf-wellbore: depth-marching two-phase flow in a geothermal well.
//!
//! Reservoir fluid rises isoenthalpically from bottomhole to wellhead. The
//! [`MarchingIntegrator`] walks a [`DepthGrid`] node by node, predicting
//! pressure with a [`PressureModel`], resolving phase equilibrium through a
//! [`gf_fluids::PropertyOracle`], and closing the two-phase mixture with a
//! drift-flux void fraction. The [`FlashDetector`] marks where boiling starts.
//!
//! # Example
//!
//! ```no_run
//! use gf_core::units::m;
//! use gf_fluids::SteamTableOracle;
//! use gf_wellbore::{DepthGrid, MarchConfig, march};
//!
//! let oracle = SteamTableOracle::new();
//! let grid = DepthGrid::from_count(m(2500.0), 100).unwrap();
//! let profile = march(&oracle, MarchConfig::default(), &grid).unwrap();
//! if let Some(event) = profile.flash_event() {
//!     println!("flashing starts at {:.0} m", event.depth.value);
//! }
//! ```

pub mod closure;
pub mod detector;
pub mod error;
pub mod grid;
pub mod march;
pub mod pressure;
pub mod profile;
pub mod state;

pub use closure::{DEFAULT_SLIP, DriftFlux, Mixture};
pub use detector::{FlashDetector, FlashEvent};
pub use error::{WellboreError, WellboreResult};
pub use grid::DepthGrid;
pub use march::{MarchCarry, MarchConfig, MarchingIntegrator, Reservoir, march};
pub use pressure::{DEFAULT_ATTENUATION, PressureModel};
pub use profile::{MarchDiagnostics, ResultProfile, WellheadHandoff};
pub use state::{FaultKind, FlashState, NodeFault, ProfileNode, Regime, UndefinedNode};

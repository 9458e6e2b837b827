//! Depth-marching integrator.
//!
//! The march walks the grid from the reservoir node to the wellhead as a fold
//! over a [`MarchCarry`]: each step predicts the node pressure from the carry,
//! resolves the phase state at the fixed reservoir enthalpy, and hands the new
//! pressure and slip density to the next step.
//!
//! ```text
//! node 0   P_res, T_res, liquid          h_res = h(P_res, T_res)
//! node i   P = max(model(P_prev, ρ_m,prev, dz), floor)
//!          P > P_sat(T_res)  -> liquid at (P, T_res)
//!          otherwise         -> flash h_res between h_f(P) and h_g(P)
//! ```
//!
//! A failed property lookup leaves the node undefined and the carry untouched;
//! the march always yields one entry per grid node.

use crate::closure::{DEFAULT_SLIP, DriftFlux};
use crate::detector::FlashDetector;
use crate::error::{WellboreError, WellboreResult};
use crate::grid::DepthGrid;
use crate::pressure::PressureModel;
use crate::profile::{MarchDiagnostics, ResultProfile};
use crate::state::{FlashState, NodeFault, ProfileNode, Regime, UndefinedNode};
use gf_core::units::constants::pressure_floor;
use gf_core::units::{
    Density, Length, Pressure, SpecEnthalpy, Temperature, bar, degc, kg_m3, pa_s,
};
use gf_fluids::{
    FluidError, FluidResult, PropertyOracle, SaturatedPhase, Species, isoenthalpic_quality,
};
use tracing::{debug, info, warn};

/// Reservoir boundary condition at the bottom of the well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservoir {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub species: Species,
}

impl Default for Reservoir {
    fn default() -> Self {
        Self {
            pressure: bar(45.0),
            temperature: degc(250.0),
            species: Species::Water,
        }
    }
}

/// Parameters of one march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchConfig {
    pub reservoir: Reservoir,
    pub pressure_model: PressureModel,
    /// Drift-flux distribution parameter C0.
    pub slip: f64,
    /// Lowest pressure any node may take.
    pub floor: Pressure,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            reservoir: Reservoir::default(),
            pressure_model: PressureModel::default(),
            slip: DEFAULT_SLIP,
            floor: pressure_floor(),
        }
    }
}

impl MarchConfig {
    pub fn validate(&self) -> WellboreResult<()> {
        let r = &self.reservoir;
        if !r.pressure.value.is_finite() || r.pressure.value <= 0.0 {
            return Err(WellboreError::InvalidArg {
                what: "reservoir pressure must be positive and finite",
            });
        }
        if !r.temperature.value.is_finite() || r.temperature.value <= 0.0 {
            return Err(WellboreError::InvalidArg {
                what: "reservoir temperature must be positive and finite",
            });
        }
        if !self.slip.is_finite() || self.slip <= 0.0 {
            return Err(WellboreError::InvalidArg {
                what: "slip parameter must be positive and finite",
            });
        }
        if !self.floor.value.is_finite() || self.floor.value <= 0.0 {
            return Err(WellboreError::InvalidArg {
                what: "pressure floor must be positive and finite",
            });
        }
        if r.pressure.value < self.floor.value {
            return Err(WellboreError::InvalidArg {
                what: "reservoir pressure is below the pressure floor",
            });
        }
        self.pressure_model.validate()
    }
}

/// State carried from one node to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchCarry {
    pub pressure: Pressure,
    /// Slip mixture density of the last defined node.
    pub mixture_density: Density,
}

/// Reservoir quantities fixed for the whole march.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    enthalpy: SpecEnthalpy,
    temperature: Temperature,
    saturation_pressure: Pressure,
    species: Species,
}

/// A resolved node plus what the closure had to recover from.
struct NodeSolution {
    state: FlashState,
    degenerate: bool,
}

/// Marches a [`DepthGrid`] against a property oracle.
pub struct MarchingIntegrator<'a, O: PropertyOracle + ?Sized> {
    oracle: &'a O,
    config: MarchConfig,
    closure: DriftFlux,
}

impl<'a, O: PropertyOracle + ?Sized> MarchingIntegrator<'a, O> {
    pub fn new(oracle: &'a O, config: MarchConfig) -> WellboreResult<Self> {
        config.validate()?;
        if !oracle.supports(config.reservoir.species) {
            return Err(WellboreError::InvalidArg {
                what: "oracle does not support the working fluid",
            });
        }
        Ok(Self {
            oracle,
            config,
            closure: DriftFlux::new(config.slip),
        })
    }

    pub fn config(&self) -> &MarchConfig {
        &self.config
    }

    /// March the whole grid.
    pub fn run(&self, grid: &DepthGrid) -> WellboreResult<ResultProfile> {
        let (anchor, reservoir_node, seed) = self.seed(grid)?;

        let mut detector = FlashDetector::new();
        let mut diagnostics = MarchDiagnostics::default();
        let mut nodes = Vec::with_capacity(grid.len());
        nodes.push(ProfileNode::Resolved(reservoir_node));

        (1..grid.len()).fold(seed, |carry, i| {
            let (next, node) = self.advance(&anchor, carry, grid, i, &mut diagnostics);
            if let ProfileNode::Resolved(state) = &node {
                if let Some(event) = detector.observe(state.index, state.depth, state.regime) {
                    debug!(
                        index = event.index,
                        depth_m = event.depth.value,
                        "flash onset"
                    );
                }
            }
            nodes.push(node);
            next
        });

        let flash_event = detector.event();
        info!(
            nodes = nodes.len(),
            model = self.config.pressure_model.label(),
            flash_depth_m = flash_event.map(|e| e.depth.value),
            floor_clamps = diagnostics.floor_clamps,
            degenerate = diagnostics.degenerate_saturation,
            undefined = diagnostics.lookup_failures,
            "march complete"
        );

        Ok(ResultProfile::new(
            nodes,
            flash_event,
            diagnostics,
            anchor.enthalpy,
        ))
    }

    /// Resolve the reservoir node. Any failure here is fatal.
    fn seed(&self, grid: &DepthGrid) -> WellboreResult<(Anchor, FlashState, MarchCarry)> {
        let r = self.config.reservoir;
        let reservoir_err = |source: FluidError| WellboreError::Reservoir { source };

        let saturation_pressure = self
            .oracle
            .saturation_pressure(r.temperature, r.species)
            .map_err(reservoir_err)?;
        if r.pressure.value < saturation_pressure.value {
            return Err(WellboreError::InvalidArg {
                what: "reservoir must be compressed liquid (pressure above saturation)",
            });
        }

        let props = self
            .oracle
            .single_phase(r.pressure, r.temperature, r.species)
            .map_err(reservoir_err)?;

        let anchor = Anchor {
            enthalpy: props.h,
            temperature: r.temperature,
            saturation_pressure,
            species: r.species,
        };
        let state = FlashState {
            index: 0,
            depth: grid.total_depth(),
            pressure: r.pressure,
            temperature: r.temperature,
            enthalpy: props.h,
            enthalpy_gain: 0.0,
            quality: 0.0,
            void_fraction: 0.0,
            mixture_density: props.rho,
            homogeneous_density: props.rho,
            mixture_viscosity: props.mu,
            regime: Regime::Liquid,
        };
        let carry = MarchCarry {
            pressure: r.pressure,
            mixture_density: props.rho,
        };
        Ok((anchor, state, carry))
    }

    /// One fold step: predict, clamp, resolve.
    fn advance(
        &self,
        anchor: &Anchor,
        carry: MarchCarry,
        grid: &DepthGrid,
        index: usize,
        diagnostics: &mut MarchDiagnostics,
    ) -> (MarchCarry, ProfileNode) {
        let depth = grid.depth(index);
        let trial = self.config.pressure_model.trial_pressure(
            carry.pressure,
            carry.mixture_density,
            grid.spacing(index),
        );

        let floor = self.config.floor;
        let pressure = if trial.value >= floor.value {
            trial
        } else {
            diagnostics.floor_clamps += 1;
            debug!(index, trial_pa = trial.value, "pressure clamped to floor");
            floor
        };

        match self.resolve(anchor, index, depth, pressure) {
            Ok(solution) => {
                if solution.degenerate {
                    diagnostics.degenerate_saturation += 1;
                    debug!(index, pressure_pa = pressure.value, "degenerate saturation, quality set to 0");
                }
                let next = MarchCarry {
                    pressure,
                    mixture_density: solution.state.mixture_density,
                };
                (next, ProfileNode::Resolved(solution.state))
            }
            Err(err) => {
                diagnostics.lookup_failures += 1;
                warn!(
                    index,
                    depth_m = depth.value,
                    pressure_pa = pressure.value,
                    error = %err,
                    "property lookup failed, node left undefined"
                );
                let node = ProfileNode::Undefined(UndefinedNode {
                    index,
                    depth,
                    pressure: carry.pressure,
                    fault: NodeFault::lookup(err.to_string()),
                });
                (carry, node)
            }
        }
    }

    fn resolve(
        &self,
        anchor: &Anchor,
        index: usize,
        depth: Length,
        pressure: Pressure,
    ) -> FluidResult<NodeSolution> {
        if pressure.value > anchor.saturation_pressure.value {
            return self.resolve_liquid(anchor, index, depth, pressure);
        }

        let liquid = self
            .oracle
            .saturated(pressure, SaturatedPhase::Liquid, anchor.species)?;
        let vapor = self
            .oracle
            .saturated(pressure, SaturatedPhase::Vapor, anchor.species)?;
        let temperature = self.oracle.saturation_temperature(pressure, anchor.species)?;

        let flash = isoenthalpic_quality(anchor.enthalpy, liquid.h, vapor.h);
        let x = flash.quality;
        let mix = self.closure.mix(x, &liquid, &vapor);
        let closure_enthalpy = liquid.h + x * (vapor.h - liquid.h);

        let state = FlashState {
            index,
            depth,
            pressure,
            temperature,
            enthalpy: anchor.enthalpy,
            enthalpy_gain: closure_enthalpy - anchor.enthalpy,
            quality: x,
            void_fraction: mix.void_fraction,
            mixture_density: kg_m3(mix.slip_density),
            homogeneous_density: kg_m3(mix.homogeneous_density),
            mixture_viscosity: pa_s(mix.viscosity),
            regime: if flash.is_two_phase() {
                Regime::TwoPhase
            } else {
                Regime::Liquid
            },
        };
        Ok(NodeSolution {
            state,
            degenerate: flash.degenerate,
        })
    }

    fn resolve_liquid(
        &self,
        anchor: &Anchor,
        index: usize,
        depth: Length,
        pressure: Pressure,
    ) -> FluidResult<NodeSolution> {
        let props = self
            .oracle
            .single_phase(pressure, anchor.temperature, anchor.species)?;
        let state = FlashState {
            index,
            depth,
            pressure,
            temperature: anchor.temperature,
            enthalpy: anchor.enthalpy,
            enthalpy_gain: props.h - anchor.enthalpy,
            quality: 0.0,
            void_fraction: 0.0,
            mixture_density: props.rho,
            homogeneous_density: props.rho,
            mixture_viscosity: props.mu,
            regime: Regime::Liquid,
        };
        Ok(NodeSolution {
            state,
            degenerate: false,
        })
    }
}

/// Build an integrator and march `grid` in one call.
pub fn march<O: PropertyOracle + ?Sized>(
    oracle: &O,
    config: MarchConfig,
    grid: &DepthGrid,
) -> WellboreResult<ResultProfile> {
    MarchingIntegrator::new(oracle, config)?.run(grid)
}

//! Property oracle trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use crate::state::{PhaseProperties, Property, SaturatedPhase, StateInput};
use gf_core::units::{Pressure, SpecEnthalpy, Temperature, kg_m3, k, pa, pa_s};
use std::fmt;
use std::str::FromStr;

/// Trait for thermodynamic property oracles.
///
/// An oracle resolves a state from two independent variables and returns one
/// requested property. Every lookup is fallible: states outside the backend's
/// valid domain (supercritical, superheated in a liquid-only table,
/// inconsistent pairs) return a [`FluidError`].
///
/// Implementations must be thread-safe (Send + Sync) so sweeps can evaluate
/// samples in parallel.
pub trait PropertyOracle: Send + Sync {
    /// Get the oracle name (for debugging/logging).
    fn name(&self) -> &str;

    /// Check if this oracle can resolve states of the given fluid.
    fn supports(&self, species: Species) -> bool;

    /// Resolve `input` and return `target` in SI units.
    fn property(&self, target: Property, input: StateInput, species: Species) -> FluidResult<f64>;

    /// Specific enthalpy [J/kg] at (P, T).
    fn enthalpy_pt(&self, p: Pressure, t: Temperature, species: Species) -> FluidResult<SpecEnthalpy> {
        let h = self.property(Property::Enthalpy, StateInput::PT { p, t }, species)?;
        validation::validate_enthalpy(h)?;
        Ok(h)
    }

    /// Saturation pressure at temperature `t`.
    fn saturation_pressure(&self, t: Temperature, species: Species) -> FluidResult<Pressure> {
        let p = self.property(Property::Pressure, StateInput::TQ { t, q: 0.0 }, species)?;
        let p = pa(p);
        validation::validate_pressure(p)?;
        Ok(p)
    }

    /// Saturation temperature at pressure `p`.
    fn saturation_temperature(&self, p: Pressure, species: Species) -> FluidResult<Temperature> {
        let t = self.property(Property::Temperature, StateInput::PQ { p, q: 0.0 }, species)?;
        let t = k(t);
        validation::validate_temperature(t)?;
        Ok(t)
    }

    /// Enthalpy, density and viscosity on one saturation line at pressure `p`.
    fn saturated(
        &self,
        p: Pressure,
        phase: SaturatedPhase,
        species: Species,
    ) -> FluidResult<PhaseProperties> {
        let input = StateInput::PQ {
            p,
            q: phase.quality(),
        };
        self.phase_properties(input, species)
    }

    /// Enthalpy, density and viscosity of single-phase fluid at (P, T).
    fn single_phase(&self, p: Pressure, t: Temperature, species: Species) -> FluidResult<PhaseProperties> {
        self.phase_properties(StateInput::PT { p, t }, species)
    }

    /// Batch the three per-phase lookups for one state.
    ///
    /// Default implementation issues one `property` call per value; backends
    /// that can resolve the state once should override it.
    fn phase_properties(&self, input: StateInput, species: Species) -> FluidResult<PhaseProperties> {
        let h = self.property(Property::Enthalpy, input, species)?;
        let rho = self.property(Property::Density, input, species)?;
        let mu = self.property(Property::Viscosity, input, species)?;
        validation::validate_phase(h, rho, mu)
    }
}

impl<O: PropertyOracle + ?Sized> PropertyOracle for &O {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, species: Species) -> bool {
        (**self).supports(species)
    }

    fn property(&self, target: Property, input: StateInput, species: Species) -> FluidResult<f64> {
        (**self).property(target, input, species)
    }

    fn phase_properties(&self, input: StateInput, species: Species) -> FluidResult<PhaseProperties> {
        (**self).phase_properties(input, species)
    }
}

/// Available oracle backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleKind {
    /// CoolProp through rfluids (reference equation of state).
    #[default]
    CoolProp,
    /// Tabulated saturated-water properties, no native library needed.
    SteamTable,
}

impl OracleKind {
    /// Instantiate the backend.
    pub fn build(self) -> Box<dyn PropertyOracle> {
        match self {
            Self::CoolProp => Box::new(crate::CoolPropOracle::new()),
            Self::SteamTable => Box::new(crate::SteamTableOracle::new()),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::CoolProp => "coolprop",
            Self::SteamTable => "steam-table",
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OracleKind {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coolprop" => Ok(Self::CoolProp),
            "steam-table" | "steam_table" | "table" => Ok(Self::SteamTable),
            _ => Err(FluidError::InvalidArg {
                what: "unknown oracle backend (expected coolprop or steam-table)",
            }),
        }
    }
}

/// Validation helpers for looked-up properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure quality is a mass fraction.
    pub fn validate_quality(q: f64) -> FluidResult<()> {
        if !q.is_finite() || !(0.0..=1.0).contains(&q) {
            return Err(FluidError::InvalidArg {
                what: "quality must lie in [0, 1]",
            });
        }
        Ok(())
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<()> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(())
    }

    /// Ensure a density or viscosity value is positive and finite.
    pub fn validate_positive(v: f64, what: &'static str) -> FluidResult<()> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }

    /// Validate the inputs of a state specification.
    pub fn validate_input(input: &StateInput) -> FluidResult<()> {
        match *input {
            StateInput::PT { p, t } => {
                validate_pressure(p)?;
                validate_temperature(t)
            }
            StateInput::PQ { p, q } => {
                validate_pressure(p)?;
                validate_quality(q)
            }
            StateInput::TQ { t, q } => {
                validate_temperature(t)?;
                validate_quality(q)
            }
            StateInput::PH { p, h } => {
                validate_pressure(p)?;
                validate_enthalpy(h)
            }
        }
    }

    /// Validate a looked-up value against the physical range of its property.
    pub fn validate_output(target: Property, v: f64) -> FluidResult<f64> {
        match target {
            Property::Pressure => validate_positive(v, "pressure must be positive and finite")?,
            Property::Temperature => {
                validate_positive(v, "temperature must be positive and finite")?
            }
            Property::Enthalpy => validate_enthalpy(v)?,
            Property::Density => validate_positive(v, "density must be positive and finite")?,
            Property::Viscosity => validate_positive(v, "viscosity must be positive and finite")?,
            Property::Quality => {
                if !v.is_finite() {
                    return Err(FluidError::NonPhysical {
                        what: "quality must be finite",
                    });
                }
            }
        }
        Ok(v)
    }

    /// Validate and assemble a phase property pack.
    pub fn validate_phase(h: f64, rho: f64, mu: f64) -> FluidResult<PhaseProperties> {
        validate_enthalpy(h)?;
        validate_positive(rho, "density must be positive and finite")?;
        validate_positive(mu, "viscosity must be positive and finite")?;
        Ok(PhaseProperties::new(h, kg_m3(rho), pa_s(mu)))
    }
}

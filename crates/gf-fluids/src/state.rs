//! State specifications and property targets.

use gf_core::units::{Density, DynVisc, Pressure, SpecEnthalpy, Temperature};
use std::fmt;

/// Property requested from an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Absolute pressure [Pa]
    Pressure,
    /// Temperature [K]
    Temperature,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Density [kg/m³]
    Density,
    /// Dynamic viscosity [Pa·s]
    Viscosity,
    /// Vapour mass fraction [-]
    Quality,
}

impl Property {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pressure => "P",
            Self::Temperature => "T",
            Self::Enthalpy => "H",
            Self::Density => "D",
            Self::Viscosity => "V",
            Self::Quality => "Q",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two independent state variables fixing a thermodynamic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateInput {
    /// Pressure and temperature (single phase).
    PT { p: Pressure, t: Temperature },
    /// Pressure and quality (saturation line or two-phase dome).
    PQ { p: Pressure, q: f64 },
    /// Temperature and quality (saturation line or two-phase dome).
    TQ { t: Temperature, q: f64 },
    /// Pressure and specific enthalpy.
    PH { p: Pressure, h: SpecEnthalpy },
}

impl StateInput {
    /// Pressure of this specification, when it is one of the inputs.
    pub fn pressure(&self) -> Option<Pressure> {
        match self {
            Self::PT { p, .. } | Self::PQ { p, .. } | Self::PH { p, .. } => Some(*p),
            Self::TQ { .. } => None,
        }
    }
}

impl fmt::Display for StateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PT { p, t } => write!(f, "P={:.0}Pa,T={:.2}K", p.value, t.value),
            Self::PQ { p, q } => write!(f, "P={:.0}Pa,Q={}", p.value, q),
            Self::TQ { t, q } => write!(f, "T={:.2}K,Q={}", t.value, q),
            Self::PH { p, h } => write!(f, "P={:.0}Pa,H={:.1}J/kg", p.value, h),
        }
    }
}

/// Which saturation line to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturatedPhase {
    /// Saturated liquid (Q = 0)
    Liquid,
    /// Saturated vapour (Q = 1)
    Vapor,
}

impl SaturatedPhase {
    pub fn quality(self) -> f64 {
        match self {
            Self::Liquid => 0.0,
            Self::Vapor => 1.0,
        }
    }
}

/// Enthalpy, density and viscosity of one phase at one state.
///
/// Batches the three lookups every marching step needs per phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProperties {
    /// Specific enthalpy [J/kg]
    pub h: SpecEnthalpy,
    /// Density [kg/m³]
    pub rho: Density,
    /// Dynamic viscosity [Pa·s]
    pub mu: DynVisc,
}

impl PhaseProperties {
    pub fn new(h: SpecEnthalpy, rho: Density, mu: DynVisc) -> Self {
        Self { h, rho, mu }
    }

    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Phase(h={:.1}J/kg,ρ={:.3}kg/m³,μ={:.3e}Pa·s)",
            self.h, self.rho.value, self.mu.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{bar, k, kg_m3, pa_s};

    #[test]
    fn pressure_of_inputs() {
        assert_eq!(
            StateInput::PQ { p: bar(3.0), q: 0.0 }.pressure(),
            Some(bar(3.0))
        );
        assert_eq!(StateInput::TQ { t: k(400.0), q: 1.0 }.pressure(), None);
    }

    #[test]
    fn saturated_phase_quality() {
        assert_eq!(SaturatedPhase::Liquid.quality(), 0.0);
        assert_eq!(SaturatedPhase::Vapor.quality(), 1.0);
    }

    #[test]
    fn summary_mentions_values() {
        let props = PhaseProperties::new(419_170.0, kg_m3(958.8), pa_s(2.817e-4));
        let s = props.summary();
        assert!(s.contains("419170.0"));
        assert!(s.contains("958.8"));
    }
}

//! Candidate-pressure models for the next node.

use crate::error::{WellboreError, WellboreResult};
use gf_core::units::constants::gravity;
use gf_core::units::{Accel, Density, Length, Pressure, pa};

/// Default per-node attenuation of the decay model.
pub const DEFAULT_ATTENUATION: f64 = 0.02;

/// How the next node's pressure is predicted from the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureModel {
    /// `P = P_prev · exp(−k)` per node, independent of spacing.
    Decay { attenuation: f64 },
    /// `P = P_prev − ρ_m · g · dz` with the previous node's slip density.
    Hydrostatic { gravity: Accel },
}

impl Default for PressureModel {
    fn default() -> Self {
        Self::decay()
    }
}

impl PressureModel {
    pub fn decay() -> Self {
        Self::Decay {
            attenuation: DEFAULT_ATTENUATION,
        }
    }

    pub fn hydrostatic() -> Self {
        Self::Hydrostatic {
            gravity: gravity(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Decay { .. } => "decay",
            Self::Hydrostatic { .. } => "hydrostatic",
        }
    }

    pub fn validate(&self) -> WellboreResult<()> {
        match *self {
            Self::Decay { attenuation } => {
                if !attenuation.is_finite() || attenuation < 0.0 {
                    return Err(WellboreError::InvalidArg {
                        what: "decay attenuation must be finite and non-negative",
                    });
                }
            }
            Self::Hydrostatic { gravity } => {
                if !gravity.value.is_finite() || gravity.value <= 0.0 {
                    return Err(WellboreError::InvalidArg {
                        what: "gravity must be positive and finite",
                    });
                }
            }
        }
        Ok(())
    }

    /// Unclamped pressure at the next node.
    pub fn trial_pressure(&self, previous: Pressure, mixture_density: Density, dz: Length) -> Pressure {
        match *self {
            Self::Decay { attenuation } => pa(previous.value * (-attenuation).exp()),
            Self::Hydrostatic { gravity } => {
                pa(previous.value - mixture_density.value * gravity.value * dz.value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{bar, kg_m3, m, mps2};

    #[test]
    fn decay_ignores_spacing() {
        let model = PressureModel::decay();
        let a = model.trial_pressure(bar(45.0), kg_m3(800.0), m(1.0));
        let b = model.trial_pressure(bar(45.0), kg_m3(800.0), m(50.0));
        assert_eq!(a, b);
        assert!((a.value - 45.0e5 * (-0.02_f64).exp()).abs() < 1e-6);
    }

    #[test]
    fn hydrostatic_drop() {
        let model = PressureModel::hydrostatic();
        let p = model.trial_pressure(bar(45.0), kg_m3(800.0), m(1.0));
        assert!((bar(45.0).value - p.value - 800.0 * 9.81).abs() < 1e-9);
    }

    #[test]
    fn validation() {
        assert!(PressureModel::decay().validate().is_ok());
        assert!(PressureModel::Decay { attenuation: 0.0 }.validate().is_ok());
        assert!(PressureModel::Decay { attenuation: -0.1 }.validate().is_err());
        assert!(
            PressureModel::Hydrostatic { gravity: mps2(0.0) }
                .validate()
                .is_err()
        );
        assert_eq!(PressureModel::default().label(), "decay");
    }
}

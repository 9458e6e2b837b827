//! Condenser pressure models.

use crate::error::{PlantError, PlantResult};
use gf_core::units::{Pressure, TempInterval, Temperature, bar, degc, delta_k, k};
use gf_fluids::{FluidResult, PropertyOracle, Species};

/// How the turbine back-pressure is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condenser {
    /// Wet cooling tower: condensing at wet bulb plus approach.
    CoolingTower {
        wet_bulb: Temperature,
        approach: TempInterval,
    },
    /// Condenser held at a fixed absolute pressure.
    FixedPressure { pressure: Pressure },
}

impl Default for Condenser {
    fn default() -> Self {
        Self::CoolingTower {
            wet_bulb: degc(25.0),
            approach: delta_k(7.0),
        }
    }
}

impl Condenser {
    /// Fixed condenser at 0.45 bar, as in the mass-flow study.
    pub fn fixed_default() -> Self {
        Self::FixedPressure {
            pressure: bar(0.45),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CoolingTower { .. } => "cooling-tower",
            Self::FixedPressure { .. } => "fixed-pressure",
        }
    }

    pub fn validate(&self) -> PlantResult<()> {
        match *self {
            Self::CoolingTower { wet_bulb, approach } => {
                if !wet_bulb.value.is_finite() || wet_bulb.value <= 0.0 {
                    return Err(PlantError::InvalidArg {
                        what: "wet bulb temperature must be positive and finite",
                    });
                }
                if !approach.value.is_finite() || approach.value < 0.0 {
                    return Err(PlantError::InvalidArg {
                        what: "cooling tower approach must be non-negative",
                    });
                }
            }
            Self::FixedPressure { pressure } => {
                if !pressure.value.is_finite() || pressure.value <= 0.0 {
                    return Err(PlantError::InvalidArg {
                        what: "condenser pressure must be positive and finite",
                    });
                }
            }
        }
        Ok(())
    }

    /// Condensing temperature, when the model fixes one.
    pub fn condensing_temperature(&self) -> Option<Temperature> {
        match *self {
            Self::CoolingTower { wet_bulb, approach } => Some(k(wet_bulb.value + approach.value)),
            Self::FixedPressure { .. } => None,
        }
    }

    /// Condenser absolute pressure.
    pub fn pressure<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        species: Species,
    ) -> FluidResult<Pressure> {
        match *self {
            Self::FixedPressure { pressure } => Ok(pressure),
            Self::CoolingTower { wet_bulb, approach } => {
                oracle.saturation_pressure(k(wet_bulb.value + approach.value), species)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_fluids::SteamTableOracle;

    #[test]
    fn cooling_tower_condenses_at_32c() {
        let condenser = Condenser::default();
        let t = condenser.condensing_temperature().unwrap();
        assert!((t.value - degc(32.0).value).abs() < 1e-9);

        let oracle = SteamTableOracle::new();
        let p = condenser.pressure(&oracle, Species::Water).unwrap();
        // P_sat(32 °C) ≈ 4.76 kPa
        assert!(p.value > 4.5e3 && p.value < 5.1e3, "P_cond = {}", p.value);
    }

    #[test]
    fn fixed_pressure_passes_through() {
        let oracle = SteamTableOracle::new();
        let p = Condenser::fixed_default()
            .pressure(&oracle, Species::Water)
            .unwrap();
        assert_eq!(p, bar(0.45));
    }

    #[test]
    fn validation() {
        assert!(Condenser::default().validate().is_ok());
        assert!(
            Condenser::FixedPressure { pressure: bar(0.0) }
                .validate()
                .is_err()
        );
        assert!(
            Condenser::CoolingTower {
                wet_bulb: degc(25.0),
                approach: delta_k(-1.0),
            }
            .validate()
            .is_err()
        );
    }
}

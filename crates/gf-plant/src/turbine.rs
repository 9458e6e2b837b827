//! Single-flash steam turbine.

use crate::error::{PlantError, PlantResult};
use gf_core::units::{MassRate, Power, Pressure, kgps, kw};
use gf_fluids::{FluidResult, PropertyOracle, SaturatedPhase, Species};

/// Default share of separated steam bled to the gas-extraction ejector.
pub const DEFAULT_EJECTOR_FRACTION: f64 = 0.03;

/// Enthalpy the turbine exhausts to at condenser pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurbineExhaust {
    /// Saturated vapour at the condenser (no condensation in the turbine).
    #[default]
    SaturatedVapor,
    /// Saturated liquid at the condenser (expansion charged down to condensate).
    SaturatedLiquid,
}

impl TurbineExhaust {
    fn phase(self) -> SaturatedPhase {
        match self {
            Self::SaturatedVapor => SaturatedPhase::Vapor,
            Self::SaturatedLiquid => SaturatedPhase::Liquid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SaturatedVapor => "saturated-vapor",
            Self::SaturatedLiquid => "saturated-liquid",
        }
    }
}

/// Steam turbine fed with separated steam.
///
/// ## Model
///
/// ```text
/// m_net = m_steam · (1 − ejector)
/// Δh    = h_g(P_sep) − h_exhaust(P_cond)
/// W     = m_net · Δh / 1000          [kW], zero when m_net <= 0
/// SSC   = 3600 · m_net / W           [kg/kWh], undefined when W = 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteamTurbine {
    /// Fraction of steam diverted to the ejector, in [0, 1).
    pub ejector_fraction: f64,
    pub exhaust: TurbineExhaust,
}

impl Default for SteamTurbine {
    fn default() -> Self {
        Self {
            ejector_fraction: DEFAULT_EJECTOR_FRACTION,
            exhaust: TurbineExhaust::default(),
        }
    }
}

impl SteamTurbine {
    pub fn new(ejector_fraction: f64, exhaust: TurbineExhaust) -> PlantResult<Self> {
        let turbine = Self {
            ejector_fraction,
            exhaust,
        };
        turbine.validate()?;
        Ok(turbine)
    }

    pub fn validate(&self) -> PlantResult<()> {
        if !self.ejector_fraction.is_finite() || !(0.0..1.0).contains(&self.ejector_fraction) {
            return Err(PlantError::InvalidArg {
                what: "ejector fraction must be in [0, 1)",
            });
        }
        Ok(())
    }

    /// Steam left for the turbine after the ejector bleed.
    pub fn net_steam(&self, steam: MassRate) -> MassRate {
        kgps(steam.value * (1.0 - self.ejector_fraction))
    }

    /// Exhaust enthalpy at the condenser [J/kg].
    pub fn exhaust_enthalpy<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        p_cond: Pressure,
        species: Species,
    ) -> FluidResult<f64> {
        Ok(oracle.saturated(p_cond, self.exhaust.phase(), species)?.h)
    }

    /// Enthalpy drop from separator steam to exhaust [J/kg].
    pub fn specific_work<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        p_sep: Pressure,
        h_exhaust: f64,
        species: Species,
    ) -> FluidResult<f64> {
        let h_steam = oracle.saturated(p_sep, SaturatedPhase::Vapor, species)?.h;
        Ok(h_steam - h_exhaust)
    }

    /// Shaft power from `net_steam` expanding through `specific_work`.
    pub fn power(&self, net_steam: MassRate, specific_work: f64) -> Power {
        if net_steam.value > 0.0 {
            kw(net_steam.value * specific_work / 1000.0)
        } else {
            kw(0.0)
        }
    }
}

/// Specific steam consumption [kg/kWh]; `None` when no power is produced.
pub fn specific_steam_consumption(net_steam: MassRate, power: Power) -> Option<f64> {
    let power_kw = power.value / 1000.0;
    if power_kw > 0.0 && power_kw.is_finite() {
        Some(3600.0 * net_steam.value / power_kw)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ejector_bleed_reduces_steam() {
        let turbine = SteamTurbine::default();
        let net = turbine.net_steam(kgps(10.0));
        assert!((net.value - 9.7).abs() < 1e-12);
    }

    #[test]
    fn power_in_kilowatts() {
        let turbine = SteamTurbine::default();
        let power = turbine.power(kgps(2.0), 500_000.0);
        assert!((power.value - 1.0e6).abs() < 1e-6);
        assert_eq!(turbine.power(kgps(0.0), 500_000.0).value, 0.0);
    }

    #[test]
    fn ssc_undefined_without_power() {
        assert_eq!(specific_steam_consumption(kgps(0.0), kw(0.0)), None);
        let ssc = specific_steam_consumption(kgps(1.0), kw(500.0)).unwrap();
        assert!((ssc - 7.2).abs() < 1e-12);
    }

    #[test]
    fn ejector_fraction_bounds() {
        assert!(SteamTurbine::new(0.0, TurbineExhaust::SaturatedVapor).is_ok());
        assert!(SteamTurbine::new(1.0, TurbineExhaust::SaturatedVapor).is_err());
        assert!(SteamTurbine::new(-0.1, TurbineExhaust::SaturatedLiquid).is_err());
    }
}

//! Separator-pressure yield sweep.
//!
//! Each separator pressure is an independent flash of the wellhead enthalpy,
//! so samples are evaluated in parallel and collected in sweep order.

use crate::condenser::Condenser;
use crate::error::{PlantError, PlantResult};
use crate::sweep::SweepRange;
use crate::turbine::{SteamTurbine, specific_steam_consumption};
use gf_core::units::{MassRate, Power, Pressure, kgps, pa, to_bar};
use gf_fluids::{PropertyOracle, SaturatedPhase, Species, SpecEnthalpy, isoenthalpic_quality};
use rayon::prelude::*;
use tracing::{info, warn};

/// Yield of one separator pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorSample {
    /// Dryness fraction at the separator.
    pub dryness: f64,
    pub steam: MassRate,
    pub brine: MassRate,
    /// Steam after the ejector bleed.
    pub net_steam: MassRate,
    /// Net steam as a percentage of total flow.
    pub steam_fraction_pct: f64,
    /// Turbine enthalpy drop [J/kg].
    pub specific_work: f64,
    pub power: Power,
    /// [kg/kWh]; `None` when the turbine produces no power.
    pub specific_steam_consumption: Option<f64>,
}

/// One sweep position and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorPoint {
    pub pressure: Pressure,
    pub outcome: PlantResult<SeparatorSample>,
}

/// Completed separator sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorReport {
    pub condenser_pressure: Pressure,
    pub points: Vec<SeparatorPoint>,
}

impl SeparatorReport {
    /// Successful samples with their separator pressure.
    pub fn samples(&self) -> impl Iterator<Item = (Pressure, &SeparatorSample)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.outcome.as_ref().ok().map(|s| (p.pressure, s)))
    }

    pub fn failures(&self) -> usize {
        self.points.iter().filter(|p| p.outcome.is_err()).count()
    }

    /// Separator pressure giving the highest power.
    pub fn best_power(&self) -> Option<(Pressure, &SeparatorSample)> {
        self.samples()
            .max_by(|a, b| a.1.power.value.total_cmp(&b.1.power.value))
    }
}

/// Parameters of a separator-pressure sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorSweep {
    /// Enthalpy of the fluid entering the separator [J/kg].
    pub enthalpy: SpecEnthalpy,
    /// Separator pressures [Pa].
    pub pressures: SweepRange,
    pub total_mass_flow: MassRate,
    pub turbine: SteamTurbine,
    pub condenser: Condenser,
    pub species: Species,
}

impl SeparatorSweep {
    /// Sweep 3 to 12 bar in 20 points at 1 kg/s with the default plant.
    pub fn new(enthalpy: SpecEnthalpy) -> Self {
        Self {
            enthalpy,
            pressures: SweepRange {
                start: 3.0e5,
                end: 12.0e5,
                points: 20,
                spacing: Default::default(),
            },
            total_mass_flow: kgps(1.0),
            turbine: SteamTurbine::default(),
            condenser: Condenser::default(),
            species: Species::Water,
        }
    }

    pub fn validate(&self) -> PlantResult<()> {
        if !self.enthalpy.is_finite() {
            return Err(PlantError::InvalidArg {
                what: "separator enthalpy must be finite",
            });
        }
        self.pressures.validate()?;
        if self.pressures.start <= 0.0 || self.pressures.end <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "separator pressures must be positive",
            });
        }
        if !self.total_mass_flow.value.is_finite() || self.total_mass_flow.value <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "total mass flow must be positive and finite",
            });
        }
        self.turbine.validate()?;
        self.condenser.validate()
    }

    /// Evaluate every separator pressure.
    ///
    /// Fails only if the condenser state cannot be resolved; individual
    /// samples carry their own errors.
    pub fn run<O: PropertyOracle + ?Sized>(&self, oracle: &O) -> PlantResult<SeparatorReport> {
        self.validate()?;

        let condenser_pressure = self.condenser.pressure(oracle, self.species)?;
        let h_exhaust = self
            .turbine
            .exhaust_enthalpy(oracle, condenser_pressure, self.species)?;

        let pressures = self.pressures.values();
        let points: Vec<SeparatorPoint> = pressures
            .par_iter()
            .map(|&p_sep| {
                let pressure = pa(p_sep);
                SeparatorPoint {
                    pressure,
                    outcome: self.evaluate(oracle, pressure, h_exhaust),
                }
            })
            .collect();

        for point in &points {
            if let Err(err) = &point.outcome {
                warn!(pressure_bar = to_bar(point.pressure), error = %err, "separator sample failed");
            }
        }

        let report = SeparatorReport {
            condenser_pressure,
            points,
        };
        info!(
            samples = report.points.len(),
            failed = report.failures(),
            condenser_bar = to_bar(condenser_pressure),
            "separator sweep complete"
        );
        Ok(report)
    }

    /// One separator pressure.
    pub fn evaluate<O: PropertyOracle + ?Sized>(
        &self,
        oracle: &O,
        pressure: Pressure,
        h_exhaust: f64,
    ) -> PlantResult<SeparatorSample> {
        let liquid = oracle.saturated(pressure, SaturatedPhase::Liquid, self.species)?;
        let vapor = oracle.saturated(pressure, SaturatedPhase::Vapor, self.species)?;
        let dryness = isoenthalpic_quality(self.enthalpy, liquid.h, vapor.h).quality;

        let total = self.total_mass_flow.value;
        let steam = kgps(dryness * total);
        let brine = kgps(total - steam.value);
        let net_steam = self.turbine.net_steam(steam);

        let specific_work = vapor.h - h_exhaust;
        let power = self.turbine.power(net_steam, specific_work);

        Ok(SeparatorSample {
            dryness,
            steam,
            brine,
            net_steam,
            steam_fraction_pct: 100.0 * net_steam.value / total,
            specific_work,
            power,
            specific_steam_consumption: specific_steam_consumption(net_steam, power),
        })
    }
}

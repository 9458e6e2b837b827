//! Case → runnable models.
//!
//! Resolves every quantity to SI, builds the wellbore and plant models and
//! runs their own validation, so a compiled case is ready to march.

use crate::schema::*;
use crate::units::{Quantity, QuantityDef};
use crate::validate::ValidationError;
use gf_core::units::{MassRate, Pressure, delta_k, k, kgps, m, mps2, pa};
use gf_fluids::{OracleKind, SpecEnthalpy, Species};
use gf_plant::{
    Condenser, PowerSweep, SeparatorSweep, SteamFraction, SteamTurbine, SweepRange,
    SweepSpacing, TurbineExhaust,
};
use gf_wellbore::{DEFAULT_SLIP, DepthGrid, MarchConfig, PressureModel, Reservoir};

/// Separator sweep awaiting the wellhead enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorPlan {
    pub pressures: SweepRange,
    pub total_mass_flow: MassRate,
    pub turbine: SteamTurbine,
    pub condenser: Condenser,
}

impl SeparatorPlan {
    pub fn sweep(&self, enthalpy: SpecEnthalpy) -> SeparatorSweep {
        SeparatorSweep {
            enthalpy,
            pressures: self.pressures,
            total_mass_flow: self.total_mass_flow,
            turbine: self.turbine,
            condenser: self.condenser,
            species: Species::Water,
        }
    }
}

/// Power sweep; without a fixed steam fraction it flashes the wellhead enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPlan {
    pub separator_pressure: Pressure,
    pub steam_fraction: Option<f64>,
    pub mass_flows: SweepRange,
    pub turbine: SteamTurbine,
    pub condenser: Condenser,
}

impl PowerPlan {
    pub fn sweep(&self, enthalpy: SpecEnthalpy) -> PowerSweep {
        let steam_fraction = match self.steam_fraction {
            Some(x) => SteamFraction::Given(x),
            None => SteamFraction::FromEnthalpy(enthalpy),
        };
        PowerSweep {
            separator_pressure: self.separator_pressure,
            steam_fraction,
            mass_flows: self.mass_flows,
            turbine: self.turbine,
            condenser: self.condenser,
            species: Species::Water,
        }
    }
}

/// A validated case in solver terms.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCase {
    pub name: String,
    pub oracle: OracleKind,
    pub march: MarchConfig,
    pub grid: DepthGrid,
    /// Informational wellhead pressure from the case file.
    pub wellhead_pressure: Option<Pressure>,
    pub separator: SeparatorPlan,
    pub power: Option<PowerPlan>,
}

fn resolve(field: &str, def: &QuantityDef, quantity: Quantity) -> Result<f64, ValidationError> {
    def.resolve(quantity).map_err(|source| ValidationError::Unit {
        field: field.to_string(),
        source,
    })
}

fn model_err(field: &str, reason: impl std::fmt::Display) -> ValidationError {
    ValidationError::Model {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive".to_string(),
        })
    }
}

pub fn compile_case(case: &Case) -> Result<CompiledCase, ValidationError> {
    let oracle = match case.oracle {
        OracleDef::CoolProp => OracleKind::CoolProp,
        OracleDef::SteamTable => OracleKind::SteamTable,
    };

    let (march, grid, wellhead_pressure) = compile_well(case)?;
    let separator = compile_separator(&case.plant)?;
    let power = case
        .plant
        .power
        .as_ref()
        .map(|def| compile_power(def, &case.plant.turbine))
        .transpose()?;

    Ok(CompiledCase {
        name: case.name.clone(),
        oracle,
        march,
        grid,
        wellhead_pressure,
        separator,
        power,
    })
}

fn compile_well(case: &Case) -> Result<(MarchConfig, DepthGrid, Option<Pressure>), ValidationError> {
    let r = &case.reservoir;
    let depth = positive(
        "reservoir.depth",
        resolve("reservoir.depth", &r.depth, Quantity::Length)?,
    )?;
    let reservoir = Reservoir {
        pressure: pa(resolve("reservoir.pressure", &r.pressure, Quantity::Pressure)?),
        temperature: k(resolve(
            "reservoir.temperature",
            &r.temperature,
            Quantity::Temperature,
        )?),
        species: Species::Water,
    };
    let wellhead_pressure = r
        .wellhead_pressure
        .as_ref()
        .map(|p| resolve("reservoir.wellhead_pressure", p, Quantity::Pressure).map(pa))
        .transpose()?;

    let pressure_model = match &case.march.pressure_model {
        PressureModelDef::Decay { attenuation } => match attenuation {
            Some(attenuation) => PressureModel::Decay {
                attenuation: *attenuation,
            },
            None => PressureModel::decay(),
        },
        PressureModelDef::Hydrostatic { gravity } => match gravity {
            Some(g) => PressureModel::Hydrostatic {
                gravity: mps2(resolve(
                    "march.pressure_model.gravity",
                    g,
                    Quantity::Acceleration,
                )?),
            },
            None => PressureModel::hydrostatic(),
        },
    };

    let defaults = MarchConfig::default();
    let floor = match &case.march.floor {
        Some(f) => pa(resolve("march.floor", f, Quantity::Pressure)?),
        None => defaults.floor,
    };
    let march = MarchConfig {
        reservoir,
        pressure_model,
        slip: case.march.slip.unwrap_or(DEFAULT_SLIP),
        floor,
    };
    march
        .validate()
        .map_err(|e| model_err("march", e))?;

    let grid = match &case.grid {
        GridDef::Count { nodes } => DepthGrid::from_count(m(depth), *nodes),
        GridDef::Step { step } => {
            DepthGrid::from_step(m(depth), m(resolve("grid.step", step, Quantity::Length)?))
        }
    }
    .map_err(|e| model_err("grid", e))?;

    Ok((march, grid, wellhead_pressure))
}

fn compile_condenser(field: &str, def: &CondenserDef) -> Result<Condenser, ValidationError> {
    let condenser = match def {
        CondenserDef::CoolingTower { wet_bulb, approach } => Condenser::CoolingTower {
            wet_bulb: k(resolve(
                &format!("{field}.wet_bulb"),
                wet_bulb,
                Quantity::Temperature,
            )?),
            approach: delta_k(resolve(
                &format!("{field}.approach"),
                approach,
                Quantity::TemperatureDifference,
            )?),
        },
        CondenserDef::FixedPressure { pressure } => Condenser::FixedPressure {
            pressure: pa(resolve(
                &format!("{field}.pressure"),
                pressure,
                Quantity::Pressure,
            )?),
        },
    };
    condenser
        .validate()
        .map_err(|e| model_err(field, e))?;
    Ok(condenser)
}

fn compile_turbine(def: &TurbineDef, exhaust: ExhaustDef) -> Result<SteamTurbine, ValidationError> {
    let ejector_fraction = resolve(
        "plant.turbine.ejector_fraction",
        &def.ejector_fraction,
        Quantity::Fraction,
    )?;
    let exhaust = match exhaust {
        ExhaustDef::SaturatedVapor => TurbineExhaust::SaturatedVapor,
        ExhaustDef::SaturatedLiquid => TurbineExhaust::SaturatedLiquid,
    };
    SteamTurbine::new(ejector_fraction, exhaust)
        .map_err(|e| model_err("plant.turbine", e))
}

fn spacing(def: SpacingDef) -> SweepSpacing {
    match def {
        SpacingDef::Linear => SweepSpacing::Linear,
        SpacingDef::Logarithmic => SweepSpacing::Logarithmic,
    }
}

fn compile_separator(plant: &PlantDef) -> Result<SeparatorPlan, ValidationError> {
    let def = &plant.separator;
    let pressures = SweepRange::new(
        resolve("plant.separator.start", &def.start, Quantity::Pressure)?,
        resolve("plant.separator.end", &def.end, Quantity::Pressure)?,
        def.points,
        spacing(def.spacing),
    )
    .map_err(|e| model_err("plant.separator", e))?;

    let plan = SeparatorPlan {
        pressures,
        total_mass_flow: kgps(resolve(
            "plant.separator.mass_flow",
            &def.mass_flow,
            Quantity::MassFlow,
        )?),
        turbine: compile_turbine(&plant.turbine, plant.turbine.exhaust)?,
        condenser: compile_condenser("plant.condenser", &plant.condenser)?,
    };
    // Enthalpy only arrives after the march; any finite value exercises the checks
    plan.sweep(0.0)
        .validate()
        .map_err(|e| model_err("plant.separator", e))?;
    Ok(plan)
}

fn compile_power(def: &PowerDef, turbine: &TurbineDef) -> Result<PowerPlan, ValidationError> {
    let steam_fraction = def
        .steam_fraction
        .as_ref()
        .map(|x| resolve("plant.power.steam_fraction", x, Quantity::Fraction))
        .transpose()?;
    let mass_flows = SweepRange::linear(
        resolve(
            "plant.power.mass_flow_start",
            &def.mass_flow_start,
            Quantity::MassFlow,
        )?,
        resolve(
            "plant.power.mass_flow_end",
            &def.mass_flow_end,
            Quantity::MassFlow,
        )?,
        def.points,
    )
    .map_err(|e| model_err("plant.power", e))?;

    let plan = PowerPlan {
        separator_pressure: pa(resolve(
            "plant.power.separator_pressure",
            &def.separator_pressure,
            Quantity::Pressure,
        )?),
        steam_fraction,
        mass_flows,
        turbine: compile_turbine(turbine, def.exhaust)?,
        condenser: compile_condenser("plant.power.condenser", &def.condenser)?,
    };
    plan.sweep(0.0)
        .validate()
        .map_err(|e| model_err("plant.power", e))?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::{bar, degc};

    #[test]
    fn reference_case_compiles_to_defaults() {
        let compiled = compile_case(&reference_case()).unwrap();

        assert_eq!(compiled.oracle, OracleKind::CoolProp);
        assert_eq!(compiled.grid.len(), 100);
        assert_eq!(compiled.grid.total_depth(), m(2500.0));
        assert!((compiled.march.reservoir.pressure.value - bar(45.0).value).abs() < 1e-6);
        assert!((compiled.march.reservoir.temperature.value - degc(250.0).value).abs() < 1e-9);
        assert_eq!(compiled.march.pressure_model, PressureModel::decay());
        assert_eq!(compiled.march.slip, 1.2);

        assert_eq!(compiled.separator.pressures.points, 20);
        assert!((compiled.separator.turbine.ejector_fraction - 0.03).abs() < 1e-12);
        assert_eq!(compiled.separator.turbine.exhaust, TurbineExhaust::SaturatedVapor);

        let power = compiled.power.unwrap();
        assert_eq!(power.turbine.exhaust, TurbineExhaust::SaturatedLiquid);
        assert_eq!(power.mass_flows.points, 30);
        assert!((power.steam_fraction.unwrap() - 0.28).abs() < 1e-12);
    }

    #[test]
    fn step_grid_and_hydrostatic_model() {
        let mut case = reference_case();
        case.grid = GridDef::Step {
            step: QuantityDef::text("1 m"),
        };
        case.march.pressure_model = PressureModelDef::Hydrostatic { gravity: None };
        let compiled = compile_case(&case).unwrap();

        assert_eq!(compiled.grid.len(), 2501);
        assert_eq!(compiled.march.pressure_model, PressureModel::hydrostatic());
    }

    #[test]
    fn power_without_fraction_uses_wellhead_enthalpy() {
        let mut case = reference_case();
        if let Some(power) = case.plant.power.as_mut() {
            power.steam_fraction = None;
        }
        let plan = compile_case(&case).unwrap().power.unwrap();
        let sweep = plan.sweep(1.0857e6);
        assert_eq!(sweep.steam_fraction, SteamFraction::FromEnthalpy(1.0857e6));
    }

    #[test]
    fn reservoir_depth_must_be_positive() {
        let mut case = reference_case();
        case.reservoir.depth = QuantityDef::Si(0.0);
        assert!(matches!(
            compile_case(&case),
            Err(ValidationError::InvalidValue { .. })
        ));
    }
}

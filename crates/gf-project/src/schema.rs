//! Case file schema.
//!
//! Everything except the reservoir block has defaults, so a minimal case is a
//! name plus reservoir depth, pressure and temperature.

use crate::units::QuantityDef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Schema version; files without one are treated as version 0.
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub oracle: OracleDef,
    pub reservoir: ReservoirDef,
    #[serde(default)]
    pub grid: GridDef,
    #[serde(default)]
    pub march: MarchDef,
    #[serde(default)]
    pub plant: PlantDef,
}

/// Property backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OracleDef {
    #[default]
    #[serde(rename = "coolprop")]
    CoolProp,
    #[serde(rename = "steam-table")]
    SteamTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirDef {
    /// Vertical depth of the reservoir below the wellhead.
    pub depth: QuantityDef,
    pub pressure: QuantityDef,
    pub temperature: QuantityDef,
    /// Reported alongside results; not a march boundary condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellhead_pressure: Option<QuantityDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridDef {
    /// Fixed step; must divide the reservoir depth.
    Step { step: QuantityDef },
    /// Fixed node count including reservoir and wellhead.
    Count { nodes: usize },
}

impl Default for GridDef {
    fn default() -> Self {
        Self::Count { nodes: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarchDef {
    #[serde(default)]
    pub pressure_model: PressureModelDef,
    /// Drift-flux distribution parameter C0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<QuantityDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PressureModelDef {
    Decay {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attenuation: Option<f64>,
    },
    Hydrostatic {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gravity: Option<QuantityDef>,
    },
}

impl Default for PressureModelDef {
    fn default() -> Self {
        Self::Decay { attenuation: None }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantDef {
    #[serde(default)]
    pub separator: SeparatorDef,
    #[serde(default)]
    pub turbine: TurbineDef,
    #[serde(default)]
    pub condenser: CondenserDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingDef {
    #[default]
    Linear,
    Logarithmic,
}

/// Separator-pressure sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatorDef {
    pub start: QuantityDef,
    pub end: QuantityDef,
    pub points: usize,
    #[serde(default)]
    pub spacing: SpacingDef,
    /// Total well flow entering the separator.
    pub mass_flow: QuantityDef,
}

impl Default for SeparatorDef {
    fn default() -> Self {
        Self {
            start: QuantityDef::text("3 bar"),
            end: QuantityDef::text("12 bar"),
            points: 20,
            spacing: SpacingDef::Linear,
            mass_flow: QuantityDef::text("1 kg/s"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustDef {
    #[default]
    SaturatedVapor,
    SaturatedLiquid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbineDef {
    /// Share of separated steam bled to the ejector.
    pub ejector_fraction: QuantityDef,
    #[serde(default)]
    pub exhaust: ExhaustDef,
}

impl Default for TurbineDef {
    fn default() -> Self {
        Self {
            ejector_fraction: QuantityDef::text("3%"),
            exhaust: ExhaustDef::SaturatedVapor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CondenserDef {
    CoolingTower {
        wet_bulb: QuantityDef,
        approach: QuantityDef,
    },
    FixedPressure {
        pressure: QuantityDef,
    },
}

impl Default for CondenserDef {
    fn default() -> Self {
        Self::CoolingTower {
            wet_bulb: QuantityDef::text("25 C"),
            approach: QuantityDef::text("7 K"),
        }
    }
}

/// Power across total mass flow at one separator pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerDef {
    pub separator_pressure: QuantityDef,
    /// Fixed steam fraction; omitted to flash the wellhead enthalpy instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_fraction: Option<QuantityDef>,
    pub mass_flow_start: QuantityDef,
    pub mass_flow_end: QuantityDef,
    pub points: usize,
    pub condenser: CondenserDef,
    #[serde(default)]
    pub exhaust: ExhaustDef,
}

impl Default for PowerDef {
    fn default() -> Self {
        Self {
            separator_pressure: QuantityDef::text("3 bar"),
            steam_fraction: Some(QuantityDef::text("28%")),
            mass_flow_start: QuantityDef::text("1 kg/s"),
            mass_flow_end: QuantityDef::text("291 kg/s"),
            points: 30,
            condenser: CondenserDef::FixedPressure {
                pressure: QuantityDef::text("0.45 bar"),
            },
            exhaust: ExhaustDef::SaturatedLiquid,
        }
    }
}

/// The 2500 m, 45 bar, 250 °C reference well.
pub fn reference_case() -> Case {
    Case {
        version: crate::migrate::LATEST_VERSION,
        name: "reference-well".to_string(),
        oracle: OracleDef::CoolProp,
        reservoir: ReservoirDef {
            depth: QuantityDef::text("2500 m"),
            pressure: QuantityDef::text("45 bar"),
            temperature: QuantityDef::text("250 C"),
            wellhead_pressure: Some(QuantityDef::text("6 bar")),
        },
        grid: GridDef::Count { nodes: 100 },
        march: MarchDef {
            pressure_model: PressureModelDef::Decay {
                attenuation: Some(0.02),
            },
            slip: Some(1.2),
            floor: Some(QuantityDef::text("1 bar")),
        },
        plant: PlantDef {
            power: Some(PowerDef::default()),
            ..PlantDef::default()
        },
    }
}

//! Result data types.

use gf_wellbore::WellheadHandoff;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub case_name: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub solver_version: String,
    pub oracle: String,
    pub nodes: usize,
    pub flash_depth_m: Option<f64>,
    pub wellhead_pressure_pa: Option<f64>,
    pub wellhead_quality: Option<f64>,
    /// Artifact file names inside the run directory.
    #[serde(default)]
    pub files: Vec<String>,
}

impl RunManifest {
    /// Manifest stamped with the current time.
    pub fn stamped(run_id: RunId, case_name: &str, solver_version: &str, oracle: &str) -> Self {
        Self {
            run_id,
            case_name: case_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver_version: solver_version.to_string(),
            oracle: oracle.to_string(),
            nodes: 0,
            flash_depth_m: None,
            wellhead_pressure_pa: None,
            wellhead_quality: None,
            files: Vec::new(),
        }
    }
}

/// One profile node; every field but index, depth and pressure is `None`
/// for an undefined node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub index: usize,
    pub depth_m: f64,
    pub pressure_pa: f64,
    pub temperature_k: Option<f64>,
    pub quality: Option<f64>,
    pub void_fraction: Option<f64>,
    pub mixture_density_kg_m3: Option<f64>,
    pub homogeneous_density_kg_m3: Option<f64>,
    pub viscosity_pa_s: Option<f64>,
    pub specific_volume_m3_kg: Option<f64>,
    pub enthalpy_gain_j_kg: Option<f64>,
    pub regime: Option<String>,
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Ok,
    Undefined,
}

impl NodeStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Undefined => "undefined",
        }
    }
}

/// Whole march as written to `profile.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileExport {
    pub reservoir_enthalpy_j_kg: f64,
    pub flash_index: Option<usize>,
    pub flash_depth_m: Option<f64>,
    pub floor_clamps: usize,
    pub degenerate_saturation: usize,
    pub lookup_failures: usize,
    pub rows: Vec<ProfileRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatorRow {
    pub separator_pressure_pa: f64,
    pub dryness: Option<f64>,
    pub steam_kg_s: Option<f64>,
    pub brine_kg_s: Option<f64>,
    pub net_steam_kg_s: Option<f64>,
    pub steam_fraction_pct: Option<f64>,
    pub specific_work_j_kg: Option<f64>,
    pub power_kw: Option<f64>,
    pub ssc_kg_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRow {
    pub mass_flow_kg_s: f64,
    pub net_steam_kg_s: f64,
    pub power_kw: f64,
}

/// Everything a run writes besides its manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifacts {
    pub profile: ProfileExport,
    pub handoff: Option<WellheadHandoff>,
    pub separator: Vec<SeparatorRow>,
    pub power: Vec<PowerRow>,
}

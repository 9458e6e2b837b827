//! Flat rows and CSV text for march and sweep results.
//!
//! Undefined values become empty CSV cells and JSON nulls.

use crate::types::{NodeStatus, PowerRow, ProfileExport, ProfileRow, SeparatorRow};
use gf_plant::{PowerReport, SeparatorReport};
use gf_wellbore::{ProfileNode, ResultProfile};
use std::fmt::Write;

fn row(node: &ProfileNode) -> ProfileRow {
    match node {
        ProfileNode::Resolved(s) => ProfileRow {
            index: s.index,
            depth_m: s.depth.value,
            pressure_pa: s.pressure.value,
            temperature_k: Some(s.temperature.value),
            quality: Some(s.quality),
            void_fraction: Some(s.void_fraction),
            mixture_density_kg_m3: Some(s.mixture_density.value),
            homogeneous_density_kg_m3: Some(s.homogeneous_density.value),
            viscosity_pa_s: Some(s.mixture_viscosity.value),
            specific_volume_m3_kg: Some(s.specific_volume()),
            enthalpy_gain_j_kg: Some(s.enthalpy_gain),
            regime: Some(s.regime.label().to_string()),
            status: NodeStatus::Ok,
            fault: None,
        },
        ProfileNode::Undefined(u) => ProfileRow {
            index: u.index,
            depth_m: u.depth.value,
            pressure_pa: u.pressure.value,
            temperature_k: None,
            quality: None,
            void_fraction: None,
            mixture_density_kg_m3: None,
            homogeneous_density_kg_m3: None,
            viscosity_pa_s: None,
            specific_volume_m3_kg: None,
            enthalpy_gain_j_kg: None,
            regime: None,
            status: NodeStatus::Undefined,
            fault: Some(u.fault.to_string()),
        },
    }
}

pub fn profile_export(profile: &ResultProfile) -> ProfileExport {
    let diagnostics = profile.diagnostics();
    let event = profile.flash_event();
    ProfileExport {
        reservoir_enthalpy_j_kg: profile.reservoir_enthalpy(),
        flash_index: event.map(|e| e.index),
        flash_depth_m: event.map(|e| e.depth.value),
        floor_clamps: diagnostics.floor_clamps,
        degenerate_saturation: diagnostics.degenerate_saturation,
        lookup_failures: diagnostics.lookup_failures,
        rows: profile.nodes().iter().map(row).collect(),
    }
}

fn cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Quote a free-text cell if it would break the row.
fn text_cell(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn profile_csv(rows: &[ProfileRow]) -> String {
    let mut csv = String::from(
        "index,depth_m,pressure_pa,temperature_k,quality,void_fraction,\
         mixture_density_kg_m3,homogeneous_density_kg_m3,viscosity_pa_s,\
         specific_volume_m3_kg,enthalpy_gain_j_kg,regime,status,fault\n",
    );
    for r in rows {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.index,
            r.depth_m,
            r.pressure_pa,
            cell(r.temperature_k),
            cell(r.quality),
            cell(r.void_fraction),
            cell(r.mixture_density_kg_m3),
            cell(r.homogeneous_density_kg_m3),
            cell(r.viscosity_pa_s),
            cell(r.specific_volume_m3_kg),
            cell(r.enthalpy_gain_j_kg),
            r.regime.as_deref().unwrap_or_default(),
            r.status.label(),
            text_cell(r.fault.as_deref().unwrap_or_default()),
        );
    }
    csv
}

pub fn separator_rows(report: &SeparatorReport) -> Vec<SeparatorRow> {
    report
        .points
        .iter()
        .map(|point| match &point.outcome {
            Ok(s) => SeparatorRow {
                separator_pressure_pa: point.pressure.value,
                dryness: Some(s.dryness),
                steam_kg_s: Some(s.steam.value),
                brine_kg_s: Some(s.brine.value),
                net_steam_kg_s: Some(s.net_steam.value),
                steam_fraction_pct: Some(s.steam_fraction_pct),
                specific_work_j_kg: Some(s.specific_work),
                power_kw: Some(s.power.value / 1000.0),
                ssc_kg_kwh: s.specific_steam_consumption,
                error: None,
            },
            Err(err) => SeparatorRow {
                separator_pressure_pa: point.pressure.value,
                dryness: None,
                steam_kg_s: None,
                brine_kg_s: None,
                net_steam_kg_s: None,
                steam_fraction_pct: None,
                specific_work_j_kg: None,
                power_kw: None,
                ssc_kg_kwh: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

pub fn separator_csv(rows: &[SeparatorRow]) -> String {
    let mut csv = String::from(
        "separator_pressure_pa,dryness,steam_kg_s,brine_kg_s,net_steam_kg_s,\
         steam_fraction_pct,specific_work_j_kg,power_kw,ssc_kg_kwh,error\n",
    );
    for r in rows {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{}",
            r.separator_pressure_pa,
            cell(r.dryness),
            cell(r.steam_kg_s),
            cell(r.brine_kg_s),
            cell(r.net_steam_kg_s),
            cell(r.steam_fraction_pct),
            cell(r.specific_work_j_kg),
            cell(r.power_kw),
            cell(r.ssc_kg_kwh),
            text_cell(r.error.as_deref().unwrap_or_default()),
        );
    }
    csv
}

pub fn power_rows(report: &PowerReport) -> Vec<PowerRow> {
    report
        .samples
        .iter()
        .map(|s| PowerRow {
            mass_flow_kg_s: s.mass_flow.value,
            net_steam_kg_s: s.net_steam.value,
            power_kw: s.power.value / 1000.0,
        })
        .collect()
}

pub fn power_csv(rows: &[PowerRow]) -> String {
    let mut csv = String::from("mass_flow_kg_s,net_steam_kg_s,power_kw\n");
    for r in rows {
        let _ = writeln!(csv, "{},{},{}", r.mass_flow_kg_s, r.net_steam_kg_s, r.power_kw);
    }
    csv
}

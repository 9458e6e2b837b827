//! Run execution and caching service.

use gf_fluids::{OracleKind, PropertyOracle};
use gf_plant::{PowerReport, SeparatorReport};
use gf_project::{Case, CompiledCase, OracleDef, compile_case};
use gf_results::{
    ProfileExport, RunArtifacts, RunManifest, RunStore, power_rows, profile_export,
    separator_rows,
};
use gf_wellbore::{ResultProfile, WellheadHandoff, march};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::AppResult;
use crate::project_service;

pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running a case.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Replaces the backend named in the case file.
    pub oracle: Option<OracleKind>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: SOLVER_VERSION.to_string(),
            oracle: None,
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub case_path: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub march_time_s: f64,
    pub plant_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// In-memory outcome of one case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub profile: ResultProfile,
    pub handoff: WellheadHandoff,
    pub separator: SeparatorReport,
    pub power: Option<PowerReport>,
}

fn oracle_def(kind: OracleKind) -> OracleDef {
    match kind {
        OracleKind::CoolProp => OracleDef::CoolProp,
        OracleKind::SteamTable => OracleDef::SteamTable,
    }
}

/// March the well, then sweep the plant with the wellhead enthalpy.
pub fn simulate(
    compiled: &CompiledCase,
    oracle: &dyn PropertyOracle,
    timing: &mut RunTimingSummary,
) -> AppResult<CaseOutcome> {
    let started = Instant::now();
    let profile = march(oracle, compiled.march, &compiled.grid)?;
    let handoff = profile.handoff(compiled.separator.total_mass_flow)?;
    timing.march_time_s = started.elapsed().as_secs_f64();

    // Isoenthalpic rise: the wellhead carries the reservoir enthalpy
    let enthalpy = profile.reservoir_enthalpy();

    let started = Instant::now();
    let separator = compiled.separator.sweep(enthalpy).run(oracle)?;
    let power = compiled
        .power
        .map(|plan| plan.sweep(enthalpy).run(oracle))
        .transpose()?;
    timing.plant_time_s = started.elapsed().as_secs_f64();

    Ok(CaseOutcome {
        profile,
        handoff,
        separator,
        power,
    })
}

fn artifacts(outcome: &CaseOutcome) -> RunArtifacts {
    RunArtifacts {
        profile: profile_export(&outcome.profile),
        handoff: Some(outcome.handoff),
        separator: separator_rows(&outcome.separator),
        power: outcome.power.as_ref().map(power_rows).unwrap_or_default(),
    }
}

/// Resolve the case actually run, with any backend override applied.
fn effective_case(case: Case, options: &RunOptions) -> AppResult<(Case, CompiledCase)> {
    let mut case = case;
    if let Some(kind) = options.oracle {
        case.oracle = oracle_def(kind);
    }
    let compiled = compile_case(&case)?;
    Ok((case, compiled))
}

/// Run a case, or load it from the store when an identical run exists.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let case = project_service::load_case(request.case_path)?;
    let (case, compiled) = effective_case(case, &request.options)?;
    let run_id = gf_results::compute_run_id(&case, &request.options.solver_version);

    let store = RunStore::for_case(request.case_path)?;
    if request.options.use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        timing.total_time_s = started.elapsed().as_secs_f64();
        info!(run_id = %run_id, "loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let oracle = compiled.oracle.build();
    let outcome = simulate(&compiled, oracle.as_ref(), &mut timing)?;

    let save_started = Instant::now();
    let mut manifest = RunManifest::stamped(
        run_id.clone(),
        &compiled.name,
        &request.options.solver_version,
        compiled.oracle.key(),
    );
    manifest.nodes = outcome.profile.len();
    manifest.flash_depth_m = outcome.profile.flash_event().map(|e| e.depth.value);
    manifest.wellhead_pressure_pa = Some(outcome.handoff.wellhead_pressure_pa);
    manifest.wellhead_quality = Some(outcome.handoff.wellhead_quality);

    store.save_run(&manifest, &artifacts(&outcome))?;
    let manifest = store.load_manifest(&run_id)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        total_s = timing.total_time_s,
        "run saved"
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// Stored runs next to `case_path`, oldest first.
pub fn list_runs(case_path: &Path, case_name: Option<&str>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_case(case_path)?;
    Ok(store.list_runs(case_name)?)
}

pub fn load_run(case_path: &Path, run_id: &str) -> AppResult<(RunManifest, ProfileExport)> {
    let store = RunStore::for_case(case_path)?;
    let manifest = store.load_manifest(run_id)?;
    let profile = store.load_profile(run_id)?;
    Ok((manifest, profile))
}

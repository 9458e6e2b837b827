//! Case loading, templating and introspection.

use gf_project::{Case, CompiledCase, compile_case, reference_case, save_case};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// One-line description of a compiled case.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub name: String,
    pub oracle: String,
    pub nodes: usize,
    pub depth_m: f64,
    pub pressure_model: &'static str,
    pub separator_points: usize,
    pub has_power_sweep: bool,
}

/// Load, migrate and validate a YAML or JSON case.
pub fn load_case(path: &Path) -> AppResult<Case> {
    Ok(gf_project::load_case(path)?)
}

pub fn summarize(compiled: &CompiledCase) -> CaseSummary {
    CaseSummary {
        name: compiled.name.clone(),
        oracle: compiled.oracle.to_string(),
        nodes: compiled.grid.len(),
        depth_m: compiled.grid.total_depth().value,
        pressure_model: compiled.march.pressure_model.label(),
        separator_points: compiled.separator.pressures.points,
        has_power_sweep: compiled.power.is_some(),
    }
}

/// Write the reference case to `path`; format follows the extension.
pub fn write_template(path: &Path, force: bool) -> AppResult<Case> {
    if path.exists() && !force {
        return Err(AppError::FileExists {
            path: path.to_path_buf(),
        });
    }
    let case = reference_case();
    save_case(path, &case)?;
    Ok(case)
}

/// Load and compile in one step.
pub fn load_compiled(path: &Path) -> AppResult<(Case, CompiledCase)> {
    let case = load_case(path)?;
    let compiled = compile_case(&case)?;
    Ok((case, compiled))
}

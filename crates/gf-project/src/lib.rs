//! gf-project: case file format, validation and compilation.
//!
//! A case file (YAML or JSON) describes one well and its surface plant.
//! Loading migrates it to the latest schema and validates it; [`compile_case`]
//! turns it into the wellbore and plant models the solver runs.

pub mod compile;
pub mod migrate;
pub mod schema;
pub mod units;
pub mod validate;

pub use compile::{CompiledCase, PowerPlan, SeparatorPlan, compile_case};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use units::{Quantity, QuantityDef, UnitError, parse_quantity};
pub use validate::{ValidationError, validate_case};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported case file extension: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialisation format of a case file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    Yaml,
    Json,
}

impl CaseFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let mut case: Case = serde_yaml::from_str(&content)?;
    case = migrate_to_latest(case)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_yaml(path: &Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Case> {
    let content = std::fs::read_to_string(path)?;
    let mut case: Case = serde_json::from_str(&content)?;
    case = migrate_to_latest(case)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn save_json(path: &Path, case: &Case) -> ProjectResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a case, choosing the format from the file extension.
pub fn load_case(path: &Path) -> ProjectResult<Case> {
    match CaseFormat::from_path(path)? {
        CaseFormat::Yaml => load_yaml(path),
        CaseFormat::Json => load_json(path),
    }
}

/// Save a case, choosing the format from the file extension.
pub fn save_case(path: &Path, case: &Case) -> ProjectResult<()> {
    match CaseFormat::from_path(path)? {
        CaseFormat::Yaml => save_yaml(path, case),
        CaseFormat::Json => save_json(path, case),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            CaseFormat::from_path(Path::new("well.yaml")).unwrap(),
            CaseFormat::Yaml
        );
        assert_eq!(
            CaseFormat::from_path(Path::new("well.YML")).unwrap(),
            CaseFormat::Yaml
        );
        assert_eq!(
            CaseFormat::from_path(Path::new("dir/well.json")).unwrap(),
            CaseFormat::Json
        );
        assert!(matches!(
            CaseFormat::from_path(Path::new("well.toml")),
            Err(ProjectError::UnknownFormat { .. })
        ));
    }
}

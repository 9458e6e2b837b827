//! Application-level error type.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Case error: {0}")]
    Project(#[from] gf_project::ProjectError),

    #[error("Case validation failed: {0}")]
    Validation(#[from] gf_project::ValidationError),

    #[error("Wellbore march failed: {0}")]
    Wellbore(#[from] gf_wellbore::WellboreError),

    #[error("Plant sweep failed: {0}")]
    Plant(#[from] gf_plant::PlantError),

    #[error("Results error: {0}")]
    Results(#[from] gf_results::ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to overwrite existing file: {path}")]
    FileExists { path: PathBuf },
}

pub type AppResult<T> = Result<T, AppError>;

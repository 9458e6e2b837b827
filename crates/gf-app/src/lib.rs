//! Shared application service layer for geoflow.
//!
//! Loads and validates case files, runs the wellbore march followed by the
//! surface-plant sweeps, and caches the outcome in the run store.

pub mod error;
pub mod project_service;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use project_service::{CaseSummary, load_case, load_compiled, summarize, write_template};
pub use run_service::{
    CaseOutcome, RunOptions, RunRequest, RunResponse, RunTimingSummary, SOLVER_VERSION,
    ensure_run, list_runs, load_run, simulate,
};

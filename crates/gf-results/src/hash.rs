//! Content-based hashing for run IDs.

use gf_project::Case;
use sha2::{Digest, Sha256};

/// SHA-256 of the case JSON plus the solver version, as lowercase hex.
pub fn compute_run_id(case: &Case, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let case_json = serde_json::to_string(case).unwrap_or_default();
    hasher.update(case_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

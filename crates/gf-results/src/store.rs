//! Run storage API.
//!
//! ```text
//! <case dir>/.geoflow/runs/<run_id>/
//!     manifest.json  profile.csv  profile.json  handoff.json
//!     separator.csv  separator.json  power.csv
//! ```

use crate::export::{power_csv, profile_csv, separator_csv};
use crate::types::{ProfileExport, RunArtifacts, RunManifest, SeparatorRow};
use crate::{ResultsError, ResultsResult};
use gf_wellbore::WellheadHandoff;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST: &str = "manifest.json";
const PROFILE_CSV: &str = "profile.csv";
const PROFILE_JSON: &str = "profile.json";
const HANDOFF_JSON: &str = "handoff.json";
const SEPARATOR_CSV: &str = "separator.csv";
const SEPARATOR_JSON: &str = "separator.json";
const POWER_CSV: &str = "power.csv";

#[derive(Debug, Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a case file.
    pub fn for_case(case_path: &Path) -> ResultsResult<Self> {
        let case_dir = case_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "case path has no parent directory".to_string(),
            })?;
        let runs_dir = case_dir.join(".geoflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST).exists()
    }

    /// Write every artifact, then the manifest listing them.
    pub fn save_run(&self, manifest: &RunManifest, artifacts: &RunArtifacts) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let mut files = Vec::new();
        let mut write = |name: &str, content: String| -> ResultsResult<()> {
            fs::write(run_dir.join(name), content)?;
            files.push(name.to_string());
            Ok(())
        };

        write(PROFILE_CSV, profile_csv(&artifacts.profile.rows))?;
        write(PROFILE_JSON, serde_json::to_string_pretty(&artifacts.profile)?)?;
        if let Some(handoff) = &artifacts.handoff {
            write(HANDOFF_JSON, serde_json::to_string_pretty(handoff)?)?;
        }
        if !artifacts.separator.is_empty() {
            write(SEPARATOR_CSV, separator_csv(&artifacts.separator))?;
            write(SEPARATOR_JSON, serde_json::to_string_pretty(&artifacts.separator)?)?;
        }
        if !artifacts.power.is_empty() {
            write(POWER_CSV, power_csv(&artifacts.power))?;
        }

        let manifest = RunManifest {
            files,
            ..manifest.clone()
        };
        fs::write(run_dir.join(MANIFEST), serde_json::to_string_pretty(&manifest)?)?;
        Ok(())
    }

    fn load_json<T: DeserializeOwned>(&self, run_id: &str, name: &str) -> ResultsResult<T> {
        let path = self.run_dir(run_id).join(name);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        self.load_json(run_id, MANIFEST)
    }

    pub fn load_profile(&self, run_id: &str) -> ResultsResult<ProfileExport> {
        self.load_json(run_id, PROFILE_JSON)
    }

    pub fn load_handoff(&self, run_id: &str) -> ResultsResult<WellheadHandoff> {
        self.load_json(run_id, HANDOFF_JSON)
    }

    pub fn load_separator(&self, run_id: &str) -> ResultsResult<Vec<SeparatorRow>> {
        self.load_json(run_id, SEPARATOR_JSON)
    }

    /// All runs of `case_name` (every run when `None`), oldest first.
    pub fn list_runs(&self, case_name: Option<&str>) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && case_name.is_none_or(|name| manifest.case_name == name)
                {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

//! Run storage API.
//!
//! The engine never owns storage. Callers pass a [`ResultSink`] when they
//! want a finished record kept.

use crate::types::{RunManifest, StudyRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for finished study records.
pub trait ResultSink {
    fn save(&mut self, record: &StudyRecord) -> ResultsResult<()>;
}

#[derive(Clone)]
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

    /// Store kept in `.faultflow/runs` next to a study file.
    pub fn for_study(study_path: &Path) -> ResultsResult<Self> {
        let study_dir = study_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "study path has no parent directory".to_string(),
            })?;
        let runs_dir = study_dir.join(".faultflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, record: &StudyRecord) -> ResultsResult<()> {
        let run_dir = self.run_dir(&record.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(&record.manifest())?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let record_json = serde_json::to_string_pretty(record)?;
        fs::write(run_dir.join("record.json"), record_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_record(&self, run_id: &str) -> ResultsResult<StudyRecord> {
        let record_path = self.run_dir(run_id).join("record.json");

        if !record_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(record_path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// Every stored run, oldest first. Unreadable run directories are skipped.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
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

impl ResultSink for RunStore {
    fn save(&mut self, record: &StudyRecord) -> ResultsResult<()> {
        self.save_run(record)
    }
}

/// Keeps records in memory; useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<StudyRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StudyRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&StudyRecord> {
        self.records.last()
    }
}

impl ResultSink for MemorySink {
    fn save(&mut self, record: &StudyRecord) -> ResultsResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

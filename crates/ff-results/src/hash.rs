//! Content-based hashing for run IDs.

use ff_project::schema::StudyDef;
use sha2::{Digest, Sha256};

/// Hashes the study and engine version. Identical inputs run by the same
/// engine always get the same id.
pub fn compute_run_id(study: &StudyDef, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let study_json = serde_json::to_string(study).unwrap_or_default();
    hasher.update(study_json.as_bytes());
    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

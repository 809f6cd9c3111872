//! ff-project: study file format and validation.
//!
//! A study is a versioned YAML or JSON document describing the system
//! settings, optional arc-flash parameters, default overrides and the ordered
//! component list. Loading migrates older versions and validates the result.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, ValidationErrors, validate_study};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses, migrates and validates a study held in memory.
pub fn parse_yaml(content: &str) -> ProjectResult<StudyDef> {
    let study: StudyDef = serde_yaml::from_str(content)?;
    finish_load(study)
}

pub fn parse_json(content: &str) -> ProjectResult<StudyDef> {
    let study: StudyDef = serde_json::from_str(content)?;
    finish_load(study)
}

pub fn load_yaml(path: &Path) -> ProjectResult<StudyDef> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &Path, study: &StudyDef) -> ProjectResult<()> {
    validate_study(study)?;
    let content = serde_yaml::to_string(study)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<StudyDef> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

pub fn save_json(path: &Path, study: &StudyDef) -> ProjectResult<()> {
    validate_study(study)?;
    let content = serde_json::to_string_pretty(study)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> ProjectResult<StudyDef> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn finish_load(study: StudyDef) -> ProjectResult<StudyDef> {
    let study = migrate_to_latest(study)?;
    validate_study(&study)?;
    Ok(study)
}

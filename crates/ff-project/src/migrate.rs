//! Study file version upgrades.

use crate::ProjectError;
use crate::schema::StudyDef;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut study: StudyDef) -> Result<StudyDef, ProjectError> {
    while study.version < LATEST_VERSION {
        study = migrate_one_version(study)?;
    }
    Ok(study)
}

fn migrate_one_version(study: StudyDef) -> Result<StudyDef, ProjectError> {
    match study.version {
        0 => migrate_v0_to_v1(study),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files were written before arc-flash parameters could be set per
/// bus. Their layout is otherwise identical.
fn migrate_v0_to_v1(mut study: StudyDef) -> Result<StudyDef, ProjectError> {
    study.version = 1;
    Ok(study)
}

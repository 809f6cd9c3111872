//! Per-run working state.

use ff_components::ModelDefaults;
use ff_core::Ledger;
use ff_project::StudyDef;
use ff_results::LogEntry;

use crate::compile::model_defaults;

/// Everything one run accumulates. Created fresh for each invocation and
/// consumed when the result record is assembled.
#[derive(Debug)]
pub struct RunState {
    pub ledger: Ledger,
    pub log: Vec<LogEntry>,
    pub defaults: ModelDefaults,
}

impl RunState {
    pub fn new(study: &StudyDef) -> Self {
        Self {
            ledger: Ledger::new(),
            log: Vec::new(),
            defaults: model_defaults(&study.defaults),
        }
    }

    /// Append to the ordered calculation log.
    pub fn log(&mut self, stage: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(stage, "{}", message);
        self.log.push(LogEntry {
            seq: self.log.len(),
            stage: stage.to_string(),
            message,
        });
    }
}

//! Error types for study runs.

use ff_components::ComponentError;
use ff_graph::TopologyError;
use ff_project::ValidationErrors;
use ff_results::ResultsError;
use thiserror::Error;

/// Blocking failures. A run that returns one of these produced no results.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Result sink error: {0}")]
    Sink(#[from] ResultsError),

    #[error("Invalid state: {what}")]
    InvalidState { what: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

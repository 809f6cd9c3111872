//! Error types for component operations.

use ff_core::error::FfError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a component model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value for {component}: {what}")]
    NonPhysical { component: String, what: &'static str },

    #[error("Invalid argument for {component}: {what}")]
    InvalidArg { component: String, what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for FfError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what, .. } => FfError::InvalidArg { what },
            ComponentError::InvalidArg { what, .. } => FfError::InvalidArg { what },
        }
    }
}

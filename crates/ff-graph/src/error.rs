//! Topology-specific error types.

use ff_core::{BusId, FfError};
use thiserror::Error;

/// Topology construction and validation errors. All of these are blocking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A component names a bus that does not exist and cannot be created.
    #[error("Component '{component}' references unknown bus '{reference}'")]
    UnresolvedBus { component: String, reference: String },

    /// No source component (utility or generator) feeds the network.
    #[error("Network has no source: at least one utility or generator is required")]
    NoSource,

    /// More than one bus carries the source role.
    #[error("Network has {count} source buses (expected exactly 1)")]
    MultipleSources { count: usize },

    /// A connected bus cannot be reached from the source bus.
    #[error("Bus '{bus}' is connected but not reachable from the source bus")]
    Unreachable { bus: String },

    /// Two buses share a name.
    #[error("Duplicate bus name '{name}'")]
    DuplicateBus { name: String },

    /// An id does not belong to this topology.
    #[error("Bus {bus} does not exist")]
    InvalidBusRef { bus: BusId },

    /// An edge would connect a bus to itself.
    #[error("Edge from bus '{bus}' to itself")]
    SelfLoop { bus: String },
}

pub type TopologyResult<T> = Result<T, TopologyError>;

impl From<TopologyError> for FfError {
    fn from(err: TopologyError) -> Self {
        FfError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = TopologyError::UnresolvedBus {
            component: "M3".into(),
            reference: "MCC-9".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("M3"));
        assert!(msg.contains("MCC-9"));
    }

    #[test]
    fn converts_to_core_error() {
        let err: FfError = TopologyError::NoSource.into();
        assert!(matches!(err, FfError::Invariant { .. }));
    }
}

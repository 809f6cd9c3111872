//! ff-graph: bus/edge topology for faultflow.
//!
//! Provides:
//! - Core topology data structures (Bus, Edge, Topology)
//! - Incremental topology builder with connectivity validation
//! - Source-to-bus path queries used by the Thevenin aggregator
//!
//! # Example
//!
//! ```
//! use ff_components::{Impedance, ImpedanceAt};
//! use ff_core::{CompId, units::volts};
//! use ff_graph::{BusRole, TopologyBuilder};
//!
//! let mut builder = TopologyBuilder::new();
//! let main = builder.add_bus("MAIN", volts(13_800.0), BusRole::Source).unwrap();
//! let lv = builder.add_bus("LV", volts(480.0), BusRole::Load).unwrap();
//! let z = ImpedanceAt::new(Impedance::new(0.001, 0.005), volts(480.0));
//! builder.add_edge(main, lv, CompId::from_index(0), z).unwrap();
//! let (topology, report) = builder.build().unwrap();
//!
//! assert_eq!(topology.buses().len(), 2);
//! assert_eq!(topology.path_from_source(lv).len(), 1);
//! assert!(report.isolated.is_empty());
//! ```

pub mod builder;
pub mod error;
pub mod topology;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{BuildReport, TopologyBuilder};
pub use error::{TopologyError, TopologyResult};
pub use topology::{Bus, BusRole, Edge, Topology};

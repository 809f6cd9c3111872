//! ff-engine: fault-current, motor-contribution and arc-flash engine.
//!
//! A run is a chain of pure stages over a fresh [`RunState`]:
//!
//! 1. Blocking validation of the study.
//! 2. Plausibility checks on the inputs (ledger warnings only).
//! 3. Sequential topology walk, compiling each component's impedance model.
//! 4. Thevenin aggregation per bus, with every impedance referred to the bus
//!    voltage.
//! 5. Short-circuit currents (IEEE or IEC 60909).
//! 6. Motor contributions summed per bus.
//! 7. Arc-flash incident energy and PPE category.
//!
//! The result is an immutable [`ff_results::StudyRecord`]. Storage is left to
//! the caller through [`ff_results::ResultSink`].
//!
//! # Example
//!
//! ```
//! let study = ff_project::parse_yaml(r#"
//! version: 1
//! name: doc
//! system: { voltage_v: 480 }
//! components:
//!   - id: u
//!     kind: { type: utility, fault_current_ka: 30, x_r: 8 }
//! "#).unwrap();
//! let record = ff_engine::run_study(&study).unwrap();
//! let bus = record.bus("BUS-1").unwrap();
//! assert!((bus.fault.as_ref().unwrap().three_phase.ka - 30.0).abs() < 1e-9);
//! ```

pub mod arc_flash;
pub mod compile;
pub mod error;
pub mod motors;
pub mod pipeline;
pub mod plausibility;
pub mod short_circuit;
pub mod state;
pub mod thevenin;
pub mod topology;

pub use error::{EngineError, EngineResult};
pub use pipeline::{ENGINE_VERSION, run_and_save, run_study};
pub use state::RunState;
pub use topology::{Network, SOURCE_BUS, build_network};

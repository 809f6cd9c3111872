//! ff-core: stable foundation for faultflow.
//!
//! Contains:
//! - units (uom SI types + constructors, including the A/kA and V/kV boundary)
//! - numeric (Real + tolerances + guarded float helpers)
//! - ids (stable compact IDs for buses, components and edges)
//! - ledger (ordered assumption/warning ledger shared by every stage)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod ledger;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FfError, FfResult};
pub use ids::*;
pub use ledger::{EntryKind, Ledger, LedgerEntry};
pub use numeric::*;
pub use units::*;

//! ff-components: impedance models for distribution network components.
//!
//! Provides native-voltage R/X models for:
//! - Utility sources (from short-circuit MVA or fault current)
//! - Two-winding transformers (percent impedance on rating)
//! - Cables (per-km ratings with temperature correction)
//! - Motors (locked-rotor model, also used for contribution currents)
//! - Generators (subtransient reactance)
//!
//! All network components implement the `ImpedanceModel` trait and report an
//! `ImpedanceAt`: an R/X pair tied to the voltage at which it is valid.
//! Referral between voltage levels lives in `impedance::refer`.
//!
//! # Example
//!
//! ```
//! use ff_components::{ImpedanceModel, ShortCircuitLevel, Utility};
//! use ff_core::{Ledger, units::{kv, mva}};
//!
//! let utility = Utility::new("U1", kv(13.2), ShortCircuitLevel::Power(mva(100.0)), 10.0);
//! let mut ledger = Ledger::new();
//! let z = utility.impedance(&mut ledger).unwrap();
//! assert!((z.z.magnitude() - 1.7424).abs() < 1e-6);
//! ```

pub mod cable;
pub mod common;
pub mod defaults;
pub mod error;
pub mod generator;
pub mod impedance;
pub mod motor;
pub mod traits;
pub mod transformer;
pub mod utility;

// Re-exports
pub use cable::{Cable, ConductorMaterial};
pub use defaults::{MotorDefaults, ModelDefaults, XrBand};
pub use error::{ComponentError, ComponentResult};
pub use generator::Generator;
pub use impedance::{Impedance, ImpedanceAt, refer};
pub use motor::{LockedRotor, Motor, MotorKind};
pub use traits::ImpedanceModel;
pub use transformer::{PowerUnit, Transformer};
pub use utility::{ShortCircuitLevel, Utility};

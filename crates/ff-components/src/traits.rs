//! Core trait for component impedance models.

use crate::error::ComponentResult;
use crate::impedance::ImpedanceAt;
use ff_core::Ledger;
use ff_core::units::Voltage;

/// A network element that contributes series impedance to a fault path.
///
/// Models are deterministic functions of their ratings. Anything a model
/// has to guard against (a degenerate denominator, a clamped ratio) is
/// recorded to the run's ledger instead of failing.
pub trait ImpedanceModel: Send + Sync {
    /// Component name for logging and ledger subjects.
    fn name(&self) -> &str;

    /// Voltage at which `impedance` is expressed.
    fn native_voltage(&self) -> Voltage;

    /// Compute the native-voltage R/X pair.
    fn impedance(&self, ledger: &mut Ledger) -> ComponentResult<ImpedanceAt>;
}

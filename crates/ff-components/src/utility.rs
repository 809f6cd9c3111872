//! Utility (infinite-bus equivalent) source.

use crate::common::{FALLBACK_IMPEDANCE, check_positive};
use crate::error::ComponentResult;
use crate::impedance::{Impedance, ImpedanceAt};
use crate::traits::ImpedanceModel;
use ff_core::Ledger;
use ff_core::units::constants::SQRT_3;
use ff_core::units::{Current, Power, Voltage, amps};

/// How the utility's available fault level is stated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortCircuitLevel {
    /// Three-phase short-circuit power.
    Power(Power),
    /// Three-phase symmetrical fault current. Build kA inputs with
    /// `ff_core::units::ka` so the conversion to amperes happens once.
    Current(Current),
}

/// Utility source modeled as a Thevenin impedance behind the point of supply.
#[derive(Debug, Clone)]
pub struct Utility {
    name: String,
    /// Line-to-line voltage at the point of supply
    pub voltage: Voltage,
    pub level: ShortCircuitLevel,
    pub x_r: f64,
}

impl Utility {
    pub fn new(name: impl Into<String>, voltage: Voltage, level: ShortCircuitLevel, x_r: f64) -> Self {
        Self {
            name: name.into(),
            voltage,
            level,
            x_r,
        }
    }

    /// Available three-phase fault current at the point of supply.
    pub fn available_current(&self) -> Current {
        match self.level {
            ShortCircuitLevel::Current(i) => i,
            ShortCircuitLevel::Power(s) => amps(s.value / (SQRT_3 * self.voltage.value)),
        }
    }
}

impl ImpedanceModel for Utility {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_voltage(&self) -> Voltage {
        self.voltage
    }

    fn impedance(&self, ledger: &mut Ledger) -> ComponentResult<ImpedanceAt> {
        let v = self.voltage.value;
        check_positive(v, &self.name, "utility voltage")?;
        check_positive(self.x_r, &self.name, "utility X/R")?;

        let z = match self.level {
            // Z = V² / S_sc
            ShortCircuitLevel::Power(s) => ledger.guarded_div(
                v * v,
                s.value,
                FALLBACK_IMPEDANCE,
                &self.name,
                "utility impedance from fault MVA",
            ),
            // Z = V / (√3 · I_sc), I_sc in amperes
            ShortCircuitLevel::Current(i) => ledger.guarded_div(
                v,
                SQRT_3 * i.value,
                FALLBACK_IMPEDANCE,
                &self.name,
                "utility impedance from fault current",
            ),
        };

        Ok(ImpedanceAt::new(
            Impedance::from_magnitude(z, self.x_r),
            self.voltage,
        ))
    }
}

//! Motor locked-rotor model.
//!
//! Motors never join the network's Thevenin impedance; the engine treats
//! them as parallel current sources. The locked-rotor impedance is still
//! computed so it can be reported alongside the contribution currents.

use crate::common::{FALLBACK_IMPEDANCE, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::impedance::{Impedance, ImpedanceAt};
use crate::traits::ImpedanceModel;
use ff_core::Ledger;
use ff_core::units::constants::SQRT_3;
use ff_core::units::{Current, Power, Voltage, amps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MotorKind {
    #[default]
    Induction,
    Synchronous,
}

/// Full-load and locked-rotor figures for one machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockedRotor {
    pub fla: Current,
    pub lra: Current,
    pub z: ImpedanceAt,
}

#[derive(Debug, Clone)]
pub struct Motor {
    name: String,
    pub kind: MotorKind,
    pub voltage: Voltage,
    /// Rated shaft output power
    pub rated_power: Power,
    pub efficiency: f64,
    pub power_factor: f64,
    pub locked_rotor_multiplier: f64,
    pub locked_rotor_x_r: f64,
    /// Number of identical machines represented by this entry
    pub quantity: u32,
}

impl Motor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kind: MotorKind,
        voltage: Voltage,
        rated_power: Power,
        efficiency: f64,
        power_factor: f64,
        locked_rotor_multiplier: f64,
        locked_rotor_x_r: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            voltage,
            rated_power,
            efficiency,
            power_factor,
            locked_rotor_multiplier,
            locked_rotor_x_r,
            quantity,
        }
    }

    fn check(&self) -> ComponentResult<()> {
        check_positive(self.voltage.value, &self.name, "motor voltage")?;
        check_positive(self.rated_power.value, &self.name, "motor rated power")?;
        check_positive(self.locked_rotor_multiplier, &self.name, "locked rotor multiplier")?;
        check_positive(self.locked_rotor_x_r, &self.name, "locked rotor X/R")?;
        for (value, what) in [
            (self.efficiency, "motor efficiency"),
            (self.power_factor, "motor power factor"),
        ] {
            check_positive(value, &self.name, what)?;
            if value > 1.0 {
                return Err(ComponentError::NonPhysical {
                    component: self.name.clone(),
                    what,
                });
            }
        }
        if self.quantity == 0 {
            return Err(ComponentError::InvalidArg {
                component: self.name.clone(),
                what: "motor quantity must be at least 1",
            });
        }
        Ok(())
    }

    /// FLA = P / (√3 · V · η · pf).
    pub fn full_load_current(&self, ledger: &mut Ledger) -> Current {
        let den = SQRT_3 * self.voltage.value * self.efficiency * self.power_factor;
        amps(ledger.guarded_div(
            self.rated_power.value,
            den,
            0.0,
            &self.name,
            "motor full load current",
        ))
    }

    /// Full-load, locked-rotor current and locked-rotor impedance of a single machine.
    pub fn locked_rotor(&self, ledger: &mut Ledger) -> ComponentResult<LockedRotor> {
        self.check()?;
        let fla = self.full_load_current(ledger);
        let lra = fla * self.locked_rotor_multiplier;
        // Z = V / (√3 · LRA)
        let z = ledger.guarded_div(
            self.voltage.value,
            SQRT_3 * lra.value,
            FALLBACK_IMPEDANCE,
            &self.name,
            "motor locked rotor impedance",
        );
        Ok(LockedRotor {
            fla,
            lra,
            z: ImpedanceAt::new(
                Impedance::from_magnitude(z, self.locked_rotor_x_r),
                self.voltage,
            ),
        })
    }
}

impl ImpedanceModel for Motor {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_voltage(&self) -> Voltage {
        self.voltage
    }

    fn impedance(&self, ledger: &mut Ledger) -> ComponentResult<ImpedanceAt> {
        Ok(self.locked_rotor(ledger)?.z)
    }
}

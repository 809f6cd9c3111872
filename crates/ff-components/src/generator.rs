//! Synchronous generator modeled by its subtransient reactance.

use crate::common::{FALLBACK_IMPEDANCE, check_positive};
use crate::error::ComponentResult;
use crate::impedance::{Impedance, ImpedanceAt};
use crate::traits::ImpedanceModel;
use ff_core::Ledger;
use ff_core::units::{Power, Voltage};

#[derive(Debug, Clone)]
pub struct Generator {
    name: String,
    pub voltage: Voltage,
    /// Rated apparent power
    pub rating: Power,
    /// Subtransient reactance X''d in percent on the machine base
    pub subtransient_pct: f64,
    pub x_r: f64,
}

impl Generator {
    pub fn new(
        name: impl Into<String>,
        voltage: Voltage,
        rating: Power,
        subtransient_pct: f64,
        x_r: f64,
    ) -> Self {
        Self {
            name: name.into(),
            voltage,
            rating,
            subtransient_pct,
            x_r,
        }
    }
}

impl ImpedanceModel for Generator {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_voltage(&self) -> Voltage {
        self.voltage
    }

    fn impedance(&self, ledger: &mut Ledger) -> ComponentResult<ImpedanceAt> {
        let v = self.voltage.value;
        check_positive(v, &self.name, "generator voltage")?;
        check_positive(self.subtransient_pct, &self.name, "subtransient reactance")?;
        check_positive(self.x_r, &self.name, "generator X/R")?;

        let z_base = ledger.guarded_div(
            v * v,
            self.rating.value,
            FALLBACK_IMPEDANCE,
            &self.name,
            "generator base impedance",
        );
        let z = z_base * self.subtransient_pct / 100.0;
        Ok(ImpedanceAt::new(
            Impedance::from_magnitude(z, self.x_r),
            self.voltage,
        ))
    }
}

//! Two-winding transformer modeled by percent impedance on its own rating.

use crate::common::{FALLBACK_IMPEDANCE, check_positive};
use crate::error::ComponentResult;
use crate::impedance::{Impedance, ImpedanceAt};
use crate::traits::ImpedanceModel;
use ff_core::Ledger;
use ff_core::units::{Power, Voltage, kva, mva, to_mva};

/// Unit tag for a transformer's rated power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerUnit {
    #[cfg_attr(feature = "serde", serde(rename = "kVA", alias = "kva"))]
    Kva,
    #[cfg_attr(feature = "serde", serde(rename = "MVA", alias = "mva"))]
    Mva,
}

impl PowerUnit {
    /// Untagged ratings are read as kVA for secondaries up to 1 kV and as
    /// MVA above that.
    pub fn infer_from_secondary(secondary: Voltage) -> PowerUnit {
        if secondary.value <= 1000.0 {
            PowerUnit::Kva
        } else {
            PowerUnit::Mva
        }
    }

    pub fn apply(self, value: f64) -> Power {
        match self {
            PowerUnit::Kva => kva(value),
            PowerUnit::Mva => mva(value),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUnit::Kva => "kVA",
            PowerUnit::Mva => "MVA",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transformer {
    name: String,
    pub primary: Voltage,
    pub secondary: Voltage,
    /// Rated apparent power
    pub rating: Power,
    /// Percent impedance on the transformer's own base
    pub percent_z: f64,
    pub x_r: f64,
}

impl Transformer {
    pub fn new(
        name: impl Into<String>,
        primary: Voltage,
        secondary: Voltage,
        rating: Power,
        percent_z: f64,
        x_r: f64,
    ) -> Self {
        Self {
            name: name.into(),
            primary,
            secondary,
            rating,
            percent_z,
            x_r,
        }
    }

    pub fn rating_mva(&self) -> f64 {
        to_mva(self.rating)
    }

    /// Base impedance on the secondary side, V_sec² / S.
    pub fn base_impedance(&self, ledger: &mut Ledger) -> f64 {
        let v = self.secondary.value;
        ledger.guarded_div(
            v * v,
            self.rating.value,
            FALLBACK_IMPEDANCE,
            &self.name,
            "transformer base impedance",
        )
    }
}

impl ImpedanceModel for Transformer {
    fn name(&self) -> &str {
        &self.name
    }

    /// Transformer impedance is expressed on the secondary side.
    fn native_voltage(&self) -> Voltage {
        self.secondary
    }

    fn impedance(&self, ledger: &mut Ledger) -> ComponentResult<ImpedanceAt> {
        check_positive(self.primary.value, &self.name, "primary voltage")?;
        check_positive(self.secondary.value, &self.name, "secondary voltage")?;
        check_positive(self.percent_z, &self.name, "percent impedance")?;
        check_positive(self.x_r, &self.name, "transformer X/R")?;

        let z = self.base_impedance(ledger) * self.percent_z / 100.0;
        Ok(ImpedanceAt::new(
            Impedance::from_magnitude(z, self.x_r),
            self.secondary,
        ))
    }
}

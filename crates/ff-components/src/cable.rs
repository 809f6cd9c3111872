//! Cable run with per-km ratings and conductor temperature correction.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::impedance::{Impedance, ImpedanceAt};
use crate::traits::ImpedanceModel;
use ff_core::Ledger;
use ff_core::units::{Length, Voltage};

/// Reference temperature of tabulated conductor resistance (°C).
pub const REFERENCE_TEMPERATURE_C: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConductorMaterial {
    #[default]
    Copper,
    #[cfg_attr(feature = "serde", serde(alias = "aluminium"))]
    Aluminum,
}

impl ConductorMaterial {
    /// Inferred absolute-zero-resistance temperature (°C, magnitude).
    pub fn temperature_constant(self) -> f64 {
        match self {
            ConductorMaterial::Copper => 234.5,
            ConductorMaterial::Aluminum => 228.1,
        }
    }

    /// R(T) / R(20 °C) for a linear resistance-temperature model.
    pub fn resistance_factor(self, temperature_c: f64) -> f64 {
        let k = self.temperature_constant();
        (k + temperature_c) / (k + REFERENCE_TEMPERATURE_C)
    }
}

#[derive(Debug, Clone)]
pub struct Cable {
    name: String,
    /// Voltage at which the cable operates
    pub voltage: Voltage,
    pub length: Length,
    /// Resistance per km at 20 °C
    pub r20_ohm_per_km: f64,
    /// Reactance per km
    pub x_ohm_per_km: f64,
    /// Conductor operating temperature
    pub temperature_c: f64,
    pub material: ConductorMaterial,
    /// Number of identical parallel sets
    pub sets: u32,
}

impl Cable {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        voltage: Voltage,
        length: Length,
        r20_ohm_per_km: f64,
        x_ohm_per_km: f64,
        temperature_c: f64,
        material: ConductorMaterial,
        sets: u32,
    ) -> Self {
        Self {
            name: name.into(),
            voltage,
            length,
            r20_ohm_per_km,
            x_ohm_per_km,
            temperature_c,
            material,
            sets,
        }
    }

    /// Resistance per km at the operating temperature.
    pub fn r_ohm_per_km_at_temperature(&self) -> f64 {
        self.r20_ohm_per_km * self.material.resistance_factor(self.temperature_c)
    }
}

impl ImpedanceModel for Cable {
    fn name(&self) -> &str {
        &self.name
    }

    fn native_voltage(&self) -> Voltage {
        self.voltage
    }

    fn impedance(&self, _ledger: &mut Ledger) -> ComponentResult<ImpedanceAt> {
        check_positive(self.voltage.value, &self.name, "cable voltage")?;
        check_positive(self.length.value, &self.name, "cable length")?;
        check_positive(self.r20_ohm_per_km, &self.name, "cable resistance")?;
        check_finite(self.x_ohm_per_km, &self.name, "cable reactance")?;
        if self.x_ohm_per_km < 0.0 {
            return Err(ComponentError::NonPhysical {
                component: self.name.clone(),
                what: "cable reactance",
            });
        }
        if self.sets == 0 {
            return Err(ComponentError::InvalidArg {
                component: self.name.clone(),
                what: "parallel sets must be at least 1",
            });
        }
        check_finite(self.temperature_c, &self.name, "conductor temperature")?;

        // Ratings are per km; length is in metres.
        let km = self.length.value / 1000.0;
        let sets = f64::from(self.sets);
        let z = Impedance::new(
            self.r_ohm_per_km_at_temperature() * km / sets,
            self.x_ohm_per_km * km / sets,
        );
        Ok(ImpedanceAt::new(z, self.voltage))
    }
}

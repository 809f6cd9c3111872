//! Named, overridable defaults for ratings the input may leave out.
//!
//! These are industry rules of thumb (IEEE 141 / IEEE 399 typical values),
//! not physical truth. Callers override them per study; every use of one is
//! recorded to the ledger by the code that applies it.

use crate::motor::MotorKind;

/// One row of the transformer X/R table: ratings strictly below `below_mva`
/// use `x_r`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XrBand {
    pub below_mva: f64,
    pub x_r: f64,
}

/// Defaults that differ between induction and synchronous machines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorDefaults {
    pub locked_rotor_multiplier: f64,
    pub locked_rotor_x_r: f64,
    /// Fraction of LRA still flowing at interrupting time.
    pub interrupting_decay: f64,
    /// Multiple of FLA used for the sustained contribution.
    pub sustained_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefaults {
    pub utility_x_r: f64,
    pub generator_x_r: f64,
    /// Transformer X/R bands in ascending `below_mva` order.
    pub transformer_x_r_bands: Vec<XrBand>,
    /// X/R for ratings at or above the last band.
    pub transformer_x_r_above: f64,
    pub cable_temperature_c: f64,
    pub motor_efficiency: f64,
    pub motor_power_factor: f64,
    pub induction: MotorDefaults,
    pub synchronous: MotorDefaults,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            utility_x_r: 15.0,
            generator_x_r: 40.0,
            transformer_x_r_bands: vec![
                XrBand {
                    below_mva: 1.0,
                    x_r: 20.0,
                },
                XrBand {
                    below_mva: 2.5,
                    x_r: 14.3,
                },
                XrBand {
                    below_mva: 5.0,
                    x_r: 10.0,
                },
                XrBand {
                    below_mva: 10.0,
                    x_r: 6.67,
                },
            ],
            transformer_x_r_above: 5.0,
            cable_temperature_c: 75.0,
            motor_efficiency: 0.93,
            motor_power_factor: 0.85,
            induction: MotorDefaults {
                locked_rotor_multiplier: 6.0,
                locked_rotor_x_r: 15.0,
                interrupting_decay: 0.75,
                sustained_multiplier: 4.0,
            },
            synchronous: MotorDefaults {
                locked_rotor_multiplier: 5.5,
                locked_rotor_x_r: 20.0,
                interrupting_decay: 0.85,
                sustained_multiplier: 5.0,
            },
        }
    }
}

impl ModelDefaults {
    /// Banded transformer X/R for a rating in MVA.
    pub fn transformer_x_r(&self, rating_mva: f64) -> f64 {
        self.transformer_x_r_bands
            .iter()
            .find(|band| rating_mva < band.below_mva)
            .map_or(self.transformer_x_r_above, |band| band.x_r)
    }

    pub fn motor(&self, kind: MotorKind) -> &MotorDefaults {
        match kind {
            MotorKind::Induction => &self.induction,
            MotorKind::Synchronous => &self.synchronous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformer_bands() {
        let d = ModelDefaults::default();
        assert_eq!(d.transformer_x_r(0.5), 20.0);
        assert_eq!(d.transformer_x_r(1.0), 14.3);
        assert_eq!(d.transformer_x_r(2.0), 14.3);
        assert_eq!(d.transformer_x_r(2.5), 10.0);
        assert_eq!(d.transformer_x_r(7.5), 6.67);
        assert_eq!(d.transformer_x_r(10.0), 5.0);
        assert_eq!(d.transformer_x_r(50.0), 5.0);
    }

    #[test]
    fn motor_defaults_by_kind() {
        let d = ModelDefaults::default();
        assert_eq!(d.motor(MotorKind::Induction).locked_rotor_multiplier, 6.0);
        assert_eq!(d.motor(MotorKind::Synchronous).locked_rotor_multiplier, 5.5);
        assert_eq!(d.motor(MotorKind::Induction).locked_rotor_x_r, 15.0);
        assert_eq!(d.motor(MotorKind::Synchronous).locked_rotor_x_r, 20.0);
    }
}

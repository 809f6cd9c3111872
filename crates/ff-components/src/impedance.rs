//! Impedance pairs and referral between voltage levels.

use crate::common::EPSILON_RESISTANCE;
use ff_core::numeric::NEAR_ZERO;
use ff_core::units::Voltage;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A series R/X pair in ohms.
///
/// |Z| and X/R are always derived from `r` and `x`, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impedance {
    pub r: f64,
    pub x: f64,
}

impl Impedance {
    pub const ZERO: Impedance = Impedance { r: 0.0, x: 0.0 };

    pub fn new(r: f64, x: f64) -> Self {
        Self { r, x }
    }

    /// Split a magnitude into R and X using an X/R ratio.
    ///
    /// R = |Z| / √(1 + (X/R)²), X = R · X/R.
    pub fn from_magnitude(z: f64, x_over_r: f64) -> Self {
        let r = z / (1.0 + x_over_r * x_over_r).sqrt();
        Self { r, x: r * x_over_r }
    }

    /// |Z| = √(R² + X²).
    pub fn magnitude(&self) -> f64 {
        self.r.hypot(self.x)
    }

    /// X/R with the resistance floored at a small epsilon.
    pub fn x_over_r(&self) -> f64 {
        self.x / self.r.max(EPSILON_RESISTANCE)
    }

    /// True when R is too small for X/R to be meaningful.
    pub fn has_negligible_r(&self) -> bool {
        self.r < EPSILON_RESISTANCE
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            r: self.r * factor,
            x: self.x * factor,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.x.is_finite()
    }
}

impl Add for Impedance {
    type Output = Impedance;

    fn add(self, rhs: Impedance) -> Impedance {
        Impedance {
            r: self.r + rhs.r,
            x: self.x + rhs.x,
        }
    }
}

impl AddAssign for Impedance {
    fn add_assign(&mut self, rhs: Impedance) {
        self.r += rhs.r;
        self.x += rhs.x;
    }
}

impl Sum for Impedance {
    fn sum<I: Iterator<Item = Impedance>>(iter: I) -> Impedance {
        iter.fold(Impedance::ZERO, Add::add)
    }
}

/// Refer an impedance from one nominal voltage to another.
///
/// `Z_to = Z_from · (V_to / V_from)²`. Equal voltages return `z` unchanged.
/// A non-positive source voltage cannot be referred and also returns `z`;
/// voltages are validated positive before any model is built.
pub fn refer(z: Impedance, v_from: Voltage, v_to: Voltage) -> Impedance {
    if v_from == v_to || v_from.value <= NEAR_ZERO {
        return z;
    }
    let ratio = v_to.value / v_from.value;
    z.scaled(ratio * ratio)
}

/// An impedance together with the voltage at which it is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpedanceAt {
    pub z: Impedance,
    pub voltage: Voltage,
}

impl ImpedanceAt {
    pub fn new(z: Impedance, voltage: Voltage) -> Self {
        Self { z, voltage }
    }

    /// The same physical impedance expressed at `voltage`.
    pub fn referred_to(&self, voltage: Voltage) -> ImpedanceAt {
        ImpedanceAt {
            z: refer(self.z, self.voltage, voltage),
            voltage,
        }
    }

    /// True when this impedance was computed at a different voltage.
    pub fn needs_referral(&self, voltage: Voltage) -> bool {
        self.voltage != voltage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::units::{kv, volts};

    #[test]
    fn magnitude_and_ratio() {
        let z = Impedance::new(3.0, 4.0);
        assert_eq!(z.magnitude(), 5.0);
        assert!((z.x_over_r() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn split_by_x_over_r_preserves_magnitude() {
        let z = Impedance::from_magnitude(1.7424, 10.0);
        assert!((z.magnitude() - 1.7424).abs() < 1e-12);
        assert!((z.x_over_r() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_resistance_ratio_is_bounded() {
        let z = Impedance::new(0.0, 0.5);
        assert!(z.has_negligible_r());
        assert!(z.x_over_r().is_finite());
    }

    #[test]
    fn identity_referral_is_exact() {
        let z = Impedance::new(0.004865, 0.013346);
        assert_eq!(refer(z, volts(440.0), volts(440.0)), z);
    }

    #[test]
    fn step_down_divides_by_square_of_ratio() {
        // 13.8 kV -> 480 V: ratio 1/28.75, factor 1/826.5625
        let z = Impedance::new(1.0, 2.0);
        let low = refer(z, kv(13.8), volts(480.0));
        let factor = (480.0_f64 / 13_800.0).powi(2);
        assert!((low.r - factor).abs() < 1e-15);
        assert!((low.x - 2.0 * factor).abs() < 1e-15);
        assert!(low.r < z.r);
    }

    #[test]
    fn step_up_multiplies_by_square_of_ratio() {
        let z = Impedance::new(0.01, 0.05);
        let high = refer(z, volts(480.0), kv(4.16));
        let factor = (4160.0_f64 / 480.0).powi(2);
        assert!((high.r - 0.01 * factor).abs() < 1e-12);
        assert!((high.x - 0.05 * factor).abs() < 1e-12);
        assert!(high.r > z.r);
    }

    #[test]
    fn impedance_at_referral_tracks_voltage() {
        let at = ImpedanceAt::new(Impedance::new(1.0, 1.0), kv(12.47));
        assert!(at.needs_referral(volts(480.0)));
        let low = at.referred_to(volts(480.0));
        assert_eq!(low.voltage, volts(480.0));
        assert!(!low.needs_referral(volts(480.0)));
    }

    #[test]
    fn sum_of_impedances() {
        let total: Impedance = [Impedance::new(1.0, 2.0), Impedance::new(0.5, 0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Impedance::new(1.5, 2.5));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use ff_core::numeric::{Tolerances, nearly_equal};
    use ff_core::units::volts;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn refer_round_trip(
            r in 1e-6_f64..100.0,
            x in 1e-6_f64..100.0,
            v1 in 100.0_f64..500_000.0,
            v2 in 100.0_f64..500_000.0,
        ) {
            let z = Impedance::new(r, x);
            let back = refer(refer(z, volts(v1), volts(v2)), volts(v2), volts(v1));
            let tol = Tolerances { abs: 1e-12, rel: 1e-9 };
            prop_assert!(nearly_equal(back.r, z.r, tol));
            prop_assert!(nearly_equal(back.x, z.x, tol));
        }

        #[test]
        fn refer_identity(r in 0.0_f64..100.0, x in 0.0_f64..100.0, v in 1.0_f64..1e6) {
            let z = Impedance::new(r, x);
            prop_assert_eq!(refer(z, volts(v), volts(v)), z);
        }

        #[test]
        fn referral_preserves_x_over_r(
            r in 1e-3_f64..10.0,
            x in 1e-3_f64..10.0,
            v1 in 100.0_f64..100_000.0,
            v2 in 100.0_f64..100_000.0,
        ) {
            let z = Impedance::new(r, x);
            let moved = refer(z, volts(v1), volts(v2));
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(moved.x_over_r(), z.x_over_r(), tol));
        }
    }
}

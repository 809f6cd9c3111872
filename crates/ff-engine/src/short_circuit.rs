//! Symmetrical, asymmetrical and peak short-circuit currents.
//!
//! Three-phase current follows I = c·V / (√3·|Z|). Unbalanced fault types
//! use fixed ratios of the three-phase value rather than a sequence-network
//! solution.

use std::f64::consts::{PI, SQRT_2};

use ff_components::Impedance;
use ff_core::units::constants::SQRT_3;
use ff_project::{LvToleranceDef, StandardDef, StudyCaseDef, SystemDef};
use ff_results::{FaultCurrent, FaultResult};

pub const LINE_GROUND_RATIO: f64 = 0.80;
pub const LINE_LINE_RATIO: f64 = 0.87;
pub const DOUBLE_LINE_GROUND_RATIO: f64 = 0.95;

/// Upper bound of the low-voltage range for IEC voltage factors.
const LV_LIMIT_V: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultSettings {
    pub standard: StandardDef,
    pub case: StudyCaseDef,
    pub lv_tolerance: LvToleranceDef,
    pub frequency_hz: f64,
}

impl FaultSettings {
    pub fn from_system(system: &SystemDef) -> Self {
        Self {
            standard: system.standard,
            case: system.case,
            lv_tolerance: system.iec_lv_tolerance,
            frequency_hz: system.frequency_hz,
        }
    }
}

/// IEC 60909 voltage factor c. Always 1.0 under IEEE.
pub fn c_factor(settings: &FaultSettings, voltage_v: f64) -> f64 {
    match settings.standard {
        StandardDef::Ieee => 1.0,
        StandardDef::Iec60909 => {
            let low_voltage = voltage_v <= LV_LIMIT_V;
            match (settings.case, low_voltage) {
                (StudyCaseDef::Maximum, true) => match settings.lv_tolerance {
                    LvToleranceDef::SixPercent => 1.05,
                    LvToleranceDef::TenPercent => 1.10,
                },
                (StudyCaseDef::Minimum, true) => 0.95,
                (StudyCaseDef::Maximum, false) => 1.10,
                (StudyCaseDef::Minimum, false) => 1.00,
            }
        }
    }
}

/// Ratio of first-cycle asymmetrical RMS to symmetrical current,
/// √(1 + 2·e^(−4π/(X/R))), held within [1, √3].
pub fn asymmetry_multiplier(x_r: f64) -> f64 {
    if !x_r.is_finite() {
        return if x_r > 0.0 { SQRT_3 } else { 1.0 };
    }
    if x_r <= 0.0 {
        return 1.0;
    }
    (1.0 + 2.0 * (-4.0 * PI / x_r).exp()).sqrt().clamp(1.0, SQRT_3)
}

/// IEC 60909 peak factor κ = 1.02 + 0.98·e^(−3/(X/R)).
pub fn kappa(x_r: f64) -> f64 {
    if x_r <= 0.0 || x_r.is_nan() {
        return 1.02;
    }
    1.02 + 0.98 * (-3.0 / x_r).exp()
}

/// Fault MVA for a current in amperes at a line-to-line voltage.
pub fn fault_mva(voltage_v: f64, current_a: f64) -> f64 {
    SQRT_3 * voltage_v * current_a / 1e6
}

/// DC offset decay time constant τ = X / (2π·f·R).
pub fn time_constant(x_r: f64, frequency_hz: f64) -> f64 {
    x_r / (2.0 * PI * frequency_hz)
}

/// Fault currents at a bus from its Thevenin impedance. `z` must have a
/// non-negligible magnitude.
pub fn compute(z: Impedance, voltage_v: f64, settings: &FaultSettings) -> FaultResult {
    let c = c_factor(settings, voltage_v);
    let i3 = c * voltage_v / (SQRT_3 * z.magnitude());
    let x_r = z.x_over_r();
    let multiplier = asymmetry_multiplier(x_r);

    let (peak_a, k) = match settings.standard {
        StandardDef::Ieee => (i3 * SQRT_2 * multiplier, None),
        StandardDef::Iec60909 => {
            let k = kappa(x_r);
            (k * SQRT_2 * i3, Some(k))
        }
    };

    FaultResult {
        standard: settings.standard,
        three_phase: FaultCurrent::from_amps(i3),
        line_ground: FaultCurrent::from_amps(i3 * LINE_GROUND_RATIO),
        line_line: FaultCurrent::from_amps(i3 * LINE_LINE_RATIO),
        double_line_ground: FaultCurrent::from_amps(i3 * DOUBLE_LINE_GROUND_RATIO),
        asymmetrical_ka: i3 * multiplier / 1000.0,
        peak_ka: peak_a / 1000.0,
        fault_mva: fault_mva(voltage_v, i3),
        tau_s: time_constant(x_r, settings.frequency_hz),
        x_r,
        asymmetry_multiplier: multiplier,
        c_factor: c,
        kappa: k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ieee() -> FaultSettings {
        FaultSettings {
            standard: StandardDef::Ieee,
            case: StudyCaseDef::Maximum,
            lv_tolerance: LvToleranceDef::SixPercent,
            frequency_hz: 60.0,
        }
    }

    #[test]
    fn reference_440v_case() {
        // |Z| chosen so that 440 V drives 17.9 kA.
        let z_mag = 440.0 / (SQRT_3 * 17_900.0);
        let z = Impedance::from_magnitude(z_mag, 2.74);
        let r = compute(z, 440.0, &ieee());
        assert!((r.three_phase.ka - 17.9).abs() < 1e-9);
        assert!((r.fault_mva - 13.64).abs() < 0.01);
        assert!((r.x_r - 2.74).abs() < 1e-9);
        assert!((r.line_ground.ka - 17.9 * 0.80).abs() < 1e-9);
        assert!((r.line_line.ka - 17.9 * 0.87).abs() < 1e-9);
        assert!((r.double_line_ground.ka - 17.9 * 0.95).abs() < 1e-9);
        assert_eq!(r.c_factor, 1.0);
        assert!(r.kappa.is_none());
        assert!(r.peak_ka > r.asymmetrical_ka);
    }

    #[test]
    fn reference_440v_impedance() {
        let r = compute(Impedance::new(0.004865, 0.013346), 440.0, &ieee());
        assert!((r.three_phase.ka - 17.9).abs() < 0.05);
        assert!((r.fault_mva - 13.6).abs() < 0.05);
        assert!((r.x_r - 2.74).abs() < 0.01);
        assert!((r.tau_s - 2.7433 / (2.0 * PI * 60.0)).abs() < 1e-4);
    }

    #[test]
    fn iec_voltage_factors() {
        let mut s = ieee();
        s.standard = StandardDef::Iec60909;
        assert_eq!(c_factor(&s, 400.0), 1.05);
        assert_eq!(c_factor(&s, 11_000.0), 1.10);
        s.lv_tolerance = LvToleranceDef::TenPercent;
        assert_eq!(c_factor(&s, 400.0), 1.10);
        s.case = StudyCaseDef::Minimum;
        assert_eq!(c_factor(&s, 400.0), 0.95);
        assert_eq!(c_factor(&s, 11_000.0), 1.00);
    }

    #[test]
    fn iec_peak_uses_kappa() {
        let mut s = ieee();
        s.standard = StandardDef::Iec60909;
        let z = Impedance::from_magnitude(0.01, 10.0);
        let r = compute(z, 400.0, &s);
        let k = 1.02 + 0.98 * (-0.3_f64).exp();
        assert!((r.kappa.unwrap() - k).abs() < 1e-12);
        assert!((r.peak_ka - k * SQRT_2 * r.three_phase.ka).abs() < 1e-9);
        assert!((r.three_phase.a - 1.05 * 400.0 / (SQRT_3 * 0.01)).abs() < 1e-6);
    }

    #[test]
    fn time_constant_matches_definition() {
        let z = Impedance::new(0.002, 0.02);
        let r = compute(z, 480.0, &ieee());
        assert!((r.tau_s - 0.02 / (2.0 * PI * 60.0 * 0.002)).abs() < 1e-12);
    }

    #[test]
    fn multiplier_limits() {
        assert_eq!(asymmetry_multiplier(0.0), 1.0);
        assert!((asymmetry_multiplier(f64::INFINITY) - SQRT_3).abs() < 1e-12);
        assert!(asymmetry_multiplier(1e9) <= SQRT_3);
    }

    proptest! {
        #[test]
        fn multiplier_bounded(x_r in 0.0f64..1e6) {
            let m = asymmetry_multiplier(x_r);
            prop_assert!((1.0..=SQRT_3).contains(&m));
        }

        #[test]
        fn multiplier_monotone(a in 0.01f64..500.0, b in 0.01f64..500.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(asymmetry_multiplier(lo) <= asymmetry_multiplier(hi));
        }

        #[test]
        fn kappa_bounded(x_r in 0.01f64..1e4) {
            let k = kappa(x_r);
            prop_assert!((1.02..=2.0).contains(&k));
        }
    }
}

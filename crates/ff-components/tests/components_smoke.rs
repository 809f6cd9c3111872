//! Integration tests for ff-components chaining models across voltage levels.

use ff_components::{
    Cable, ComponentError, ConductorMaterial, Generator, ImpedanceModel, Motor,
    MotorKind, ShortCircuitLevel, Transformer, Utility, refer,
};
use ff_core::Ledger;
use ff_core::units::constants::SQRT_3;
use ff_core::units::{ka, kv, kva, kw, m, mva, volts};

#[test]
fn utility_and_transformer_referred_to_secondary() {
    let mut ledger = Ledger::new();
    let utility = Utility::new("U1", kv(13.8), ShortCircuitLevel::Power(mva(500.0)), 10.0);
    let tx = Transformer::new("T1", kv(13.8), volts(480.0), kva(1500.0), 5.75, 5.0);

    let zu = utility.impedance(&mut ledger).unwrap();
    let zt = tx.impedance(&mut ledger).unwrap();
    assert_eq!(zt.voltage, volts(480.0));

    let zu_lv = zu.referred_to(tx.native_voltage());
    assert!((zu_lv.z.magnitude() - 480.0 * 480.0 / 500e6).abs() < 1e-9);

    let total = zu_lv.z + zt.z;
    let i_ka = 480.0 / (SQRT_3 * total.magnitude()) / 1000.0;
    assert!((28.0..31.0).contains(&i_ka), "got {i_ka} kA");
    assert!(ledger.is_empty());
}

#[test]
fn current_level_matches_power_level() {
    let mut ledger = Ledger::new();
    let by_power = Utility::new("U1", kv(13.2), ShortCircuitLevel::Power(mva(100.0)), 10.0);
    let i = 100e6 / (SQRT_3 * 13_200.0) / 1000.0;
    let by_current = Utility::new("U2", kv(13.2), ShortCircuitLevel::Current(ka(i)), 10.0);

    let a = by_power.impedance(&mut ledger).unwrap().z.magnitude();
    let b = by_current.impedance(&mut ledger).unwrap().z.magnitude();
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn parallel_aluminum_cable_sets() {
    let mut ledger = Ledger::new();
    let single = Cable::new(
        "C1",
        volts(480.0),
        m(100.0),
        0.1,
        0.08,
        20.0,
        ConductorMaterial::Aluminum,
        1,
    );
    let mut doubled = single.clone();
    doubled.sets = 2;

    let z1 = single.impedance(&mut ledger).unwrap().z;
    let z2 = doubled.impedance(&mut ledger).unwrap().z;
    assert!((z1.r - 0.01).abs() < 1e-12);
    assert!((z2.r - z1.r / 2.0).abs() < 1e-12);
    assert!((z2.x - z1.x / 2.0).abs() < 1e-12);
}

#[test]
fn motor_locked_rotor_consistent_with_voltage() {
    let mut ledger = Ledger::new();
    let motor = Motor::new(
        "M1",
        MotorKind::Induction,
        volts(400.0),
        kw(75.0),
        0.95,
        0.85,
        6.0,
        10.0,
        1,
    );
    let lr = motor.locked_rotor(&mut ledger).unwrap();
    let fla = 75_000.0 / (SQRT_3 * 400.0 * 0.95 * 0.85);
    assert!((lr.fla.value - fla).abs() < 1e-9);
    assert!((lr.lra.value - 6.0 * fla).abs() < 1e-9);
    assert!((lr.z.z.magnitude() * SQRT_3 * lr.lra.value - 400.0).abs() < 1e-6);
}

#[test]
fn motor_efficiency_above_one_is_rejected() {
    let mut ledger = Ledger::new();
    let motor = Motor::new(
        "M1",
        MotorKind::Induction,
        volts(400.0),
        kw(75.0),
        93.0,
        0.85,
        6.0,
        10.0,
        1,
    );
    let err = motor.locked_rotor(&mut ledger).unwrap_err();
    assert!(matches!(err, ComponentError::NonPhysical { .. }));
}

#[test]
fn generator_impedance_referral_round_trip() {
    let mut ledger = Ledger::new();
    let gen_set = Generator::new("G1", kv(11.0), kva(2500.0), 15.0, 20.0);
    let z = gen_set.impedance(&mut ledger).unwrap().z;

    let there = refer(z, kv(11.0), volts(400.0));
    let back = refer(there, volts(400.0), kv(11.0));
    assert!((back.r - z.r).abs() < 1e-9);
    assert!((back.x - z.x).abs() < 1e-9);
    assert!(there.magnitude() < z.magnitude());
}

use std::path::Path;

use ff_engine::{EngineError, run_and_save, run_study};
use ff_project::{StudyDef, parse_yaml};
use ff_results::{ArcFlashResult, MemorySink};

fn study(yaml: &str) -> StudyDef {
    parse_yaml(yaml).expect("study should parse")
}

#[test]
fn utility_100_mva_at_13_2_kv() {
    let record = run_study(&study(
        r#"
version: 1
name: utility only
system: { voltage_v: 13200 }
components:
  - id: u
    kind: { type: utility, fault_mva: 100, x_r: 10 }
"#,
    ))
    .unwrap();
    let bus = record.bus("BUS-1").unwrap();
    assert!((bus.thevenin.z_ohm - 1.7424).abs() < 1e-9);
    let fault = bus.fault.as_ref().unwrap();
    assert!((fault.three_phase.ka - 4.374).abs() < 1e-3);
    assert!((fault.fault_mva - 100.0).abs() < 1e-6);
}

#[test]
fn kiloampere_input_is_converted_once() {
    let record = run_study(&study(
        r#"
version: 1
name: ka input
system: { voltage_v: 13200 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 4.374, x_r: 10 }
"#,
    ))
    .unwrap();
    let fault = record.bus("BUS-1").unwrap().fault.clone().unwrap();
    assert!((fault.three_phase.a - 4374.0).abs() < 1e-6);
    assert!(record.ledger.iter().all(|e| e.topic != "plausibility.fault_current"));
}

#[test]
fn transformer_lowers_voltage_and_raises_current() {
    let record = run_study(&study(
        r#"
version: 1
name: unit substation
system: { voltage_v: 13800 }
arc_flash: { working_distance_mm: 455, arc_duration_s: 0.1 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500, x_r: 15 }
  - id: t
    kind: { type: transformer, primary_voltage_v: 13800, secondary_voltage_v: 480, rated_power: 1500, percent_z: 5.75 }
"#,
    ))
    .unwrap();
    assert_eq!(record.topology.buses.len(), 2);
    assert_eq!(record.topology.edges.len(), 1);
    assert_eq!(record.topology.edges[0].component, "t");

    let hv = record.bus("BUS-1").unwrap().fault.clone().unwrap();
    let lv = record.bus("BUS-2").unwrap().fault.clone().unwrap();
    assert!(lv.three_phase.ka > hv.three_phase.ka);
    // A 1.5 MVA, 5.75 % unit behind a 500 MVA source lets through roughly 30 kA.
    assert!(lv.three_phase.ka > 28.0 && lv.three_phase.ka < 32.0);

    assert!(record.ledger.iter().any(|e| e.topic == "transformer.power_unit"));
    assert!(record.ledger.iter().any(|e| e.topic == "transformer.x_r"));
    assert!(record.bus("BUS-2").unwrap().arc_flash.is_evaluated());
    assert_eq!(record.summary.max_fault_bus.as_deref(), Some("BUS-2"));
    assert_eq!(record.summary.min_fault_bus.as_deref(), Some("BUS-1"));
}

#[test]
fn bus_above_15_kv_is_not_evaluated() {
    let record = run_study(&study(
        r#"
version: 1
name: 20 kV
system: { voltage_v: 20000 }
arc_flash: { working_distance_mm: 910, arc_duration_s: 0.2 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500 }
"#,
    ))
    .unwrap();
    let bus = record.bus("BUS-1").unwrap();
    assert!(bus.fault.is_some());
    match &bus.arc_flash {
        ArcFlashResult::NotEvaluated { missing_fields } => assert!(!missing_fields.is_empty()),
        ArcFlashResult::Evaluated(_) => panic!("20 kV bus must not get an incident energy"),
    }
    assert!(record.summary.max_incident_energy_cal_cm2.is_none());
}

#[test]
fn motor_contribution_adds_to_bolted_current() {
    let record = run_study(&study(
        r#"
version: 1
name: motors
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 15, x_r: 8 }
  - id: m1
    kind: { type: motor, rated_kw: 150, quantity: 2 }
  - id: m2
    kind: { type: motor, rated_hp: 200, motor_type: synchronous }
"#,
    ))
    .unwrap();
    let bus = record.bus("BUS-1").unwrap();
    let fault = bus.fault.as_ref().unwrap();
    let w = bus.with_motors.unwrap();
    let motor_sum: f64 = bus.motors.iter().map(|m| m.timeline.first_cycle_ka).sum();
    assert_eq!(bus.motors.len(), 2);
    assert!((w.motor_first_cycle_ka - motor_sum).abs() < 1e-12);
    assert!((w.first_cycle_ka - (fault.three_phase.ka + motor_sum)).abs() < 1e-12);
    assert!(w.interrupting_ka < w.first_cycle_ka);
    assert!(w.peak_ka > fault.peak_ka);
    // Thevenin impedance ignores motors.
    assert!((fault.three_phase.ka - 15.0).abs() < 1e-9);
}

#[test]
fn buses_without_motors_omit_with_motor_values() {
    let record = run_study(&study(
        r#"
version: 1
name: no motors
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 15 }
"#,
    ))
    .unwrap();
    assert!(record.bus("BUS-1").unwrap().with_motors.is_none());
}

#[test]
fn validation_errors_abort_with_all_violations() {
    let mut bad = study(
        r#"
version: 1
name: ok for now
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 15 }
"#,
    );
    bad.system.voltage_v = 0.0;
    bad.system.frequency_hz = -60.0;
    match run_study(&bad) {
        Err(EngineError::Validation(errs)) => assert_eq!(errs.len(), 2),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn runs_do_not_share_state() {
    let s = study(
        r#"
version: 1
name: repeat
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 15 }
"#,
    );
    let a = run_study(&s).unwrap();
    let b = run_study(&s).unwrap();
    assert_eq!(a.run_id, b.run_id);
    assert_eq!(a.ledger, b.ledger);
    assert_eq!(a.buses, b.buses);
}

#[test]
fn iec_study_applies_voltage_factor() {
    let record = run_study(&study(
        r#"
version: 1
name: iec
system: { voltage_v: 400, frequency_hz: 50, standard: iec60909 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 20, x_r: 10 }
"#,
    ))
    .unwrap();
    let fault = record.bus("BUS-1").unwrap().fault.clone().unwrap();
    assert_eq!(fault.c_factor, 1.05);
    assert!((fault.three_phase.ka - 21.0).abs() < 1e-9);
    assert!(fault.kappa.is_some());
}

#[test]
fn sink_receives_the_record() {
    let s = study(
        r#"
version: 1
name: sink
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 15 }
"#,
    );
    let mut sink = MemorySink::new();
    let record = run_and_save(&s, &mut sink).unwrap();
    assert_eq!(sink.latest(), Some(&record));
}

#[test]
fn demo_studies_run() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/studies");
    for name in [
        "01_utility_transformer_lv.yaml",
        "02_iec_mv_generator.yaml",
        "03_branched_buses.yaml",
    ] {
        let s = ff_project::load_yaml(&root.join(name))
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let record = run_study(&s).unwrap_or_else(|e| panic!("Failed to run {}: {}", name, e));
        assert!(record.summary.max_fault_ka.is_some(), "{name}");
        assert!(!record.log.is_empty());
    }
}

#[test]
fn branched_demo_keeps_feeders_apart() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/studies");
    let s = ff_project::load_yaml(&root.join("03_branched_buses.yaml")).unwrap();
    let record = run_study(&s).unwrap();

    let swbd = record.bus("SWBD").unwrap().fault.clone().unwrap();
    let mcc_a = record.bus("MCC-A").unwrap();
    let mcc_b = record.bus("MCC-B").unwrap();
    assert!(mcc_a.fault.as_ref().unwrap().three_phase.ka < swbd.three_phase.ka);
    assert!(mcc_b.fault.as_ref().unwrap().three_phase.ka < swbd.three_phase.ka);
    assert_eq!(mcc_a.motors.len(), 1);
    assert_eq!(mcc_b.motors[0].component_id, "mtr-b");

    let af = mcc_a.arc_flash.evaluated().unwrap();
    assert_eq!(af.working_distance_mm, 455.0);
    assert_eq!(af.enclosure, ff_project::EnclosureDef::Panel);
    assert!(af.includes_motors);
}

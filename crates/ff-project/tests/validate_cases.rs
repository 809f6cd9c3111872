use ff_project::{ProjectError, ValidationError, parse_yaml};

fn errors(yaml: &str) -> Vec<ValidationError> {
    match parse_yaml(yaml) {
        Err(ProjectError::Validation(errs)) => errs.0,
        Err(other) => panic!("expected validation error, got {other}"),
        Ok(_) => panic!("expected validation error, study was accepted"),
    }
}

#[test]
fn collects_every_violation() {
    let errs = errors(
        r#"
version: 1
name: bad
system: { voltage_v: 0 }
components:
  - id: u
    kind: { type: utility }
  - id: t
    kind:
      type: transformer
      primary_voltage_v: 13800
      secondary_voltage_v: 480
      rated_power: -5
      percent_z: 5.75
"#,
    );
    assert_eq!(errs.len(), 3, "{errs:?}");
    assert!(errs.iter().any(|e| matches!(
        e,
        ValidationError::InvalidValue { field, .. } if field == "system voltage_v"
    )));
    assert!(errs.iter().any(|e| matches!(e, ValidationError::MissingField { .. })));
}

#[test]
fn duplicate_ids_are_rejected() {
    let errs = errors(
        r#"
version: 1
name: dup
system: { voltage_v: 480 }
components:
  - id: a
    kind: { type: utility, fault_mva: 100 }
  - id: a
    kind: { type: cable, length_m: 5, r_ohm_per_km: 0.1, x_ohm_per_km: 0.1 }
"#,
    );
    assert_eq!(
        errs,
        vec![ValidationError::DuplicateId {
            id: "a".to_string(),
            context: "components".to_string()
        }]
    );
}

#[test]
fn utility_needs_exactly_one_fault_level() {
    let errs = errors(
        r#"
version: 1
name: both
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_mva: 100, fault_current_ka: 20 }
"#,
    );
    assert_eq!(errs.len(), 1);
}

#[test]
fn motor_efficiency_must_be_a_fraction() {
    let errs = errors(
        r#"
version: 1
name: eff
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_mva: 100 }
  - id: m
    kind: { type: motor, rated_kw: 50, efficiency: 93 }
"#,
    );
    assert!(matches!(
        &errs[0],
        ValidationError::InvalidValue { field, .. } if field == "motor 'm' efficiency"
    ));
}

#[test]
fn newer_version_is_unsupported() {
    let errs = errors(
        r#"
version: 99
name: future
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_mva: 100 }
"#,
    );
    assert_eq!(errs, vec![ValidationError::UnsupportedVersion { version: 99 }]);
}

#[test]
fn unknown_fields_fail_to_parse() {
    let result = parse_yaml(
        r#"
version: 1
name: typo
system: { voltage_v: 480, voltge: 1 }
components: []
"#,
    );
    assert!(matches!(result, Err(ProjectError::Yaml(_))));
}

#[test]
fn missing_arc_flash_inputs_are_not_errors() {
    let study = parse_yaml(
        r#"
version: 1
name: partial
system: { voltage_v: 480 }
arc_flash: { enclosure: panel }
components:
  - id: u
    kind: { type: utility, fault_mva: 100 }
"#,
    )
    .unwrap();
    assert!(study.arc_flash.unwrap().working_distance_mm.is_none());
}

use ff_project::schema::*;
use ff_project::{load_json, load_yaml, save_json, save_yaml, validate_study};

fn simple_study() -> StudyDef {
    StudyDef {
        version: 1,
        name: "Roundtrip".to_string(),
        system: SystemDef {
            voltage_v: 13_800.0,
            frequency_hz: 60.0,
            standard: StandardDef::Ieee,
            case: StudyCaseDef::Maximum,
            iec_lv_tolerance: LvToleranceDef::SixPercent,
        },
        arc_flash: Some(ArcFlashDef {
            working_distance_mm: Some(455.0),
            arc_duration_s: Some(0.1),
            ..ArcFlashDef::default()
        }),
        defaults: DefaultsDef {
            utility_x_r: Some(12.0),
            ..DefaultsDef::default()
        },
        components: vec![
            ComponentDef {
                id: "u1".to_string(),
                name: "Utility".to_string(),
                kind: ComponentKind::Utility {
                    voltage_v: None,
                    fault_mva: Some(500.0),
                    fault_current_ka: None,
                    x_r: None,
                },
                from_bus: None,
                to_bus: None,
            },
            ComponentDef {
                id: "t1".to_string(),
                name: String::new(),
                kind: ComponentKind::Transformer {
                    primary_voltage_v: 13_800.0,
                    secondary_voltage_v: 480.0,
                    rated_power: 1500.0,
                    power_unit: Some(ff_components::PowerUnit::Kva),
                    percent_z: 5.75,
                    x_r: None,
                },
                from_bus: None,
                to_bus: Some("LV-MAIN".to_string()),
            },
        ],
    }
}

#[test]
fn roundtrip_yaml() {
    let study = simple_study();
    validate_study(&study).unwrap();

    let path = std::env::temp_dir().join("ff_project_roundtrip.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_json() {
    let study = simple_study();

    let path = std::env::temp_dir().join("ff_project_roundtrip.json");
    save_json(&path, &study).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(study, loaded);
}

#[test]
fn save_refuses_invalid_study() {
    let mut study = simple_study();
    study.system.voltage_v = -1.0;
    let path = std::env::temp_dir().join("ff_project_invalid.yaml");
    assert!(save_yaml(&path, &study).is_err());
}

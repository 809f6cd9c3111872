use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ff_project::schema::*;
use ff_results::*;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn record(run_id: &str, timestamp: &str) -> StudyRecord {
    let study = StudyDef {
        version: 1,
        name: "store test".to_string(),
        system: SystemDef {
            voltage_v: 480.0,
            frequency_hz: 60.0,
            standard: StandardDef::Ieee,
            case: StudyCaseDef::Maximum,
            iec_lv_tolerance: LvToleranceDef::SixPercent,
        },
        arc_flash: None,
        defaults: DefaultsDef::default(),
        components: vec![],
    };
    StudyRecord {
        run_id: run_id.to_string(),
        timestamp: timestamp.to_string(),
        engine_version: "0.1.0".to_string(),
        study,
        ledger: vec![],
        log: vec![LogEntry {
            seq: 0,
            stage: "topology".to_string(),
            message: "1 bus".to_string(),
        }],
        topology: TopologySummary {
            source_bus: "BUS-1".to_string(),
            ..TopologySummary::default()
        },
        buses: vec![BusRecord {
            bus: "BUS-1".to_string(),
            voltage_v: 480.0,
            thevenin: TheveninRecord {
                r_ohm: 0.001,
                x_ohm: 0.01,
                z_ohm: 0.01005,
                x_r: 10.0,
            },
            fault: None,
            with_motors: None,
            motors: vec![],
            arc_flash: ArcFlashResult::NotEvaluated {
                missing_fields: vec!["fault_result".to_string()],
            },
        }],
        summary: Summary {
            bus_count: 1,
            ..Summary::default()
        },
    }
}

#[test]
fn save_list_load_delete() {
    let study_dir = unique_temp_dir("ff_results_study");
    fs::create_dir_all(&study_dir).expect("failed to create temp study dir");
    let study_path = study_dir.join("study.yaml");

    let store = RunStore::for_study(&study_path).expect("failed to create run store");

    store
        .save_run(&record("run-b", "2026-02-27T00:00:00+00:00"))
        .expect("failed to save run");
    store
        .save_run(&record("run-a", "2026-02-26T00:00:00+00:00"))
        .expect("failed to save run");

    let runs = store.list_runs().expect("failed to list runs");
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run_id, "run-a");
    assert_eq!(runs[1].bus_count, 1);

    let loaded = store.load_record("run-a").expect("failed to load record");
    assert_eq!(loaded, record("run-a", "2026-02-26T00:00:00+00:00"));

    store.delete_run("run-a").expect("failed to delete run");
    assert!(!store.has_run("run-a"));
    assert!(matches!(
        store.load_record("run-a"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn sinks_are_interchangeable() {
    let mut memory = MemorySink::new();
    let mut disk = RunStore::new(unique_temp_dir("ff_results_sink")).unwrap();

    let sinks: [&mut dyn ResultSink; 2] = [&mut memory, &mut disk];
    for sink in sinks {
        sink.save(&record("run-x", "2026-03-01T00:00:00+00:00")).unwrap();
    }

    assert_eq!(memory.records().len(), 1);
    assert!(disk.has_run("run-x"));
}

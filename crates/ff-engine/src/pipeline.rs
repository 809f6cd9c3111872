//! End-to-end study run.

use ff_core::EntryKind;
use ff_project::{StudyDef, validate_study};
use ff_results::{
    ArcFlashResult, BusRecord, ResultSink, StudyRecord, Summary, compute_run_id, timestamp_now,
};

use crate::arc_flash::{self, ArcFlashParams};
use crate::error::{EngineError, EngineResult};
use crate::motors;
use crate::plausibility::{self, PlausibilityConfig};
use crate::short_circuit::{self, FaultSettings};
use crate::state::RunState;
use crate::thevenin;
use crate::topology::build_network;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a study from validation through arc flash.
///
/// Fails without partial results on invalid input or a broken topology.
/// Everything else, including buses that cannot be evaluated for arc flash,
/// is reported inside the returned record.
pub fn run_study(study: &StudyDef) -> EngineResult<StudyRecord> {
    validate_study(study)?;

    let mut state = RunState::new(study);
    state.log(
        "validate",
        format!("{} components accepted", study.components.len()),
    );
    let config = PlausibilityConfig::default();
    plausibility::check_study(study, &config, &mut state.ledger);

    let network = build_network(study, &mut state)?;
    let topology = &network.topology;

    if let Some(arc) = &study.arc_flash {
        for o in &arc.bus_overrides {
            if topology.bus_by_name(&o.bus).is_none() {
                state.ledger.warn(
                    &o.bus,
                    "arc_flash.unknown_bus",
                    "arc-flash override names a bus that does not exist",
                );
            }
        }
    }

    let settings = FaultSettings::from_system(&study.system);
    let thevenins = thevenin::aggregate(topology, &mut state.ledger);
    state.log(
        "thevenin",
        format!("aggregated {} buses", thevenins.len()),
    );

    let mut buses = Vec::with_capacity(thevenins.len());
    for th in &thevenins {
        let bus = topology.bus(th.bus).ok_or_else(|| EngineError::InvalidState {
            what: format!("Thevenin record for unknown bus {}", th.bus),
        })?;
        let voltage_v = bus.voltage.value;

        let fault = th
            .faultable
            .then(|| short_circuit::compute(th.z, voltage_v, &settings));
        if let Some(f) = &fault {
            plausibility::check_fault(&bus.name, f, &config, &mut state.ledger);
            state.log(
                "short_circuit",
                format!(
                    "{}: {:.3} kA symmetrical, X/R {:.2}, {:.1} MVA",
                    bus.name, f.three_phase.ka, f.x_r, f.fault_mva
                ),
            );
        }

        let contributions = network
            .motors_at(bus.id)
            .map(|m| motors::contribution(m, bus.voltage, &state.defaults, &mut state.ledger))
            .collect::<EngineResult<Vec<_>>>()?;
        let with_motors = fault
            .as_ref()
            .and_then(|f| motors::with_motors(f, &contributions));
        if let Some(w) = &with_motors {
            state.log(
                "motors",
                format!(
                    "{}: {} motor entries add {:.3} kA first cycle",
                    bus.name,
                    contributions.len(),
                    w.motor_first_cycle_ka
                ),
            );
        }

        let params = ArcFlashParams::resolve(study.arc_flash.as_ref(), &bus.name);
        let arc = arc_flash::evaluate(
            &bus.name,
            voltage_v,
            fault.as_ref(),
            with_motors.as_ref(),
            &params,
            &mut state.ledger,
        );
        if let ArcFlashResult::Evaluated(e) = &arc {
            state.log(
                "arc_flash",
                format!(
                    "{}: {:.2} cal/cm², PPE category {}",
                    bus.name, e.incident_energy_cal_cm2, e.ppe_category
                ),
            );
        }

        buses.push(BusRecord {
            bus: bus.name.clone(),
            voltage_v,
            thevenin: th.record(),
            fault,
            with_motors,
            motors: contributions,
            arc_flash: arc,
        });
    }

    let summary = summarize(&buses, &state);
    let RunState { ledger, log, .. } = state;
    Ok(StudyRecord {
        run_id: compute_run_id(study, ENGINE_VERSION),
        timestamp: timestamp_now(),
        engine_version: ENGINE_VERSION.to_string(),
        study: study.clone(),
        ledger: ledger.into_entries(),
        log,
        topology: network.summary(),
        buses,
        summary,
    })
}

/// Run a study and hand the finished record to `sink`.
pub fn run_and_save(study: &StudyDef, sink: &mut dyn ResultSink) -> EngineResult<StudyRecord> {
    let record = run_study(study)?;
    sink.save(&record)?;
    Ok(record)
}

fn summarize(buses: &[BusRecord], state: &RunState) -> Summary {
    let mut summary = Summary {
        bus_count: buses.len(),
        ..Summary::default()
    };

    for b in buses {
        if let Some(f) = &b.fault {
            summary.faulted_bus_count += 1;
            let ka = f.three_phase.ka;
            if summary.max_fault_ka.is_none_or(|m| ka > m) {
                summary.max_fault_ka = Some(ka);
                summary.max_fault_bus = Some(b.bus.clone());
            }
            if summary.min_fault_ka.is_none_or(|m| ka < m) {
                summary.min_fault_ka = Some(ka);
                summary.min_fault_bus = Some(b.bus.clone());
            }
        }
        if let Some(e) = b.arc_flash.evaluated() {
            summary.arc_flash_evaluated_count += 1;
            let cal = e.incident_energy_cal_cm2;
            if summary.max_incident_energy_cal_cm2.is_none_or(|m| cal > m) {
                summary.max_incident_energy_cal_cm2 = Some(cal);
                summary.max_incident_energy_bus = Some(b.bus.clone());
            }
        }
    }

    let entries = state.ledger.entries();
    summary.assumption_count = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Assumption)
        .count();
    summary.warning_count = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Warning)
        .count();
    summary
}

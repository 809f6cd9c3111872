//! Result data types.
//!
//! A [`StudyRecord`] is the complete output of one run. Consumers treat it as
//! read-only and never re-derive a value it already carries.

use ff_components::MotorKind;
use ff_core::LedgerEntry;
use ff_project::{EnclosureDef, StandardDef, StudyDef};
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// RFC 3339 UTC timestamp for a new record.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyRecord {
    pub run_id: RunId,
    pub timestamp: String,
    pub engine_version: String,
    /// The validated input, echoed back unchanged.
    pub study: StudyDef,
    pub ledger: Vec<LedgerEntry>,
    pub log: Vec<LogEntry>,
    pub topology: TopologySummary,
    pub buses: Vec<BusRecord>,
    pub summary: Summary,
}

impl StudyRecord {
    pub fn bus(&self, name: &str) -> Option<&BusRecord> {
        self.buses.iter().find(|b| b.bus == name)
    }

    pub fn manifest(&self) -> RunManifest {
        RunManifest {
            run_id: self.run_id.clone(),
            study_name: self.study.name.clone(),
            timestamp: self.timestamp.clone(),
            engine_version: self.engine_version.clone(),
            bus_count: self.buses.len(),
            warning_count: self.summary.warning_count,
            max_fault_ka: self.summary.max_fault_ka,
        }
    }
}

/// Small index entry written next to each stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub study_name: String,
    pub timestamp: String,
    pub engine_version: String,
    pub bus_count: usize,
    pub warning_count: usize,
    pub max_fault_ka: Option<f64>,
}

/// One line of the ordered calculation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub seq: usize,
    pub stage: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TopologySummary {
    pub source_bus: String,
    pub buses: Vec<BusSummary>,
    pub edges: Vec<EdgeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusSummary {
    pub name: String,
    pub voltage_v: f64,
    pub role: String,
    /// Ids of every component attached to or feeding this bus.
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSummary {
    pub from: String,
    pub to: String,
    pub component: String,
    pub r_ohm: f64,
    pub x_ohm: f64,
    /// Voltage at which `r_ohm` and `x_ohm` are stated.
    pub voltage_v: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusRecord {
    pub bus: String,
    pub voltage_v: f64,
    pub thevenin: TheveninRecord,
    /// Absent when the bus was excluded from fault calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultResult>,
    /// Present only on buses with motors attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_motors: Option<WithMotors>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub motors: Vec<MotorContributionRecord>,
    pub arc_flash: ArcFlashResult,
}

/// Thevenin equivalent seen from a bus, stated at the bus voltage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TheveninRecord {
    pub r_ohm: f64,
    pub x_ohm: f64,
    pub z_ohm: f64,
    pub x_r: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FaultCurrent {
    pub a: f64,
    pub ka: f64,
}

impl FaultCurrent {
    pub fn from_amps(a: f64) -> Self {
        Self { a, ka: a / 1000.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaultResult {
    pub standard: StandardDef,
    pub three_phase: FaultCurrent,
    pub line_ground: FaultCurrent,
    pub line_line: FaultCurrent,
    pub double_line_ground: FaultCurrent,
    pub asymmetrical_ka: f64,
    pub peak_ka: f64,
    pub fault_mva: f64,
    /// DC time constant in seconds.
    pub tau_s: f64,
    pub x_r: f64,
    pub asymmetry_multiplier: f64,
    /// Voltage factor; 1.0 outside IEC 60909.
    pub c_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa: Option<f64>,
}

/// Bolted three-phase values with the bus's motor contribution added.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WithMotors {
    pub motor_first_cycle_ka: f64,
    pub motor_interrupting_ka: f64,
    pub motor_sustained_ka: f64,
    pub first_cycle_ka: f64,
    pub interrupting_ka: f64,
    pub sustained_ka: f64,
    pub peak_ka: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorContributionRecord {
    pub component_id: String,
    pub name: String,
    pub kind: MotorKind,
    pub quantity: u32,
    pub voltage_v: f64,
    /// Per machine.
    pub fla_a: f64,
    /// Per machine.
    pub lra_a: f64,
    pub r_ohm: f64,
    pub x_ohm: f64,
    /// V_motor / V_bus, 1.0 when the voltages match.
    pub voltage_scale: f64,
    pub timeline: ContributionTimeline,
}

/// Total contribution of one motor entry, quantity and scaling applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ContributionTimeline {
    pub first_cycle_ka: f64,
    pub interrupting_ka: f64,
    pub sustained_ka: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArcFlashResult {
    NotEvaluated { missing_fields: Vec<String> },
    Evaluated(ArcFlashEvaluation),
}

impl ArcFlashResult {
    pub fn evaluated(&self) -> Option<&ArcFlashEvaluation> {
        match self {
            ArcFlashResult::Evaluated(e) => Some(e),
            ArcFlashResult::NotEvaluated { .. } => None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcFlashEvaluation {
    pub enclosure: EnclosureDef,
    pub bolted_current_ka: f64,
    /// True when `bolted_current_ka` includes motor contribution.
    pub includes_motors: bool,
    pub arcing_current_ka: f64,
    pub incident_energy_j_cm2: f64,
    pub incident_energy_cal_cm2: f64,
    pub boundary_mm: f64,
    pub ppe_category: u8,
    /// Energy exceeded the highest category breakpoint.
    pub ppe_overflow: bool,
    pub working_distance_mm: f64,
    pub arc_duration_s: f64,
    pub gap_mm: f64,
    pub distance_exponent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Summary {
    pub bus_count: usize,
    pub faulted_bus_count: usize,
    pub arc_flash_evaluated_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fault_ka: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fault_bus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_fault_ka: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_fault_bus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_incident_energy_cal_cm2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_incident_energy_bus: Option<String>,
    pub assumption_count: usize,
    pub warning_count: usize,
}

//! Non-blocking plausibility checks.
//!
//! Values that pass validation but sit outside published typical bands are
//! reported to the ledger. Most of these catch unit slips: a fault current
//! entered in amperes where kA was meant, or a voltage entered in kV.

use ff_core::Ledger;
use ff_project::{ComponentKind, StudyDef};
use ff_results::FaultResult;

/// Typical bands used by the checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityConfig {
    /// Nominal voltages outside this range, in V, look like a V/kV slip.
    pub voltage_range_v: (f64, f64),
    /// Utility fault currents above this, in kA, look like amperes.
    pub max_utility_fault_ka: f64,
    /// Utility fault currents below this at medium voltage, in kA.
    pub min_mv_utility_fault_ka: f64,
    pub transformer_percent_z: (f64, f64),
    pub cable_x_ohm_per_km: (f64, f64),
    /// Bus three-phase currents outside this range, in kA.
    pub bus_fault_ka: (f64, f64),
}

impl Default for PlausibilityConfig {
    fn default() -> Self {
        Self {
            voltage_range_v: (100.0, 765_000.0),
            max_utility_fault_ka: 200.0,
            min_mv_utility_fault_ka: 0.5,
            transformer_percent_z: (2.0, 15.0),
            cable_x_ohm_per_km: (0.05, 0.25),
            bus_fault_ka: (0.1, 200.0),
        }
    }
}

fn outside(value: f64, (lo, hi): (f64, f64)) -> bool {
    value < lo || value > hi
}

/// Checks on the study inputs, run before the network is built.
pub fn check_study(study: &StudyDef, config: &PlausibilityConfig, ledger: &mut Ledger) {
    let (lo, hi) = config.voltage_range_v;
    let check_voltage = |ledger: &mut Ledger, subject: &str, field: &str, v: f64| {
        if outside(v, config.voltage_range_v) {
            ledger.warn(
                subject,
                "plausibility.voltage",
                format!("{field} = {v} V is outside {lo}..{hi} V; check for a V/kV mix-up"),
            );
        }
    };

    check_voltage(ledger, "system", "voltage_v", study.system.voltage_v);

    for c in &study.components {
        let id = c.id.as_str();
        match &c.kind {
            ComponentKind::Utility {
                voltage_v,
                fault_mva,
                fault_current_ka,
                ..
            } => {
                if let Some(v) = voltage_v {
                    check_voltage(ledger, id, "voltage_v", *v);
                }
                let v = voltage_v.unwrap_or(study.system.voltage_v);
                if let Some(i) = fault_current_ka {
                    if *i > config.max_utility_fault_ka {
                        ledger.warn(
                            id,
                            "plausibility.fault_current",
                            format!(
                                "fault_current_ka = {i} is above {} kA; value may be in amperes",
                                config.max_utility_fault_ka
                            ),
                        );
                    } else if v > 1000.0 && *i < config.min_mv_utility_fault_ka {
                        ledger.warn(
                            id,
                            "plausibility.fault_current",
                            format!("fault_current_ka = {i} is unusually low for a {v} V supply"),
                        );
                    }
                }
                if let Some(s) = fault_mva {
                    let implied_ka = s * 1e6 / (ff_core::units::constants::SQRT_3 * v) / 1000.0;
                    if implied_ka > config.max_utility_fault_ka {
                        ledger.warn(
                            id,
                            "plausibility.fault_current",
                            format!(
                                "fault_mva = {s} implies {implied_ka:.0} kA at {v} V; value may be in kVA"
                            ),
                        );
                    }
                }
            }
            ComponentKind::Transformer {
                primary_voltage_v,
                secondary_voltage_v,
                percent_z,
                ..
            } => {
                check_voltage(ledger, id, "primary_voltage_v", *primary_voltage_v);
                check_voltage(ledger, id, "secondary_voltage_v", *secondary_voltage_v);
                if outside(*percent_z, config.transformer_percent_z) {
                    let (lo, hi) = config.transformer_percent_z;
                    ledger.warn(
                        id,
                        "plausibility.transformer_z",
                        format!("percent_z = {percent_z} is outside the typical {lo}..{hi} % band"),
                    );
                }
            }
            ComponentKind::Cable {
                voltage_v,
                x_ohm_per_km,
                ..
            } => {
                if let Some(v) = voltage_v {
                    check_voltage(ledger, id, "voltage_v", *v);
                }
                if outside(*x_ohm_per_km, config.cable_x_ohm_per_km) {
                    let (lo, hi) = config.cable_x_ohm_per_km;
                    ledger.warn(
                        id,
                        "plausibility.cable_x",
                        format!(
                            "x_ohm_per_km = {x_ohm_per_km} is outside the typical {lo}..{hi} ohm/km band"
                        ),
                    );
                }
            }
            ComponentKind::Motor { voltage_v, .. } => {
                if let Some(v) = voltage_v {
                    check_voltage(ledger, id, "voltage_v", *v);
                }
            }
            ComponentKind::Generator { voltage_v, .. } => {
                check_voltage(ledger, id, "voltage_v", *voltage_v);
            }
        }
    }
}

/// Check a computed bus fault current.
pub fn check_fault(bus: &str, fault: &FaultResult, config: &PlausibilityConfig, ledger: &mut Ledger) {
    let ka = fault.three_phase.ka;
    if outside(ka, config.bus_fault_ka) {
        let (lo, hi) = config.bus_fault_ka;
        ledger.warn(
            bus,
            "plausibility.bus_fault_current",
            format!("three-phase fault current {ka:.3} kA is outside {lo}..{hi} kA"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_project::parse_yaml;

    fn warnings(yaml: &str) -> Ledger {
        let study = parse_yaml(yaml).unwrap();
        let mut ledger = Ledger::new();
        check_study(&study, &PlausibilityConfig::default(), &mut ledger);
        ledger
    }

    #[test]
    fn amperes_entered_as_kiloamperes() {
        let ledger = warnings(
            r#"
version: 1
name: ka slip
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 42000 }
"#,
        );
        assert_eq!(ledger.by_topic("plausibility.fault_current").count(), 1);
    }

    #[test]
    fn kilovolts_entered_as_volts() {
        let ledger = warnings(
            r#"
version: 1
name: kv slip
system: { voltage_v: 13.8 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500 }
"#,
        );
        assert!(ledger.by_topic("plausibility.voltage").count() >= 1);
    }

    #[test]
    fn typical_bands() {
        let ledger = warnings(
            r#"
version: 1
name: bands
system: { voltage_v: 13800 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500 }
  - id: t
    kind: { type: transformer, primary_voltage_v: 13800, secondary_voltage_v: 480, rated_power: 1500, percent_z: 25 }
  - id: c
    kind: { type: cable, length_m: 10, r_ohm_per_km: 0.1, x_ohm_per_km: 0.9 }
"#,
        );
        assert_eq!(ledger.by_topic("plausibility.transformer_z").count(), 1);
        assert_eq!(ledger.by_topic("plausibility.cable_x").count(), 1);
        assert_eq!(ledger.by_topic("plausibility.voltage").count(), 0);
    }

    #[test]
    fn reasonable_study_is_quiet() {
        let ledger = warnings(
            r#"
version: 1
name: quiet
system: { voltage_v: 13800 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500 }
  - id: t
    kind: { type: transformer, primary_voltage_v: 13800, secondary_voltage_v: 480, rated_power: 1500, percent_z: 5.75 }
  - id: c
    kind: { type: cable, length_m: 10, r_ohm_per_km: 0.1, x_ohm_per_km: 0.08 }
"#,
        );
        assert!(ledger.is_empty());
    }
}

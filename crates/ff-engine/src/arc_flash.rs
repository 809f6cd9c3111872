//! Arc-flash incident energy and PPE category (IEEE 1584 empirical model,
//! NFPA 70E categories).
//!
//! All regressions work in kA, kV and mm; energies come out in J/cm² and are
//! reported in cal/cm² as well.

use ff_core::Ledger;
use ff_core::units::constants::J_PER_CAL;
use ff_project::{ArcFlashDef, EnclosureDef, GroundingDef};
use ff_results::{ArcFlashEvaluation, ArcFlashResult, FaultResult, WithMotors};

pub const MIN_VOLTAGE_V: f64 = 208.0;
pub const MAX_VOLTAGE_V: f64 = 15_000.0;

/// Incident energy at the arc-flash boundary, cal/cm².
pub const BOUNDARY_ENERGY_CAL: f64 = 1.2;

/// Bolted current range the regressions were fitted over, kA.
const MODEL_RANGE_KA: (f64, f64) = (0.7, 106.0);

/// Reference distance of the normalized energy, mm.
const REFERENCE_DISTANCE_MM: f64 = 610.0;
/// Reference arc duration of the normalized energy, s.
const REFERENCE_DURATION_S: f64 = 0.2;

/// Upper incident-energy limit of PPE categories 0 through 4, cal/cm².
const PPE_LIMITS: [f64; 5] = [1.2, 4.0, 8.0, 25.0, 40.0];

/// Arc-flash inputs for one bus after overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFlashParams {
    pub working_distance_mm: Option<f64>,
    pub arc_duration_s: Option<f64>,
    pub enclosure: EnclosureDef,
    pub grounding: GroundingDef,
    pub gap_mm: Option<f64>,
}

impl ArcFlashParams {
    /// Study-wide settings with any override for `bus` applied.
    pub fn resolve(def: Option<&ArcFlashDef>, bus: &str) -> Self {
        let Some(def) = def else {
            return Self {
                working_distance_mm: None,
                arc_duration_s: None,
                enclosure: EnclosureDef::default(),
                grounding: GroundingDef::default(),
                gap_mm: None,
            };
        };
        let mut p = Self {
            working_distance_mm: def.working_distance_mm,
            arc_duration_s: def.arc_duration_s,
            enclosure: def.enclosure,
            grounding: def.grounding,
            gap_mm: def.gap_mm,
        };
        if let Some(o) = def.bus_overrides.iter().find(|o| o.bus == bus) {
            p.working_distance_mm = o.working_distance_mm.or(p.working_distance_mm);
            p.arc_duration_s = o.arc_duration_s.or(p.arc_duration_s);
            p.enclosure = o.enclosure.unwrap_or(p.enclosure);
            // A gap set for the study belongs to the study-wide enclosure.
            p.gap_mm = o.gap_mm.or(if o.enclosure.is_some() { None } else { p.gap_mm });
        }
        p
    }
}

fn is_open(enclosure: EnclosureDef) -> bool {
    enclosure == EnclosureDef::OpenAir
}

/// Typical conductor gap by enclosure and voltage class, mm.
pub fn default_gap_mm(enclosure: EnclosureDef, voltage_v: f64) -> f64 {
    if voltage_v <= 1000.0 {
        match enclosure {
            EnclosureDef::OpenAir | EnclosureDef::Switchgear => 32.0,
            EnclosureDef::Panel => 25.0,
            EnclosureDef::Cable => 13.0,
        }
    } else {
        match enclosure {
            EnclosureDef::Cable => 13.0,
            EnclosureDef::OpenAir => 102.0,
            EnclosureDef::Switchgear | EnclosureDef::Panel if voltage_v <= 5000.0 => 102.0,
            EnclosureDef::Switchgear | EnclosureDef::Panel => 153.0,
        }
    }
}

/// Distance exponent x of the incident-energy power law.
pub fn distance_exponent(enclosure: EnclosureDef, voltage_v: f64) -> f64 {
    let low_voltage = voltage_v <= 1000.0;
    match enclosure {
        EnclosureDef::OpenAir | EnclosureDef::Cable => 2.0,
        EnclosureDef::Switchgear if low_voltage => 1.473,
        EnclosureDef::Panel if low_voltage => 1.641,
        EnclosureDef::Switchgear | EnclosureDef::Panel => 0.973,
    }
}

/// Arcing current in kA.
pub fn arcing_current_ka(bolted_ka: f64, voltage_kv: f64, gap_mm: f64, enclosure: EnclosureDef) -> f64 {
    let lg_ibf = bolted_ka.log10();
    let lg_ia = if voltage_kv < 1.0 {
        let k = if is_open(enclosure) { -0.153 } else { -0.097 };
        k + 0.662 * lg_ibf + 0.0966 * voltage_kv + 0.000526 * gap_mm
            + 0.5588 * voltage_kv * lg_ibf
            - 0.00304 * gap_mm * lg_ibf
    } else {
        0.00402 + 0.983 * lg_ibf
    };
    10f64.powf(lg_ia)
}

/// Incident energy normalized to 0.2 s and 610 mm, J/cm².
pub fn normalized_energy(
    arcing_ka: f64,
    gap_mm: f64,
    enclosure: EnclosureDef,
    grounding: GroundingDef,
) -> f64 {
    let k1 = if is_open(enclosure) { -0.792 } else { -0.555 };
    let k2 = match grounding {
        GroundingDef::Ungrounded => 0.0,
        GroundingDef::Grounded => -0.113,
    };
    10f64.powf(k1 + k2 + 1.081 * arcing_ka.log10() + 0.0011 * gap_mm)
}

/// Incident energy at the working distance, J/cm².
///
/// `normalized` is in cal/cm² at 610 mm and 0.2 s, hence the 4.184 factor.
pub fn incident_energy_j(
    normalized: f64,
    voltage_v: f64,
    duration_s: f64,
    distance_mm: f64,
    exponent: f64,
) -> f64 {
    let cf = if voltage_v <= 1000.0 { 1.5 } else { 1.0 };
    J_PER_CAL
        * cf
        * normalized
        * (duration_s / REFERENCE_DURATION_S)
        * (REFERENCE_DISTANCE_MM.powf(exponent) / distance_mm.powf(exponent))
}

/// Distance at which the incident energy falls to 1.2 cal/cm².
pub fn boundary_mm(distance_mm: f64, energy_cal: f64, exponent: f64) -> f64 {
    distance_mm * (energy_cal / BOUNDARY_ENERGY_CAL).powf(1.0 / exponent)
}

/// PPE category and whether the energy is beyond category 4.
pub fn ppe_category(energy_cal: f64) -> (u8, bool) {
    match PPE_LIMITS.iter().position(|limit| energy_cal <= *limit) {
        Some(cat) => (cat as u8, false),
        None => (4, true),
    }
}

/// Evaluate one bus, or explain why it cannot be evaluated.
pub fn evaluate(
    bus: &str,
    voltage_v: f64,
    fault: Option<&FaultResult>,
    with_motors: Option<&WithMotors>,
    params: &ArcFlashParams,
    ledger: &mut Ledger,
) -> ArcFlashResult {
    let mut missing = Vec::new();
    if !(MIN_VOLTAGE_V..=MAX_VOLTAGE_V).contains(&voltage_v) {
        missing.push(format!(
            "bus_voltage_v ({voltage_v} V outside {MIN_VOLTAGE_V}..={MAX_VOLTAGE_V} V)"
        ));
    }
    let distance = params.working_distance_mm.filter(|d| *d > 0.0);
    if distance.is_none() {
        missing.push("working_distance_mm".to_string());
    }
    let duration = params.arc_duration_s.filter(|t| *t > 0.0);
    if duration.is_none() {
        missing.push("arc_duration_s".to_string());
    }
    if fault.is_none() {
        missing.push("fault_result".to_string());
    }

    let (Some(distance), Some(duration), Some(fault), true) =
        (distance, duration, fault, missing.is_empty())
    else {
        tracing::debug!(bus, ?missing, "arc flash not evaluated");
        return ArcFlashResult::NotEvaluated {
            missing_fields: missing,
        };
    };

    let (bolted_ka, includes_motors) = match with_motors {
        Some(w) => (w.first_cycle_ka, true),
        None => (fault.three_phase.ka, false),
    };
    if bolted_ka < MODEL_RANGE_KA.0 || bolted_ka > MODEL_RANGE_KA.1 {
        ledger.warn(
            bus,
            "arc_flash.model_range",
            format!(
                "bolted current {bolted_ka:.2} kA outside the {}..{} kA model range",
                MODEL_RANGE_KA.0, MODEL_RANGE_KA.1
            ),
        );
    }

    let enclosure = params.enclosure;
    let gap_mm = match params.gap_mm {
        Some(g) => g,
        None => {
            let g = default_gap_mm(enclosure, voltage_v);
            ledger.assume(
                bus,
                "arc_flash.gap",
                format!("conductor gap not given; using {g} mm for {enclosure:?} at {voltage_v} V"),
            );
            g
        }
    };
    let exponent = distance_exponent(enclosure, voltage_v);

    let arcing_ka = arcing_current_ka(bolted_ka, voltage_v / 1000.0, gap_mm, enclosure);
    let en = normalized_energy(arcing_ka, gap_mm, enclosure, params.grounding);
    let energy_j = incident_energy_j(en, voltage_v, duration, distance, exponent);
    let energy_cal = energy_j / J_PER_CAL;
    let (ppe_category, ppe_overflow) = ppe_category(energy_cal);
    if ppe_overflow {
        ledger.warn(
            bus,
            "arc_flash.ppe_overflow",
            format!("incident energy {energy_cal:.1} cal/cm² exceeds the 40 cal/cm² category 4 limit"),
        );
    }

    ArcFlashResult::Evaluated(ArcFlashEvaluation {
        enclosure,
        bolted_current_ka: bolted_ka,
        includes_motors,
        arcing_current_ka: arcing_ka,
        incident_energy_j_cm2: energy_j,
        incident_energy_cal_cm2: energy_cal,
        boundary_mm: boundary_mm(distance, energy_cal, exponent),
        ppe_category,
        ppe_overflow,
        working_distance_mm: distance,
        arc_duration_s: duration,
        gap_mm,
        distance_exponent: exponent,
    })
}

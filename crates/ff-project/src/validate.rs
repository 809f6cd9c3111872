//! Blocking study validation.
//!
//! Validation walks the whole study and collects every violation before
//! failing, so a caller can fix an input file in one pass.

use crate::schema::{ArcFlashDef, ComponentDef, ComponentKind, DefaultsDef, StudyDef, SystemDef};
use std::collections::HashSet;
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing field: {field} ({context})")]
    MissingField { field: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Every violation found in one study.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects violations while walking a study.
#[derive(Default)]
struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    fn positive(&mut self, field: impl Into<String>, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.errors.push(ValidationError::InvalidValue {
                field: field.into(),
                value: value.to_string(),
                reason: "must be positive and finite".to_string(),
            });
        }
    }

    fn positive_opt(&mut self, field: impl Into<String>, value: Option<f64>) {
        if let Some(v) = value {
            self.positive(field, v);
        }
    }

    fn non_negative(&mut self, field: impl Into<String>, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.errors.push(ValidationError::InvalidValue {
                field: field.into(),
                value: value.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    fn fraction_opt(&mut self, field: impl Into<String>, value: Option<f64>) {
        if let Some(v) = value
            && (!v.is_finite() || v <= 0.0 || v > 1.0)
        {
            self.errors.push(ValidationError::InvalidValue {
                field: field.into(),
                value: v.to_string(),
                reason: "must be in (0, 1]".to_string(),
            });
        }
    }

    fn at_least_one(&mut self, field: impl Into<String>, value: Option<u32>) {
        if value == Some(0) {
            self.errors.push(ValidationError::InvalidValue {
                field: field.into(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
    }

    fn invalid(&mut self, field: impl Into<String>, value: impl Into<String>, reason: &str) {
        self.errors.push(ValidationError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        });
    }

    fn missing(&mut self, field: impl Into<String>, context: impl Into<String>) {
        self.errors.push(ValidationError::MissingField {
            field: field.into(),
            context: context.into(),
        });
    }
}

pub fn validate_study(study: &StudyDef) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();

    if study.version > crate::LATEST_VERSION {
        c.errors.push(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    validate_system(&mut c, &study.system);

    if study.components.is_empty() {
        c.missing("components", "study must list at least one component");
    }

    let mut ids = HashSet::new();
    for component in &study.components {
        if component.id.trim().is_empty() {
            c.missing("id", format!("{} component", component.kind.type_name()));
        } else if !ids.insert(component.id.as_str()) {
            c.errors.push(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: "components".to_string(),
            });
        }
        validate_component(&mut c, component);
    }

    if let Some(arc) = &study.arc_flash {
        validate_arc_flash(&mut c, arc);
    }
    validate_defaults(&mut c, &study.defaults);

    if c.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(c.errors))
    }
}

fn validate_system(c: &mut Collector, system: &SystemDef) {
    c.positive("system voltage_v", system.voltage_v);
    c.positive("system frequency_hz", system.frequency_hz);
}

fn validate_component(c: &mut Collector, component: &ComponentDef) {
    let id = &component.id;
    for (field, value) in [("from_bus", &component.from_bus), ("to_bus", &component.to_bus)] {
        if let Some(bus) = value
            && bus.trim().is_empty()
        {
            c.invalid(format!("component '{id}' {field}"), "", "bus name must not be empty");
        }
    }

    match &component.kind {
        ComponentKind::Utility {
            voltage_v,
            fault_mva,
            fault_current_ka,
            x_r,
        } => {
            c.positive_opt(format!("utility '{id}' voltage_v"), *voltage_v);
            match (fault_mva, fault_current_ka) {
                (None, None) => c.missing(
                    "fault_mva or fault_current_ka",
                    format!("utility '{id}'"),
                ),
                (Some(_), Some(_)) => c.invalid(
                    format!("utility '{id}' fault level"),
                    "fault_mva and fault_current_ka",
                    "give exactly one of fault_mva or fault_current_ka",
                ),
                (Some(s), None) => c.positive(format!("utility '{id}' fault_mva"), *s),
                (None, Some(i)) => c.positive(format!("utility '{id}' fault_current_ka"), *i),
            }
            c.positive_opt(format!("utility '{id}' x_r"), *x_r);
        }
        ComponentKind::Transformer {
            primary_voltage_v,
            secondary_voltage_v,
            rated_power,
            percent_z,
            x_r,
            ..
        } => {
            c.positive(format!("transformer '{id}' primary_voltage_v"), *primary_voltage_v);
            c.positive(
                format!("transformer '{id}' secondary_voltage_v"),
                *secondary_voltage_v,
            );
            c.positive(format!("transformer '{id}' rated_power"), *rated_power);
            c.positive(format!("transformer '{id}' percent_z"), *percent_z);
            c.positive_opt(format!("transformer '{id}' x_r"), *x_r);
        }
        ComponentKind::Cable {
            voltage_v,
            length_m,
            r_ohm_per_km,
            x_ohm_per_km,
            temperature_c,
            sets,
            ..
        } => {
            c.positive_opt(format!("cable '{id}' voltage_v"), *voltage_v);
            c.positive(format!("cable '{id}' length_m"), *length_m);
            c.positive(format!("cable '{id}' r_ohm_per_km"), *r_ohm_per_km);
            c.non_negative(format!("cable '{id}' x_ohm_per_km"), *x_ohm_per_km);
            if let Some(t) = temperature_c
                && (!t.is_finite() || *t < -50.0 || *t > 250.0)
            {
                c.invalid(
                    format!("cable '{id}' temperature_c"),
                    t.to_string(),
                    "must be within -50..=250 °C",
                );
            }
            c.at_least_one(format!("cable '{id}' sets"), *sets);
        }
        ComponentKind::Motor {
            voltage_v,
            rated_kw,
            rated_hp,
            efficiency,
            power_factor,
            locked_rotor_multiplier,
            x_r,
            quantity,
            ..
        } => {
            c.positive_opt(format!("motor '{id}' voltage_v"), *voltage_v);
            match (rated_kw, rated_hp) {
                (None, None) => c.missing("rated_kw or rated_hp", format!("motor '{id}'")),
                (Some(_), Some(_)) => c.invalid(
                    format!("motor '{id}' rating"),
                    "rated_kw and rated_hp",
                    "give exactly one of rated_kw or rated_hp",
                ),
                (Some(p), None) => c.positive(format!("motor '{id}' rated_kw"), *p),
                (None, Some(p)) => c.positive(format!("motor '{id}' rated_hp"), *p),
            }
            c.fraction_opt(format!("motor '{id}' efficiency"), *efficiency);
            c.fraction_opt(format!("motor '{id}' power_factor"), *power_factor);
            c.positive_opt(
                format!("motor '{id}' locked_rotor_multiplier"),
                *locked_rotor_multiplier,
            );
            c.positive_opt(format!("motor '{id}' x_r"), *x_r);
            c.at_least_one(format!("motor '{id}' quantity"), *quantity);
        }
        ComponentKind::Generator {
            voltage_v,
            rated_kva,
            subtransient_pct,
            x_r,
        } => {
            c.positive(format!("generator '{id}' voltage_v"), *voltage_v);
            c.positive(format!("generator '{id}' rated_kva"), *rated_kva);
            c.positive(format!("generator '{id}' subtransient_pct"), *subtransient_pct);
            c.positive_opt(format!("generator '{id}' x_r"), *x_r);
        }
    }
}

/// Missing distance or duration is not an error here: the affected buses are
/// reported as not evaluated. Values that are present must be usable.
fn validate_arc_flash(c: &mut Collector, arc: &ArcFlashDef) {
    c.positive_opt("arc_flash working_distance_mm", arc.working_distance_mm);
    c.positive_opt("arc_flash arc_duration_s", arc.arc_duration_s);
    c.positive_opt("arc_flash gap_mm", arc.gap_mm);

    let mut seen = HashSet::new();
    for o in &arc.bus_overrides {
        if !seen.insert(o.bus.as_str()) {
            c.errors.push(ValidationError::DuplicateId {
                id: o.bus.clone(),
                context: "arc_flash bus_overrides".to_string(),
            });
        }
        c.positive_opt(
            format!("arc_flash override '{}' working_distance_mm", o.bus),
            o.working_distance_mm,
        );
        c.positive_opt(
            format!("arc_flash override '{}' arc_duration_s", o.bus),
            o.arc_duration_s,
        );
        c.positive_opt(format!("arc_flash override '{}' gap_mm", o.bus), o.gap_mm);
    }
}

fn validate_defaults(c: &mut Collector, d: &DefaultsDef) {
    c.positive_opt("defaults utility_x_r", d.utility_x_r);
    c.positive_opt("defaults generator_x_r", d.generator_x_r);
    c.positive_opt("defaults transformer_x_r_above", d.transformer_x_r_above);
    c.fraction_opt("defaults motor_efficiency", d.motor_efficiency);
    c.fraction_opt("defaults motor_power_factor", d.motor_power_factor);
    if let Some(t) = d.cable_temperature_c
        && (!t.is_finite() || !(-50.0..=250.0).contains(&t))
    {
        c.invalid(
            "defaults cable_temperature_c",
            t.to_string(),
            "must be within -50..=250 °C",
        );
    }
    if let Some(bands) = &d.transformer_x_r_bands {
        for (i, band) in bands.iter().enumerate() {
            c.positive(format!("defaults transformer_x_r_bands[{i}] below_mva"), band.below_mva);
            c.positive(format!("defaults transformer_x_r_bands[{i}] x_r"), band.x_r);
        }
        if bands.windows(2).any(|w| w[1].below_mva <= w[0].below_mva) {
            c.invalid(
                "defaults transformer_x_r_bands",
                format!("{} bands", bands.len()),
                "below_mva must be strictly ascending",
            );
        }
    }
    for (label, motor) in [("induction", &d.induction), ("synchronous", &d.synchronous)] {
        if let Some(m) = motor {
            c.positive(
                format!("defaults {label} locked_rotor_multiplier"),
                m.locked_rotor_multiplier,
            );
            c.positive(format!("defaults {label} locked_rotor_x_r"), m.locked_rotor_x_r);
            c.fraction_opt(
                format!("defaults {label} interrupting_decay"),
                Some(m.interrupting_decay),
            );
            c.positive(
                format!("defaults {label} sustained_multiplier"),
                m.sustained_multiplier,
            );
        }
    }
}

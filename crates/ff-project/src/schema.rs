//! Study file schema definitions.

use ff_components::{ConductorMaterial, MotorDefaults, MotorKind, PowerUnit, XrBand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StudyDef {
    pub version: u32,
    pub name: String,
    pub system: SystemDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_flash: Option<ArcFlashDef>,
    #[serde(default, skip_serializing_if = "DefaultsDef::is_empty")]
    pub defaults: DefaultsDef,
    /// Ordered component list; order drives sequential bus chaining.
    pub components: Vec<ComponentDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SystemDef {
    /// Nominal line-to-line voltage of the source bus.
    pub voltage_v: f64,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
    #[serde(default)]
    pub standard: StandardDef,
    #[serde(default)]
    pub case: StudyCaseDef,
    /// Only used for IEC low-voltage cmax.
    #[serde(default)]
    pub iec_lv_tolerance: LvToleranceDef,
}

fn default_frequency_hz() -> f64 {
    60.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StandardDef {
    /// IEEE C37.010 / IEEE 141 (ANSI) method, c = 1.0.
    #[default]
    #[serde(alias = "ansi")]
    Ieee,
    /// IEC 60909-0 with voltage factor c and κ peak factor.
    #[serde(alias = "iec")]
    Iec60909,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudyCaseDef {
    #[default]
    Maximum,
    Minimum,
}

/// Permitted voltage tolerance of an IEC low-voltage system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LvToleranceDef {
    /// +6 %: cmax = 1.05
    #[default]
    SixPercent,
    /// +10 %: cmax = 1.10
    TenPercent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ArcFlashDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_distance_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_duration_s: Option<f64>,
    #[serde(default)]
    pub enclosure: EnclosureDef,
    #[serde(default)]
    pub grounding: GroundingDef,
    /// Conductor gap; defaults per enclosure and voltage class when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bus_overrides: Vec<ArcFlashOverrideDef>,
}

/// Equipment type, which selects the empirical arc-flash coefficients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnclosureDef {
    OpenAir,
    #[default]
    Switchgear,
    /// MCCs and panelboards.
    #[serde(alias = "mcc")]
    Panel,
    Cable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroundingDef {
    #[default]
    Grounded,
    /// Ungrounded or high-resistance grounded.
    Ungrounded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArcFlashOverrideDef {
    pub bus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_distance_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_duration_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<EnclosureDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_mm: Option<f64>,
}

/// Overrides for the engine's default assumptions. Unset fields keep the
/// built-in value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility_x_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_x_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_x_r_bands: Option<Vec<XrBand>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_x_r_above: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_power_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub induction: Option<MotorDefaults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronous: Option<MotorDefaults>,
}

impl DefaultsDef {
    pub fn is_empty(&self) -> bool {
        *self == DefaultsDef::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ComponentDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: ComponentKind,
    /// Bus this component is fed from; overrides sequential chaining.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_bus: Option<String>,
    /// Bus this component feeds or attaches to; overrides sequential chaining.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_bus: Option<String>,
}

impl ComponentDef {
    /// Display label: the name when given, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ComponentKind {
    Utility {
        /// Defaults to the bus voltage.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        voltage_v: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fault_mva: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fault_current_ka: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_r: Option<f64>,
    },
    Transformer {
        primary_voltage_v: f64,
        secondary_voltage_v: f64,
        rated_power: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        power_unit: Option<PowerUnit>,
        percent_z: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_r: Option<f64>,
    },
    Cable {
        /// Defaults to the voltage of the bus it attaches to.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        voltage_v: Option<f64>,
        length_m: f64,
        /// Conductor resistance at 20 °C.
        r_ohm_per_km: f64,
        x_ohm_per_km: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature_c: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<ConductorMaterial>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sets: Option<u32>,
    },
    Motor {
        /// Defaults to the voltage of the bus it attaches to.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        voltage_v: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rated_kw: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rated_hp: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        motor_type: Option<MotorKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        efficiency: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        power_factor: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        locked_rotor_multiplier: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_r: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quantity: Option<u32>,
    },
    Generator {
        voltage_v: f64,
        rated_kva: f64,
        /// Subtransient reactance X''d in percent.
        subtransient_pct: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x_r: Option<f64>,
    },
}

impl ComponentKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::Utility { .. } => "utility",
            ComponentKind::Transformer { .. } => "transformer",
            ComponentKind::Cable { .. } => "cable",
            ComponentKind::Motor { .. } => "motor",
            ComponentKind::Generator { .. } => "generator",
        }
    }

    /// Utilities and generators feed fault current into the network.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            ComponentKind::Utility { .. } | ComponentKind::Generator { .. }
        )
    }
}

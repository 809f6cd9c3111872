//! Turns validated component definitions into impedance models.
//!
//! Every value the study leaves unstated is filled from [`ModelDefaults`]
//! here, and each fill is recorded as a ledger assumption.

use ff_components::{
    Cable, ConductorMaterial, Generator, ImpedanceAt, ImpedanceModel, ModelDefaults, Motor,
    MotorKind, PowerUnit, ShortCircuitLevel, Transformer, Utility,
};
use ff_core::Ledger;
use ff_core::units::constants::HP_TO_W;
use ff_core::units::{Voltage, ka, kva, kw, m, mva, volts, watts};
use ff_project::{ComponentDef, ComponentKind, DefaultsDef};

use crate::error::EngineResult;

/// Built-in defaults with the study's overrides applied.
pub fn model_defaults(overrides: &DefaultsDef) -> ModelDefaults {
    let mut d = ModelDefaults::default();
    if let Some(v) = overrides.utility_x_r {
        d.utility_x_r = v;
    }
    if let Some(v) = overrides.generator_x_r {
        d.generator_x_r = v;
    }
    if let Some(bands) = &overrides.transformer_x_r_bands {
        d.transformer_x_r_bands = bands.clone();
    }
    if let Some(v) = overrides.transformer_x_r_above {
        d.transformer_x_r_above = v;
    }
    if let Some(v) = overrides.cable_temperature_c {
        d.cable_temperature_c = v;
    }
    if let Some(v) = overrides.motor_efficiency {
        d.motor_efficiency = v;
    }
    if let Some(v) = overrides.motor_power_factor {
        d.motor_power_factor = v;
    }
    if let Some(v) = overrides.induction {
        d.induction = v;
    }
    if let Some(v) = overrides.synchronous {
        d.synchronous = v;
    }
    d
}

/// A component's impedance model.
#[derive(Debug, Clone)]
pub enum CompiledModel {
    Utility(Utility),
    Transformer(Transformer),
    Cable(Cable),
    Motor(Motor),
    Generator(Generator),
}

impl CompiledModel {
    pub fn as_impedance_model(&self) -> &dyn ImpedanceModel {
        match self {
            CompiledModel::Utility(u) => u,
            CompiledModel::Transformer(t) => t,
            CompiledModel::Cable(c) => c,
            CompiledModel::Motor(mo) => mo,
            CompiledModel::Generator(g) => g,
        }
    }

    /// Voltage the model's impedance is stated at; a transformer's secondary.
    pub fn native_voltage(&self) -> Voltage {
        self.as_impedance_model().native_voltage()
    }

    pub fn impedance(&self, ledger: &mut Ledger) -> EngineResult<ImpedanceAt> {
        Ok(self.as_impedance_model().impedance(ledger)?)
    }
}

/// Build the model for `def`. `bus_voltage` is the voltage of the bus the
/// component attaches to; it stands in for any unstated component voltage.
pub fn compile(
    def: &ComponentDef,
    bus_voltage: Voltage,
    defaults: &ModelDefaults,
    ledger: &mut Ledger,
) -> CompiledModel {
    let id = def.id.as_str();
    match &def.kind {
        ComponentKind::Utility {
            voltage_v,
            fault_mva,
            fault_current_ka,
            x_r,
        } => {
            let voltage = voltage_or_bus(*voltage_v, bus_voltage, id, "utility", ledger);
            // Validation guarantees exactly one of the two levels.
            let level = match (fault_mva, fault_current_ka) {
                (Some(s), _) => ShortCircuitLevel::Power(mva(*s)),
                (None, Some(i)) => ShortCircuitLevel::Current(ka(*i)),
                (None, None) => ShortCircuitLevel::Power(mva(0.0)),
            };
            let x_r = x_r.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "utility.x_r",
                    format!("X/R not given; using default {}", defaults.utility_x_r),
                );
                defaults.utility_x_r
            });
            CompiledModel::Utility(Utility::new(id, voltage, level, x_r))
        }
        ComponentKind::Transformer {
            primary_voltage_v,
            secondary_voltage_v,
            rated_power,
            power_unit,
            percent_z,
            x_r,
        } => {
            let secondary = volts(*secondary_voltage_v);
            let unit = power_unit.unwrap_or_else(|| {
                let inferred = PowerUnit::infer_from_secondary(secondary);
                ledger.assume(
                    id,
                    "transformer.power_unit",
                    format!(
                        "rated_power {} has no unit; read as {} from the {} V secondary",
                        rated_power,
                        inferred.label(),
                        secondary_voltage_v
                    ),
                );
                inferred
            });
            let rating = unit.apply(*rated_power);
            let rating_mva = ff_core::units::to_mva(rating);
            let x_r = x_r.unwrap_or_else(|| {
                let banded = defaults.transformer_x_r(rating_mva);
                ledger.assume(
                    id,
                    "transformer.x_r",
                    format!("X/R not given; using {banded} for a {rating_mva} MVA rating"),
                );
                banded
            });
            CompiledModel::Transformer(Transformer::new(
                id,
                volts(*primary_voltage_v),
                secondary,
                rating,
                *percent_z,
                x_r,
            ))
        }
        ComponentKind::Cable {
            voltage_v,
            length_m,
            r_ohm_per_km,
            x_ohm_per_km,
            temperature_c,
            material,
            sets,
        } => {
            let voltage = voltage_or_bus(*voltage_v, bus_voltage, id, "cable", ledger);
            let temperature_c = temperature_c.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "cable.temperature",
                    format!(
                        "conductor temperature not given; correcting resistance to {} °C",
                        defaults.cable_temperature_c
                    ),
                );
                defaults.cable_temperature_c
            });
            CompiledModel::Cable(Cable::new(
                id,
                voltage,
                m(*length_m),
                *r_ohm_per_km,
                *x_ohm_per_km,
                temperature_c,
                material.unwrap_or(ConductorMaterial::Copper),
                sets.unwrap_or(1),
            ))
        }
        ComponentKind::Motor {
            voltage_v,
            rated_kw,
            rated_hp,
            motor_type,
            efficiency,
            power_factor,
            locked_rotor_multiplier,
            x_r,
            quantity,
        } => {
            let voltage = voltage_or_bus(*voltage_v, bus_voltage, id, "motor", ledger);
            let kind = motor_type.unwrap_or_else(|| {
                ledger.assume(id, "motor.type", "motor type not given; assuming induction");
                MotorKind::Induction
            });
            let rated_power = match (rated_kw, rated_hp) {
                (Some(p), _) => kw(*p),
                (None, Some(hp)) => watts(hp * HP_TO_W),
                (None, None) => kw(0.0),
            };
            let machine = defaults.motor(kind);
            let efficiency = efficiency.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "motor.efficiency",
                    format!("efficiency not given; using {}", defaults.motor_efficiency),
                );
                defaults.motor_efficiency
            });
            let power_factor = power_factor.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "motor.power_factor",
                    format!("power factor not given; using {}", defaults.motor_power_factor),
                );
                defaults.motor_power_factor
            });
            let lr_multiplier = locked_rotor_multiplier.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "motor.locked_rotor_multiplier",
                    format!(
                        "locked rotor multiplier not given; using {} x FLA",
                        machine.locked_rotor_multiplier
                    ),
                );
                machine.locked_rotor_multiplier
            });
            let x_r = x_r.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "motor.x_r",
                    format!("locked rotor X/R not given; using {}", machine.locked_rotor_x_r),
                );
                machine.locked_rotor_x_r
            });
            CompiledModel::Motor(Motor::new(
                id,
                kind,
                voltage,
                rated_power,
                efficiency,
                power_factor,
                lr_multiplier,
                x_r,
                quantity.unwrap_or(1),
            ))
        }
        ComponentKind::Generator {
            voltage_v,
            rated_kva,
            subtransient_pct,
            x_r,
        } => {
            let x_r = x_r.unwrap_or_else(|| {
                ledger.assume(
                    id,
                    "generator.x_r",
                    format!("X/R not given; using default {}", defaults.generator_x_r),
                );
                defaults.generator_x_r
            });
            CompiledModel::Generator(Generator::new(
                id,
                volts(*voltage_v),
                kva(*rated_kva),
                *subtransient_pct,
                x_r,
            ))
        }
    }
}

fn voltage_or_bus(
    voltage_v: Option<f64>,
    bus_voltage: Voltage,
    id: &str,
    kind: &str,
    ledger: &mut Ledger,
) -> Voltage {
    match voltage_v {
        Some(v) => volts(v),
        None => {
            ledger.assume(
                id,
                format!("{kind}.voltage"),
                format!(
                    "{kind} voltage not given; using the {} V bus voltage",
                    bus_voltage.value
                ),
            );
            bus_voltage
        }
    }
}

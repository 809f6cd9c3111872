//! Motor contribution to bus fault current.
//!
//! Motors act as current sources in parallel with the network. Their
//! contributions are plain sums added to the bolted bus current at three
//! points in time.

use ff_components::ModelDefaults;
use ff_core::Ledger;
use ff_core::units::{Voltage, to_ka};
use ff_results::{ContributionTimeline, FaultResult, MotorContributionRecord, WithMotors};

use crate::error::EngineResult;
use crate::topology::PlacedMotor;

/// Contribution of one motor entry, quantity included, seen at a bus.
pub fn contribution(
    placed: &PlacedMotor,
    bus_voltage: Voltage,
    defaults: &ModelDefaults,
    ledger: &mut Ledger,
) -> EngineResult<MotorContributionRecord> {
    let motor = &placed.motor;
    let lr = motor.locked_rotor(ledger)?;
    let machine = defaults.motor(motor.kind);

    let scale = if motor.voltage == bus_voltage {
        1.0
    } else {
        let scale = ledger.guarded_div(
            motor.voltage.value,
            bus_voltage.value,
            1.0,
            &placed.id,
            "motor voltage scaling",
        );
        ledger.assume(
            &placed.id,
            "motor.voltage_scale",
            format!(
                "motor rated {} V on a {} V bus; currents scaled by {:.4}",
                motor.voltage.value, bus_voltage.value, scale
            ),
        );
        scale
    };

    let n = f64::from(motor.quantity);
    let first_cycle_ka = to_ka(lr.lra) * n * scale;
    let timeline = ContributionTimeline {
        first_cycle_ka,
        interrupting_ka: first_cycle_ka * machine.interrupting_decay,
        sustained_ka: to_ka(lr.fla) * n * scale * machine.sustained_multiplier,
    };

    Ok(MotorContributionRecord {
        component_id: placed.id.clone(),
        name: placed.name.clone(),
        kind: motor.kind,
        quantity: motor.quantity,
        voltage_v: motor.voltage.value,
        fla_a: lr.fla.value,
        lra_a: lr.lra.value,
        r_ohm: lr.z.z.r,
        x_ohm: lr.z.z.x,
        voltage_scale: scale,
        timeline,
    })
}

/// Sum of the contribution timelines.
pub fn total(contributions: &[MotorContributionRecord]) -> ContributionTimeline {
    contributions
        .iter()
        .fold(ContributionTimeline::default(), |acc, c| ContributionTimeline {
            first_cycle_ka: acc.first_cycle_ka + c.timeline.first_cycle_ka,
            interrupting_ka: acc.interrupting_ka + c.timeline.interrupting_ka,
            sustained_ka: acc.sustained_ka + c.timeline.sustained_ka,
        })
}

/// Bolted values with motors added. `None` when the bus has no motors.
pub fn with_motors(fault: &FaultResult, contributions: &[MotorContributionRecord]) -> Option<WithMotors> {
    if contributions.is_empty() {
        return None;
    }
    let motors = total(contributions);
    let bolted = fault.three_phase.ka;
    // Motor current shares the bus peak factor.
    let peak_factor = if bolted > 0.0 { fault.peak_ka / bolted } else { 0.0 };
    Some(WithMotors {
        motor_first_cycle_ka: motors.first_cycle_ka,
        motor_interrupting_ka: motors.interrupting_ka,
        motor_sustained_ka: motors.sustained_ka,
        first_cycle_ka: bolted + motors.first_cycle_ka,
        interrupting_ka: bolted + motors.interrupting_ka,
        sustained_ka: bolted + motors.sustained_ka,
        peak_ka: fault.peak_ka + motors.first_cycle_ka * peak_factor,
    })
}

//! Sequential topology walk over the ordered component list.
//!
//! A current-bus pointer starts at the source bus `BUS-1`. Sources and cables
//! add shunt impedance where the pointer is, transformers open a new voltage
//! level and move the pointer, motors attach without impedance. Explicit
//! `from_bus` and `to_bus` always win over the pointer.

use ff_components::Motor;
use ff_core::units::{Voltage, volts};
use ff_core::{BusId, CompId};
use ff_graph::{BusRole, Topology, TopologyBuilder, TopologyError};
use ff_project::{ComponentDef, ComponentKind, StudyDef};
use ff_results::{BusSummary, EdgeSummary, TopologySummary};

use crate::compile::{CompiledModel, compile};
use crate::error::EngineResult;
use crate::state::RunState;

pub const SOURCE_BUS: &str = "BUS-1";

/// Relative voltage difference above which two nominal voltages are
/// reported as mismatched.
const VOLTAGE_MISMATCH: f64 = 0.01;

/// A component placed in the network.
#[derive(Debug, Clone)]
pub struct Placed {
    pub id: String,
    pub name: String,
    pub bus: BusId,
    pub model: CompiledModel,
}

/// A motor and the bus it contributes to.
#[derive(Debug, Clone)]
pub struct PlacedMotor {
    pub comp: CompId,
    pub id: String,
    pub name: String,
    pub bus: BusId,
    pub motor: Motor,
}

#[derive(Debug, Clone)]
pub struct Network {
    pub topology: Topology,
    /// Indexed by `CompId::slot`, in input order.
    pub components: Vec<Placed>,
    pub motors: Vec<PlacedMotor>,
}

impl Network {
    pub fn motors_at(&self, bus: BusId) -> impl Iterator<Item = &PlacedMotor> {
        self.motors.iter().filter(move |m| m.bus == bus)
    }

    pub fn summary(&self) -> TopologySummary {
        let t = &self.topology;
        let bus_name = |id: BusId| t.bus(id).map(|b| b.name.clone()).unwrap_or_default();
        let comp_id = |id: CompId| {
            self.components
                .get(id.slot())
                .map(|c| c.id.clone())
                .unwrap_or_default()
        };
        TopologySummary {
            source_bus: bus_name(t.source()),
            buses: t
                .buses()
                .iter()
                .map(|b| BusSummary {
                    name: b.name.clone(),
                    voltage_v: b.voltage.value,
                    role: b.role.label().to_string(),
                    components: b.components.iter().map(|c| comp_id(*c)).collect(),
                })
                .collect(),
            edges: t
                .edges()
                .iter()
                .map(|e| EdgeSummary {
                    from: bus_name(e.from),
                    to: bus_name(e.to),
                    component: comp_id(e.component),
                    r_ohm: e.z.z.r,
                    x_ohm: e.z.z.x,
                    voltage_v: e.z.voltage.value,
                })
                .collect(),
        }
    }
}

struct Walk<'a> {
    builder: TopologyBuilder,
    state: &'a mut RunState,
    current: BusId,
    components: Vec<Placed>,
    motors: Vec<PlacedMotor>,
    next_auto: usize,
}

impl Walk<'_> {
    fn bus_voltage(&self, bus: BusId) -> EngineResult<Voltage> {
        self.builder
            .bus(bus)
            .map(|b| b.voltage)
            .ok_or_else(|| TopologyError::InvalidBusRef { bus }.into())
    }

    fn resolve(&self, def: &ComponentDef, name: &str) -> Result<BusId, TopologyError> {
        self.builder
            .find(name)
            .ok_or_else(|| TopologyError::UnresolvedBus {
                component: def.id.clone(),
                reference: name.to_string(),
            })
    }

    /// Bus the component is fed from: `from_bus` when given, else the pointer.
    fn from_bus(&self, def: &ComponentDef) -> Result<BusId, TopologyError> {
        match &def.from_bus {
            Some(name) => self.resolve(def, name),
            None => Ok(self.current),
        }
    }

    fn auto_name(&mut self) -> String {
        loop {
            self.next_auto += 1;
            let name = format!("BUS-{}", self.next_auto);
            if self.builder.find(&name).is_none() {
                return name;
            }
        }
    }

    fn new_bus(&mut self, name: Option<&str>, voltage: Voltage) -> EngineResult<BusId> {
        let name = match name {
            Some(n) => n.to_string(),
            None => self.auto_name(),
        };
        let id = self.builder.add_bus(name.clone(), voltage, BusRole::Load)?;
        self.state
            .log("topology", format!("created bus {name} at {} V", voltage.value));
        Ok(id)
    }

    fn place(&mut self, def: &ComponentDef) -> EngineResult<()> {
        let comp = CompId::from_index(self.components.len() as u32);
        match &def.kind {
            ComponentKind::Utility { .. } | ComponentKind::Generator { .. } => {
                let bus = match def.to_bus.as_deref().or(def.from_bus.as_deref()) {
                    Some(name) => self.resolve(def, name)?,
                    None => self.current,
                };
                let model = self.compile_at(def, bus)?;
                let z = model.impedance(&mut self.state.ledger)?;
                self.builder.attach_shunt(bus, comp, z)?;
                self.current = bus;
                self.push(def, bus, model);
            }
            ComponentKind::Cable { .. } => {
                let from = self.from_bus(def)?;
                let model = self.compile_at(def, from)?;
                let z = model.impedance(&mut self.state.ledger)?;
                let target = match def.to_bus.as_deref() {
                    None => {
                        self.builder.attach_shunt(from, comp, z)?;
                        from
                    }
                    Some(name) => match self.builder.find(name) {
                        Some(existing) => {
                            self.builder.attach_shunt(existing, comp, z)?;
                            existing
                        }
                        None => {
                            let to = self.new_bus(Some(name), model.native_voltage())?;
                            self.builder.add_edge(from, to, comp, z)?;
                            to
                        }
                    },
                };
                self.current = target;
                self.push(def, target, model);
            }
            ComponentKind::Transformer {
                primary_voltage_v, ..
            } => {
                let from = self.from_bus(def)?;
                let from_v = self.bus_voltage(from)?;
                if mismatched(from_v.value, *primary_voltage_v) {
                    self.state.ledger.warn(
                        &def.id,
                        "transformer.primary_voltage",
                        format!(
                            "primary rated {} V but fed from a {} V bus",
                            primary_voltage_v, from_v.value
                        ),
                    );
                }
                let model = self.compile_at(def, from)?;
                let z = model.impedance(&mut self.state.ledger)?;
                let secondary = model.native_voltage();
                let to = match def.to_bus.as_deref() {
                    Some(name) => match self.builder.find(name) {
                        Some(existing) => {
                            let bus_v = self.bus_voltage(existing)?;
                            if mismatched(bus_v.value, secondary.value) {
                                self.state.ledger.warn(
                                    &def.id,
                                    "transformer.secondary_voltage",
                                    format!(
                                        "secondary rated {} V but feeds the {} V bus '{name}'",
                                        secondary.value, bus_v.value
                                    ),
                                );
                            }
                            existing
                        }
                        None => self.new_bus(Some(name), secondary)?,
                    },
                    None => self.new_bus(None, secondary)?,
                };
                self.builder.add_edge(from, to, comp, z)?;
                self.current = to;
                self.push(def, to, model);
            }
            ComponentKind::Motor { .. } => {
                let bus = match def.to_bus.as_deref().or(def.from_bus.as_deref()) {
                    Some(name) => self.resolve(def, name)?,
                    None => self.current,
                };
                let model = self.compile_at(def, bus)?;
                self.builder.attach(bus, comp)?;
                if let CompiledModel::Motor(motor) = &model {
                    self.motors.push(PlacedMotor {
                        comp,
                        id: def.id.clone(),
                        name: def.label().to_string(),
                        bus,
                        motor: motor.clone(),
                    });
                }
                self.push(def, bus, model);
            }
        }
        Ok(())
    }

    fn compile_at(&mut self, def: &ComponentDef, bus: BusId) -> EngineResult<CompiledModel> {
        let voltage = self.bus_voltage(bus)?;
        Ok(compile(
            def,
            voltage,
            &self.state.defaults,
            &mut self.state.ledger,
        ))
    }

    fn push(&mut self, def: &ComponentDef, bus: BusId, model: CompiledModel) {
        self.components.push(Placed {
            id: def.id.clone(),
            name: def.label().to_string(),
            bus,
            model,
        });
    }
}

fn mismatched(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    scale > 0.0 && (a - b).abs() / scale > VOLTAGE_MISMATCH
}

/// Walk the study's components and build a validated network.
pub fn build_network(study: &StudyDef, state: &mut RunState) -> EngineResult<Network> {
    if !study.components.iter().any(|c| c.kind.is_source()) {
        return Err(TopologyError::NoSource.into());
    }

    let mut builder = TopologyBuilder::new();
    let source = builder.add_bus(SOURCE_BUS, volts(study.system.voltage_v), BusRole::Source)?;
    state.log(
        "topology",
        format!("source bus {SOURCE_BUS} at {} V", study.system.voltage_v),
    );

    let mut walk = Walk {
        builder,
        state,
        current: source,
        components: Vec::with_capacity(study.components.len()),
        motors: Vec::new(),
        next_auto: 1,
    };
    for def in &study.components {
        walk.place(def)?;
    }

    let Walk {
        builder,
        state,
        components,
        motors,
        ..
    } = walk;
    let (topology, report) = builder.build()?;

    for id in &report.isolated {
        if let Some(bus) = topology.bus(*id) {
            state.ledger.warn(
                &bus.name,
                "topology.isolated_bus",
                "bus has no connections",
            );
        }
    }
    for id in &report.multiply_fed {
        if let Some(bus) = topology.bus(*id) {
            state.ledger.warn(
                &bus.name,
                "topology.parallel_feed",
                "bus is fed over more than one path; only the shortest is aggregated",
            );
        }
    }

    state.log(
        "topology",
        format!(
            "{} buses, {} edges, {} motors",
            topology.buses().len(),
            topology.edges().len(),
            motors.len()
        ),
    );
    Ok(Network {
        topology,
        components,
        motors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_project::parse_yaml;

    fn network(yaml: &str) -> EngineResult<(Network, RunState)> {
        let study = parse_yaml(yaml).unwrap();
        let mut state = RunState::new(&study);
        let net = build_network(&study, &mut state)?;
        Ok((net, state))
    }

    #[test]
    fn sequential_chain() {
        let (net, _) = network(
            r#"
version: 1
name: chain
system: { voltage_v: 13800 }
components:
  - id: u
    kind: { type: utility, fault_mva: 500 }
  - id: t
    kind: { type: transformer, primary_voltage_v: 13800, secondary_voltage_v: 480, rated_power: 1500, percent_z: 5.75 }
  - id: c
    kind: { type: cable, length_m: 30, r_ohm_per_km: 0.1, x_ohm_per_km: 0.08 }
  - id: m
    kind: { type: motor, rated_kw: 50 }
"#,
        )
        .unwrap();
        let t = &net.topology;
        assert_eq!(t.buses().len(), 2);
        let lv = t.bus_by_name("BUS-2").unwrap();
        assert_eq!(lv.voltage.value, 480.0);
        // Cable shunt plus the motor, both on the LV bus.
        assert!(lv.shunt.magnitude() > 0.0);
        assert_eq!(net.motors.len(), 1);
        assert_eq!(net.motors[0].bus, lv.id);
        assert_eq!(t.edges().len(), 1);
    }

    #[test]
    fn cable_to_new_bus_creates_edge() {
        let (net, _) = network(
            r#"
version: 1
name: branch
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 30 }
  - id: c
    kind: { type: cable, length_m: 50, r_ohm_per_km: 0.1, x_ohm_per_km: 0.08 }
    to_bus: MCC
"#,
        )
        .unwrap();
        let t = &net.topology;
        let mcc = t.bus_by_name("MCC").unwrap();
        assert_eq!(mcc.shunt.magnitude(), 0.0);
        assert_eq!(t.path_from_source(mcc.id).len(), 1);
    }

    #[test]
    fn unresolved_from_bus_is_an_error() {
        let err = network(
            r#"
version: 1
name: bad ref
system: { voltage_v: 480 }
components:
  - id: u
    kind: { type: utility, fault_current_ka: 30 }
  - id: c
    kind: { type: cable, length_m: 50, r_ohm_per_km: 0.1, x_ohm_per_km: 0.08 }
    from_bus: NOWHERE
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::EngineError::Topology(TopologyError::UnresolvedBus { .. })
        ));
    }

    #[test]
    fn no_source_is_an_error() {
        let err = network(
            r#"
version: 1
name: no source
system: { voltage_v: 480 }
components:
  - id: c
    kind: { type: cable, length_m: 50, r_ohm_per_km: 0.1, x_ohm_per_km: 0.08 }
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::EngineError::Topology(TopologyError::NoSource)
        ));
    }

    #[test]
    fn primary_mismatch_is_warned() {
        let (_, state) = network(
            r#"
version: 1
name: mismatch
system: { voltage_v: 12470 }
components:
  - id: u
    kind: { type: utility, fault_mva: 250 }
  - id: t
    kind: { type: transformer, primary_voltage_v: 13800, secondary_voltage_v: 480, rated_power: 1000, power_unit: kVA, percent_z: 5.75, x_r: 6 }
"#,
        )
        .unwrap();
        assert_eq!(state.ledger.by_topic("transformer.primary_voltage").count(), 1);
    }
}

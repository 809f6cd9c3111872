//! Incremental topology builder.

use std::collections::HashMap;

use ff_components::ImpedanceAt;
use ff_core::units::Voltage;
use ff_core::{BusId, CompId, EdgeId};

use crate::error::{TopologyError, TopologyResult};
use crate::topology::{Bus, BusRole, Edge, Topology};
use crate::validate;

/// Non-blocking findings from `TopologyBuilder::build`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Non-source buses with no edges at all.
    pub isolated: Vec<BusId>,
    /// Buses reachable over more than one incoming edge; only the first path
    /// found (fewest edges) is used for aggregation.
    pub multiply_fed: Vec<BusId>,
}

/// Builder for constructing a topology incrementally.
///
/// Use `add_bus`, `attach_shunt` and `add_edge` to build up the network,
/// then call `build()` to validate and freeze it into an immutable `Topology`.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    buses: Vec<Bus>,
    edges: Vec<Edge>,
    names: HashMap<String, BusId>,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bus and return its ID. Bus names must be unique.
    pub fn add_bus(
        &mut self,
        name: impl Into<String>,
        voltage: Voltage,
        role: BusRole,
    ) -> TopologyResult<BusId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(TopologyError::DuplicateBus { name });
        }
        let id = BusId::from_index(self.buses.len() as u32);
        self.names.insert(name.clone(), id);
        self.buses.push(Bus {
            id,
            name,
            voltage,
            role,
            shunt: Default::default(),
            components: Vec::new(),
            adjacent: Vec::new(),
        });
        Ok(id)
    }

    /// Look up a bus by name.
    pub fn find(&self, name: &str) -> Option<BusId> {
        self.names.get(name).copied()
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.slot())
    }

    fn bus_mut(&mut self, id: BusId) -> TopologyResult<&mut Bus> {
        self.buses
            .get_mut(id.slot())
            .ok_or(TopologyError::InvalidBusRef { bus: id })
    }

    /// Attach a component that contributes no impedance (e.g. a motor).
    pub fn attach(&mut self, bus: BusId, comp: CompId) -> TopologyResult<()> {
        self.bus_mut(bus)?.components.push(comp);
        Ok(())
    }

    /// Attach a component's impedance to a bus, referring it to the bus
    /// voltage first.
    ///
    /// Returns the impedance as added, at the bus voltage.
    pub fn attach_shunt(
        &mut self,
        bus: BusId,
        comp: CompId,
        z: ImpedanceAt,
    ) -> TopologyResult<ImpedanceAt> {
        let bus = self.bus_mut(bus)?;
        let at_bus = if z.needs_referral(bus.voltage) {
            z.referred_to(bus.voltage)
        } else {
            z
        };
        bus.shunt += at_bus.z;
        bus.components.push(comp);
        Ok(at_bus)
    }

    /// Add a directed edge carrying a series impedance.
    pub fn add_edge(
        &mut self,
        from: BusId,
        to: BusId,
        comp: CompId,
        z: ImpedanceAt,
    ) -> TopologyResult<EdgeId> {
        if from == to {
            let name = self.bus_mut(from)?.name.clone();
            return Err(TopologyError::SelfLoop { bus: name });
        }
        self.bus_mut(to)?;
        let id = EdgeId::from_index(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            from,
            to,
            component: comp,
            z,
        });

        let from_bus = self.bus_mut(from)?;
        from_bus.components.push(comp);
        if !from_bus.adjacent.contains(&to) {
            from_bus.adjacent.push(to);
        }
        let to_bus = self.bus_mut(to)?;
        if !to_bus.adjacent.contains(&from) {
            to_bus.adjacent.push(from);
        }
        Ok(id)
    }

    /// Validate connectivity and freeze the topology.
    pub fn build(mut self) -> TopologyResult<(Topology, BuildReport)> {
        let source = validate::single_source(&self.buses)?;
        let (feeder, multiply_fed) = validate::feeder_tree(&self.buses, &self.edges, source);
        validate::all_connected_reachable(&self.buses, &feeder, source)?;

        let isolated = self
            .buses
            .iter()
            .filter(|b| b.id != source && b.connection_count() == 0)
            .map(|b| b.id)
            .collect();

        for bus in &mut self.buses {
            if bus.role == BusRole::Source {
                continue;
            }
            let feeds_downstream = self.edges.iter().any(|e| e.from == bus.id);
            bus.role = if feeds_downstream {
                BusRole::Junction
            } else {
                BusRole::Load
            };
        }

        Ok((
            Topology {
                buses: self.buses,
                edges: self.edges,
                source,
                feeder,
            },
            BuildReport {
                isolated,
                multiply_fed,
            },
        ))
    }
}

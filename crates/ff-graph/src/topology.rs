//! Core topology data structures.

use ff_components::{Impedance, ImpedanceAt};
use ff_core::units::Voltage;
use ff_core::{BusId, CompId, EdgeId};

/// Role of a bus in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusRole {
    /// The single bus fed by the utility/generator sources.
    Source,
    /// A bus with no downstream edges.
    Load,
    /// A bus that feeds at least one downstream edge.
    Junction,
}

impl BusRole {
    pub fn label(self) -> &'static str {
        match self {
            BusRole::Source => "source",
            BusRole::Load => "load",
            BusRole::Junction => "junction",
        }
    }
}

/// A node in the network at a single nominal voltage.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub voltage: Voltage,
    pub role: BusRole,
    /// Sum of impedances attached directly to this bus, at the bus voltage.
    pub shunt: Impedance,
    /// Components attached to this bus, in input order.
    pub components: Vec<CompId>,
    /// Buses sharing an edge with this bus (either direction).
    pub adjacent: Vec<BusId>,
}

impl Bus {
    pub fn connection_count(&self) -> usize {
        self.adjacent.len()
    }
}

/// A directed, voltage-level-bounded connection between two buses.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: BusId,
    pub to: BusId,
    /// Component that created this edge (transformer or cable).
    pub component: CompId,
    /// Series impedance of the edge at its native voltage.
    pub z: ImpedanceAt,
}

/// The validated, immutable network topology.
///
/// The topology stores:
/// - All buses and edges in vectors (indexed by their IDs).
/// - For each bus, the edge through which the source reaches it.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) buses: Vec<Bus>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) source: BusId,
    /// Edge on the source path into each bus; `None` for the source bus and
    /// for isolated buses.
    pub(crate) feeder: Vec<Option<EdgeId>>,
}

impl Topology {
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn source(&self) -> BusId {
        self.source
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.slot())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.slot())
    }

    pub fn bus_by_name(&self, name: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.name == name)
    }

    /// True if the bus is the source or is fed from it.
    pub fn is_energized(&self, id: BusId) -> bool {
        id == self.source || self.feeder.get(id.slot()).is_some_and(Option::is_some)
    }

    /// Edges from the source bus down to `id`, in source-to-bus order.
    ///
    /// Empty for the source bus and for buses the source does not reach.
    pub fn path_from_source(&self, id: BusId) -> Vec<EdgeId> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(Some(edge_id)) = self.feeder.get(current.slot()) {
            path.push(*edge_id);
            current = self.edges[edge_id.slot()].from;
            // A well-formed feeder tree never revisits; bail out rather than spin.
            if path.len() > self.edges.len() {
                break;
            }
        }
        path.reverse();
        path
    }

    /// Buses on the source path, starting at the source and ending at `id`.
    pub fn buses_on_path(&self, id: BusId) -> Vec<BusId> {
        if !self.is_energized(id) {
            return vec![id];
        }
        let mut buses = vec![self.source];
        for edge_id in self.path_from_source(id) {
            buses.push(self.edges[edge_id.slot()].to);
        }
        buses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TopologyBuilder;
    use ff_core::units::volts;

    fn z(v: f64) -> ImpedanceAt {
        ImpedanceAt::new(Impedance::new(0.01, 0.05), volts(v))
    }

    #[test]
    fn path_queries_follow_feeder_chain() {
        let mut b = TopologyBuilder::new();
        let s = b.add_bus("S", volts(13_800.0), BusRole::Source).unwrap();
        let m = b.add_bus("M", volts(4160.0), BusRole::Load).unwrap();
        let l = b.add_bus("L", volts(480.0), BusRole::Load).unwrap();
        let e1 = b.add_edge(s, m, CompId::from_index(1), z(4160.0)).unwrap();
        let e2 = b.add_edge(m, l, CompId::from_index(2), z(480.0)).unwrap();
        let (t, _) = b.build().unwrap();

        assert!(t.path_from_source(s).is_empty());
        assert_eq!(t.path_from_source(l), vec![e1, e2]);
        assert_eq!(t.buses_on_path(l), vec![s, m, l]);
        assert_eq!(t.bus(m).unwrap().role, BusRole::Junction);
        assert_eq!(t.bus(l).unwrap().role, BusRole::Load);
        assert_eq!(t.bus_by_name("M").unwrap().id, m);
    }

    #[test]
    fn role_labels() {
        assert_eq!(BusRole::Source.label(), "source");
        assert_eq!(BusRole::Junction.label(), "junction");
    }
}

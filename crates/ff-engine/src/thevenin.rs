//! Thevenin impedance seen from each bus.

use ff_components::Impedance;
use ff_core::numeric::NEAR_ZERO;
use ff_core::{BusId, Ledger};
use ff_graph::Topology;
use ff_results::TheveninRecord;

/// Aggregated source impedance at one bus, stated at the bus voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusThevenin {
    pub bus: BusId,
    pub z: Impedance,
    /// False when |Z| is too small to compute a fault current from.
    pub faultable: bool,
}

impl BusThevenin {
    pub fn record(&self) -> TheveninRecord {
        TheveninRecord {
            r_ohm: self.z.r,
            x_ohm: self.z.x,
            z_ohm: self.z.magnitude(),
            x_r: self.z.x_over_r(),
        }
    }
}

/// Sum of every shunt on the source path plus every edge on it, each
/// referred to the voltage of `bus`.
pub fn path_impedance(topology: &Topology, bus: BusId) -> Option<Impedance> {
    let target = topology.bus(bus)?;
    let shunts = topology
        .buses_on_path(bus)
        .into_iter()
        .filter_map(|id| topology.bus(id))
        .map(|b| ff_components::refer(b.shunt, b.voltage, target.voltage));
    let series = topology
        .path_from_source(bus)
        .into_iter()
        .filter_map(|id| topology.edge(id))
        .map(|e| {
            if e.z.needs_referral(target.voltage) {
                e.z.referred_to(target.voltage).z
            } else {
                e.z.z
            }
        });
    Some(shunts.chain(series).sum())
}

pub fn aggregate(topology: &Topology, ledger: &mut Ledger) -> Vec<BusThevenin> {
    let mut out = Vec::with_capacity(topology.buses().len());
    for bus in topology.buses() {
        let z = path_impedance(topology, bus.id).unwrap_or(Impedance::ZERO);
        let faultable = z.is_finite() && z.magnitude() > NEAR_ZERO;
        if !faultable {
            ledger.warn(
                &bus.name,
                "thevenin.zero_impedance",
                "aggregated impedance is zero; bus excluded from fault calculation",
            );
        } else if z.has_negligible_r() {
            ledger.warn(
                &bus.name,
                "thevenin.negligible_resistance",
                format!(
                    "resistance {:.3e} ohm is negligible; X/R computed with a floored R",
                    z.r
                ),
            );
        }
        out.push(BusThevenin {
            bus: bus.id,
            z,
            faultable,
        });
    }
    out
}

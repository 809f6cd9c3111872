//! Topology validation logic.

use std::collections::VecDeque;

use ff_core::{BusId, EdgeId};

use crate::error::{TopologyError, TopologyResult};
use crate::topology::{Bus, BusRole, Edge};

/// Exactly one bus must carry the source role.
pub(crate) fn single_source(buses: &[Bus]) -> TopologyResult<BusId> {
    let mut sources = buses.iter().filter(|b| b.role == BusRole::Source);
    let first = sources.next().ok_or(TopologyError::NoSource)?;
    let extra = sources.count();
    if extra > 0 {
        return Err(TopologyError::MultipleSources { count: extra + 1 });
    }
    Ok(first.id)
}

/// Breadth-first walk along edge direction from the source.
///
/// Returns the feeding edge for every reached bus (fewest-edge path wins) and
/// the buses that more than one reached edge points into.
pub(crate) fn feeder_tree(
    buses: &[Bus],
    edges: &[Edge],
    source: BusId,
) -> (Vec<Option<EdgeId>>, Vec<BusId>) {
    let mut feeder: Vec<Option<EdgeId>> = vec![None; buses.len()];
    let mut visited = vec![false; buses.len()];
    let mut multiply_fed = Vec::new();
    let mut queue = VecDeque::from([source]);
    visited[source.slot()] = true;

    while let Some(bus) = queue.pop_front() {
        for edge in edges.iter().filter(|e| e.from == bus) {
            let to = edge.to.slot();
            if to >= buses.len() {
                continue;
            }
            if visited[to] {
                if edge.to != source && !multiply_fed.contains(&edge.to) {
                    multiply_fed.push(edge.to);
                }
                continue;
            }
            visited[to] = true;
            feeder[to] = Some(edge.id);
            queue.push_back(edge.to);
        }
    }

    (feeder, multiply_fed)
}

/// Every bus that has a connection must be fed from the source.
pub(crate) fn all_connected_reachable(
    buses: &[Bus],
    feeder: &[Option<EdgeId>],
    source: BusId,
) -> TopologyResult<()> {
    for bus in buses {
        if bus.id == source || bus.connection_count() == 0 {
            continue;
        }
        if feeder[bus.id.slot()].is_none() {
            return Err(TopologyError::Unreachable {
                bus: bus.name.clone(),
            });
        }
    }
    Ok(())
}

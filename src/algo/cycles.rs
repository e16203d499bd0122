//! Directed cycles (round-tripping money)

use super::view::{node_id, SnapshotView};
use crate::graph::{GraphSnapshot, Link, LinkId, NodeId};
use casegraph_algorithms::cycles::{dedup_cycles, detect_cycles as find_cycles, CycleResult as RawCycle};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    /// Nodes in link order; the first node is not repeated at the end
    pub nodes: Vec<NodeId>,
    /// Links walked, `links[i]` leaving `nodes[i]`
    pub links: Vec<LinkId>,
    pub length: usize,
    /// Sum of the amounts of the cycle's links
    pub total_amount: f64,
}

/// Directed cycles over valid transfer links, self-loops included.
///
/// The same loop may be reported more than once when parallel links close
/// it; [`detect_unique_cycles`] collapses those.
pub fn detect_cycles(snapshot: &GraphSnapshot) -> Vec<CycleResult> {
    detect_cycles_matching(snapshot, Link::is_transfer)
}

/// [`detect_cycles`] keeping one report per distinct node cycle
pub fn detect_unique_cycles(snapshot: &GraphSnapshot) -> Vec<CycleResult> {
    let sv = SnapshotView::build(snapshot, Link::is_transfer, None);
    dedup_cycles(find_cycles(&sv.view))
        .into_iter()
        .map(|raw| to_result(&sv, snapshot, raw))
        .collect()
}

/// Directed cycles over the valid links accepted by `include`, e.g. call
/// rings with `|l| l.link_type.as_str() == "CALLED"`.
pub fn detect_cycles_matching<F>(snapshot: &GraphSnapshot, include: F) -> Vec<CycleResult>
where
    F: Fn(&Link) -> bool,
{
    let sv = SnapshotView::build(snapshot, include, None);
    let cycles: Vec<CycleResult> = find_cycles(&sv.view)
        .into_iter()
        .map(|raw| to_result(&sv, snapshot, raw))
        .collect();
    debug!("Found {} cycles among {} nodes", cycles.len(), snapshot.node_count());
    cycles
}

fn to_result(sv: &SnapshotView, snapshot: &GraphSnapshot, raw: RawCycle) -> CycleResult {
    let links: Vec<_> = raw.edges.iter().map(|&pos| sv.link_at(snapshot, pos)).collect();
    CycleResult {
        length: raw.path.len(),
        nodes: raw.path.into_iter().map(|id| node_id(snapshot, id)).collect(),
        total_amount: links.iter().map(|l| l.amount_or_zero()).sum(),
        links: links.into_iter().map(|l| l.id.clone()).collect(),
    }
}

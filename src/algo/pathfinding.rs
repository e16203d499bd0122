//! Shortest path between two entities
//!
//! Links count in both directions and every hop costs 1, so the result is a
//! minimum-hop path. The search runs Dijkstra over a binary heap.

use super::view::{algo_id, node_id, SnapshotView};
use crate::graph::{GraphSnapshot, Link, LinkId, NodeId};
use casegraph_algorithms::{dijkstra, Direction};
use serde::{Deserialize, Serialize};

/// A path for the path-analysis panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub nodes: Vec<NodeId>,
    /// Link joining each consecutive pair of `nodes`
    pub links: Vec<LinkId>,
    /// Number of hops
    pub length: usize,
    /// Sum of the amounts of the links walked
    pub total_amount: f64,
}

/// Minimum-hop path from `source` to `target`, ignoring link direction.
///
/// Returns `None` when either id is unknown, when the target is unreachable
/// and when `source == target`.
pub fn find_shortest_path(snapshot: &GraphSnapshot, source: &NodeId, target: &NodeId) -> Option<PathResult> {
    let sv = SnapshotView::all_links(snapshot);
    shortest_path_in(&sv, snapshot, source, target)
}

/// [`find_shortest_path`] over a prebuilt view, for callers running many
/// searches against one snapshot.
pub(crate) fn shortest_path_in(
    sv: &SnapshotView,
    snapshot: &GraphSnapshot,
    source: &NodeId,
    target: &NodeId,
) -> Option<PathResult> {
    if source == target {
        return None;
    }
    let s = algo_id(snapshot, source)?;
    let t = algo_id(snapshot, target)?;
    let found = dijkstra(&sv.view, s, t, Direction::Both)?;

    let nodes: Vec<NodeId> = found.path.iter().map(|&id| node_id(snapshot, id)).collect();
    let walked: Vec<&Link> = nodes
        .windows(2)
        .filter_map(|pair| link_between(snapshot, &pair[0], &pair[1]))
        .collect();

    Some(PathResult {
        length: found.hops(),
        nodes,
        total_amount: walked.iter().map(|l| l.amount_or_zero()).sum(),
        links: walked.into_iter().map(|l| l.id.clone()).collect(),
    })
}

/// First valid link joining two nodes, in either direction
fn link_between<'a>(snapshot: &'a GraphSnapshot, a: &NodeId, b: &NodeId) -> Option<&'a Link> {
    snapshot.valid_links().find(|link| link.connects(a, b))
}

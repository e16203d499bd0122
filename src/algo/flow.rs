//! Multi-hop money flow tracing
//!
//! Only `TRANSFERRED` links carrying at least `min_amount` are followed,
//! always from source to target.

use super::view::{algo_id, node_id, SnapshotView};
use crate::graph::{GraphSnapshot, Link, LinkId, NodeId};
use casegraph_algorithms::trace_flows;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One traced money trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath {
    pub nodes: Vec<NodeId>,
    pub links: Vec<LinkId>,
    /// Number of hops
    pub length: usize,
    /// Exact sum of the traversed link amounts
    pub total_amount: f64,
}

/// Trace money leaving `source`, up to `max_hops` transfers deep.
///
/// One path is reported per branch end: a node with no further qualifying
/// outgoing transfer to a node not already on the branch, or the hop limit.
/// Branches may share nodes. An unknown source yields no paths.
pub fn trace_money_flow(snapshot: &GraphSnapshot, source: &NodeId, max_hops: usize, min_amount: f64) -> Vec<FlowPath> {
    let Some(source_id) = algo_id(snapshot, source) else {
        debug!("Flow source {} is not in the snapshot", source);
        return Vec::new();
    };

    let sv = SnapshotView::build(
        snapshot,
        |link| link.is_transfer() && link.amount_or_zero() >= min_amount,
        Some(Link::amount_or_zero),
    );

    let paths: Vec<FlowPath> = trace_flows(&sv.view, source_id, max_hops)
        .into_iter()
        .map(|raw| FlowPath {
            length: raw.hops(),
            nodes: raw.path.into_iter().map(|id| node_id(snapshot, id)).collect(),
            links: raw.edges.iter().map(|&pos| sv.link_at(snapshot, pos).id.clone()).collect(),
            total_amount: raw.total,
        })
        .collect();

    debug!(
        "Traced {} flow paths from {} (max_hops={}, min_amount={})",
        paths.len(),
        source,
        max_hops,
        min_amount
    );
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn case() -> GraphSnapshot {
        let nodes = ["v", "m1", "m2", "atm"].iter().map(|id| Node::new(*id, *id, "account")).collect();
        let links = vec![
            Link::transfer("t1", "v", "m1", 50_000.0),
            Link::transfer("t2", "v", "m2", 500.0),
            Link::transfer("t3", "m1", "atm", 49_000.0),
            Link::new("c1", "m2", "atm", "CALLED"),
        ];
        GraphSnapshot::new(nodes, links).unwrap()
    }

    #[test]
    fn test_trace_with_threshold() {
        let flows = trace_money_flow(&case(), &NodeId::new("v"), 5, 1000.0);

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].nodes.len(), 3);
        assert_eq!(flows[0].links, vec![LinkId::new("t1"), LinkId::new("t3")]);
        assert_eq!(flows[0].total_amount, 99_000.0);
    }

    #[test]
    fn test_non_transfer_links_ignored() {
        let flows = trace_money_flow(&case(), &NodeId::new("v"), 5, 0.0);

        assert_eq!(flows.len(), 2);
        // m2 only has a CALLED link onwards, so its trail ends there
        assert_eq!(flows[1].nodes, vec![NodeId::new("v"), NodeId::new("m2")]);
        assert_eq!(flows[1].length, 1);
    }

    #[test]
    fn test_unknown_source() {
        assert!(trace_money_flow(&case(), &NodeId::new("ghost"), 5, 0.0).is_empty());
    }
}

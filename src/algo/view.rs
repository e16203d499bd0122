//! Projection of a snapshot onto the algorithm crate's dense view
//!
//! Dense index `i` is the node at position `i` of [`GraphSnapshot::nodes`];
//! the algorithm-level node id is the same number. A side table maps every
//! stored edge back to the snapshot link it came from, so edge positions
//! reported by the algorithms can be turned into link ids and amounts.

use crate::graph::{GraphSnapshot, Link, NodeId};
use casegraph_algorithms::{GraphView, NodeId as AlgoNodeId};
use std::collections::HashMap;

/// A [`GraphView`] plus the link behind every edge
pub struct SnapshotView {
    pub view: GraphView,
    /// Aligned with `view.out_targets`: position in `snapshot.links()`
    pub edge_links: Vec<usize>,
}

impl SnapshotView {
    /// Build a view over the links accepted by `include`. Dangling links are
    /// always skipped. When `weight` is given the view carries per-edge
    /// weights.
    pub fn build<F>(snapshot: &GraphSnapshot, include: F, weight: Option<fn(&Link) -> f64>) -> Self
    where
        F: Fn(&Link) -> bool,
    {
        let node_count = snapshot.node_count();

        // 1. Index mappings: dense index == snapshot position
        let index_to_node: Vec<AlgoNodeId> = (0..node_count as AlgoNodeId).collect();
        let node_to_index: HashMap<AlgoNodeId, usize> =
            index_to_node.iter().map(|&id| (id, id as usize)).collect();

        // 2. Adjacency lists (Intermediate step)
        let mut temp_outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut temp_incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut temp_links: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut temp_weights: Option<Vec<Vec<f64>>> = weight.map(|_| vec![Vec::new(); node_count]);

        for (link_pos, link) in snapshot.links().iter().enumerate() {
            if !include(link) {
                continue;
            }
            let (Some(u), Some(v)) = (snapshot.position_of(&link.source), snapshot.position_of(&link.target)) else {
                continue;
            };

            temp_outgoing[u].push(v);
            temp_incoming[v].push(u);
            temp_links[u].push(link_pos);

            if let (Some(w_vec), Some(weight_of)) = (temp_weights.as_mut(), weight) {
                w_vec[u].push(weight_of(link));
            }
        }

        // 3. Convert to CSR
        let edge_links: Vec<usize> = temp_links.into_iter().flatten().collect();
        let view = GraphView::from_adjacency_list(
            node_count,
            index_to_node,
            node_to_index,
            temp_outgoing,
            temp_incoming,
            temp_weights,
        );

        SnapshotView { view, edge_links }
    }

    /// View over every valid link, unweighted
    pub fn all_links(snapshot: &GraphSnapshot) -> Self {
        Self::build(snapshot, |_| true, None)
    }

    /// Link stored at an edge position of the view
    pub fn link_at<'a>(&self, snapshot: &'a GraphSnapshot, edge_pos: usize) -> &'a Link {
        &snapshot.links()[self.edge_links[edge_pos]]
    }
}

/// Algorithm-level id of a snapshot node
pub fn algo_id(snapshot: &GraphSnapshot, id: &NodeId) -> Option<AlgoNodeId> {
    snapshot.position_of(id).map(|pos| pos as AlgoNodeId)
}

/// Snapshot node id behind an algorithm-level id
pub fn node_id(snapshot: &GraphSnapshot, id: AlgoNodeId) -> NodeId {
    snapshot.nodes()[id as usize].id.clone()
}

//! Network flow algorithms
//!
//! Bounded multi-hop tracing of directed, weighted flows (money movement).
//! `view.weights` carries the amount moved along each edge.

use super::common::{GraphView, NodeId};

/// One traced branch, from the source to a terminal node or the hop limit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowPath {
    pub path: Vec<NodeId>,
    /// Positions (in `GraphView::out_targets`) of the traversed edges
    pub edges: Vec<usize>,
    /// Sum of the traversed edge weights
    pub total: f64,
}

impl FlowPath {
    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

struct Frame {
    node: usize,
    path: Vec<usize>,
    edges: Vec<usize>,
    total: f64,
}

/// Depth-first flow tracing from `source`, at most `max_hops` edges deep.
///
/// A branch ends when the hop limit is reached or when its node has no
/// outgoing edge to a node not already on the branch. A node may appear on
/// several branches; it is only excluded from the branch that already
/// contains it. Branches of zero hops are not reported.
///
/// Results come out in the order a recursive DFS following edge order
/// would produce them.
pub fn trace_flows(view: &GraphView, source: NodeId, max_hops: usize) -> Vec<FlowPath> {
    let mut results = Vec::new();
    let Some(source_idx) = view.index_of(source) else {
        return results;
    };

    let mut stack = vec![Frame {
        node: source_idx,
        path: vec![source_idx],
        edges: Vec::new(),
        total: 0.0,
    }];

    while let Some(frame) = stack.pop() {
        let hops = frame.edges.len();

        let children: Vec<usize> = if hops >= max_hops {
            Vec::new()
        } else {
            view.out_edge_range(frame.node)
                .filter(|&pos| !frame.path.contains(&view.out_targets[pos]))
                .collect()
        };

        if children.is_empty() {
            if hops > 0 {
                results.push(FlowPath {
                    path: frame.path.iter().map(|&i| view.index_to_node[i]).collect(),
                    edges: frame.edges,
                    total: frame.total,
                });
            }
            continue;
        }

        for &pos in children.iter().rev() {
            let next = view.out_targets[pos];
            let mut path = frame.path.clone();
            path.push(next);
            let mut edges = frame.edges.clone();
            edges.push(pos);
            stack.push(Frame {
                node: next,
                path,
                edges,
                total: frame.total + view.edge_weight(pos),
            });
        }
    }

    results
}

//! Dense topology shared by every algorithm
//!
//! Callers project their graph onto a [`GraphView`] once per analysis; the
//! algorithms then work on `usize` indices only.

use std::collections::HashMap;
use std::ops::Range;

/// Caller-side node identifier
pub type NodeId = u64;

/// Adjacency followed by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// source -> target
    Outgoing,
    /// target -> source
    Incoming,
    /// Ignore link direction
    Both,
}

/// Read-only graph in compressed sparse row form.
///
/// Node `i`'s outgoing edges occupy `out_targets[out_offsets[i]..out_offsets[i + 1]]`;
/// incoming edges are stored the same way in `in_sources`. An edge's
/// position in `out_targets` is stable and identifies it (see
/// [`GraphView::out_edge_range`]).
#[derive(Debug, Clone)]
pub struct GraphView {
    pub node_count: usize,
    /// Dense index -> caller id
    pub index_to_node: Vec<NodeId>,
    /// Caller id -> dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// `node_count + 1` offsets into `out_targets`
    pub out_offsets: Vec<usize>,
    pub out_targets: Vec<usize>,

    /// `node_count + 1` offsets into `in_sources`
    pub in_offsets: Vec<usize>,
    pub in_sources: Vec<usize>,

    /// Per-edge weight, aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
}

/// Flatten per-node rows into (offsets, values)
fn compress<T>(rows: impl IntoIterator<Item = Vec<T>>) -> (Vec<usize>, Vec<T>) {
    let mut offsets = vec![0];
    let mut values = Vec::new();
    for row in rows {
        values.extend(row);
        offsets.push(values.len());
    }
    (offsets, values)
}

impl GraphView {
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_edge_range(idx).len()
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_edge_range(idx)]
    }

    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Neighbors following `direction`. With `Both`, a node reached
    /// through several links is yielded once per link.
    pub fn neighbors(&self, idx: usize, direction: Direction) -> impl Iterator<Item = usize> + '_ {
        let (out, inc): (&[usize], &[usize]) = match direction {
            Direction::Outgoing => (self.successors(idx), &[]),
            Direction::Incoming => (&[], self.predecessors(idx)),
            Direction::Both => (self.successors(idx), self.predecessors(idx)),
        };
        out.iter().chain(inc).copied()
    }

    /// Positions of a node's outgoing edges in `out_targets` (and `weights`).
    ///
    /// Edges keep the order of the adjacency rows given to
    /// [`GraphView::from_adjacency_list`], so callers holding a side table
    /// in that order can map a position back to their own link.
    pub fn out_edge_range(&self, idx: usize) -> Range<usize> {
        self.out_offsets[idx]..self.out_offsets[idx + 1]
    }

    /// Weight of the edge at `edge_pos`; 1.0 in an unweighted view
    pub fn edge_weight(&self, edge_pos: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |w| w[edge_pos])
    }

    /// Weights of a node's outgoing edges
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        let range = self.out_edge_range(idx);
        self.weights.as_ref().map(|w| &w[range])
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    /// Build from per-node adjacency rows. `weights`, when given, must have
    /// one row per node aligned with `outgoing`.
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let (out_offsets, out_targets) = compress(outgoing);
        let (in_offsets, in_sources) = compress(incoming);
        let weights = weights.map(|rows| rows.into_iter().flatten().collect());

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights,
        }
    }

    /// Build from `(source, target)` id pairs. Dense indices follow the
    /// order of `nodes`; pairs naming an id outside `nodes` are dropped.
    pub fn from_edges(nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> Self {
        let node_to_index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];

        for (s, t) in edges {
            if let (Some(&u), Some(&v)) = (node_to_index.get(s), node_to_index.get(t)) {
                outgoing[u].push(v);
                incoming[v].push(u);
            }
        }

        Self::from_adjacency_list(nodes.len(), nodes.to_vec(), node_to_index, outgoing, incoming, None)
    }
}

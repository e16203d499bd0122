//! Connected components
//!
//! Two nodes share a component when a chain of edges joins them, ignoring
//! direction. This is a partition, not a modularity clustering.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WccResult {
    /// Members per component, in view order. Component ids follow the
    /// order of each component's first node.
    pub components: Vec<Vec<NodeId>>,
    pub node_component: HashMap<NodeId, usize>,
}

impl WccResult {
    /// Size of the largest component, 0 for an empty graph
    pub fn largest(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Disjoint sets, union by size with path halving
struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        DisjointSets {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn join(&mut self, a: usize, b: usize) {
        let (mut a, mut b) = (self.root(a), self.root(b));
        if a == b {
            return;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
    }
}

/// Partition the view into weakly connected components
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let mut sets = DisjointSets::new(view.node_count);
    for u in 0..view.node_count {
        for &v in view.successors(u) {
            sets.join(u, v);
        }
    }

    let mut component_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut node_component = HashMap::with_capacity(view.node_count);

    for idx in 0..view.node_count {
        let root = sets.root(idx);
        let id = view.index_to_node[idx];
        let component = *component_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[component].push(id);
        node_component.insert(id, component);
    }

    WccResult {
        components,
        node_component,
    }
}

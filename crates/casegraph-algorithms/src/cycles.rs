//! Directed cycle discovery
//!
//! Depth-first search with an explicit work stack. A back-edge into a node
//! that is still on the current DFS path closes a cycle; the cycle is the
//! path suffix starting at that node.

use super::common::{GraphView, NodeId};
use std::collections::HashSet;

/// One directed cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleResult {
    /// Nodes in traversal order. The closing node is not repeated, so a
    /// self-loop is a single node.
    pub path: Vec<NodeId>,
    /// Positions (in `GraphView::out_targets`) of the edges walked,
    /// `edges[i]` leaving `path[i]`. The last entry is the closing edge.
    pub edges: Vec<usize>,
}

impl CycleResult {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Find directed cycles.
///
/// Every node is used as a DFS entry point unless an earlier search already
/// visited it. Each back-edge yields one report, so parallel edges closing
/// the same loop report it more than once; see [`dedup_cycles`].
pub fn detect_cycles(view: &GraphView) -> Vec<CycleResult> {
    let n = view.node_count;
    let mut visited = vec![false; n];
    // Position of a node on the current DFS path, None when off the stack
    let mut stack_pos: Vec<Option<usize>> = vec![None; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        // (node, cursor into out_targets)
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut path: Vec<usize> = Vec::new();
        // path_edges[k] is the edge from path[k] to path[k + 1]
        let mut path_edges: Vec<usize> = Vec::new();

        visited[start] = true;
        stack_pos[start] = Some(0);
        path.push(start);
        frames.push((start, view.out_offsets[start]));

        while let Some(frame) = frames.last_mut() {
            let (u, cursor) = *frame;

            if cursor < view.out_offsets[u + 1] {
                frame.1 += 1;
                let v = view.out_targets[cursor];

                if !visited[v] {
                    visited[v] = true;
                    stack_pos[v] = Some(path.len());
                    path.push(v);
                    path_edges.push(cursor);
                    frames.push((v, view.out_offsets[v]));
                } else if let Some(pos) = stack_pos[v] {
                    let mut edges = path_edges[pos..].to_vec();
                    edges.push(cursor);
                    cycles.push(CycleResult {
                        path: path[pos..].iter().map(|&i| view.index_to_node[i]).collect(),
                        edges,
                    });
                }
            } else {
                frames.pop();
                stack_pos[u] = None;
                path.pop();
                path_edges.pop();
            }
        }
    }

    cycles
}

/// Collapse reports that describe the same cycle, keeping the first.
///
/// Two reports are the same cycle when their node sequences are rotations
/// of each other.
pub fn dedup_cycles(cycles: Vec<CycleResult>) -> Vec<CycleResult> {
    let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| seen.insert(canonical_rotation(&cycle.path)))
        .collect()
}

fn canonical_rotation(path: &[NodeId]) -> Vec<NodeId> {
    let Some(min_pos) = path
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(pos, _)| pos)
    else {
        return Vec::new();
    };
    path[min_pos..].iter().chain(path[..min_pos].iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        // 1->2->3->1
        let view = GraphView::from_edges(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        let cycles = detect_cycles(&view);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path, vec![1, 2, 3]);
        assert_eq!(cycles[0].edges, vec![0, 1, 2]);
    }

    #[test]
    fn test_self_loop() {
        let view = GraphView::from_edges(&[7, 8], &[(7, 7), (7, 8)]);
        let cycles = detect_cycles(&view);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path, vec![7]);
        assert_eq!(cycles[0].len(), 1);
    }

    #[test]
    fn test_acyclic() {
        // Diamond 1->2->4, 1->3->4
        let view = GraphView::from_edges(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert!(detect_cycles(&view).is_empty());
    }

    #[test]
    fn test_cycle_suffix_only() {
        // 1->2->3->2 : cycle is {2,3}, node 1 is only a lead-in
        let view = GraphView::from_edges(&[1, 2, 3], &[(1, 2), (2, 3), (3, 2)]);
        let cycles = detect_cycles(&view);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path, vec![2, 3]);
    }

    #[test]
    fn test_parallel_edges_reported_twice() {
        // 1->2, 2->1 twice
        let view = GraphView::from_edges(&[1, 2], &[(1, 2), (2, 1), (2, 1)]);
        let cycles = detect_cycles(&view);
        assert_eq!(cycles.len(), 2);
        assert_ne!(cycles[0].edges, cycles[1].edges);

        let unique = dedup_cycles(cycles);
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical_rotation(&[3, 1, 2]), vec![1, 2, 3]);
        assert!(canonical_rotation(&[]).is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 200_000u64;
        let nodes: Vec<u64> = (0..n).collect();
        let mut edges: Vec<(u64, u64)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        edges.push((n - 1, 0));

        let view = GraphView::from_edges(&nodes, &edges);
        let cycles = detect_cycles(&view);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n as usize);
    }
}

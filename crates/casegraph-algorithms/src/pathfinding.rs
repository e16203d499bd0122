//! Hop-distance labelling (BFS) and cheapest paths (Dijkstra)

use super::common::{Direction, GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Source first, target last
    pub path: Vec<NodeId>,
    pub cost: f64,
}

impl PathResult {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Breadth-first hop distance from `source` to every reachable node.
///
/// Unreachable nodes are absent from the map; an unknown source yields an
/// empty map.
pub fn bfs_levels(view: &GraphView, source: NodeId, direction: Direction) -> HashMap<NodeId, usize> {
    let Some(start) = view.index_of(source) else {
        return HashMap::new();
    };

    let mut levels = HashMap::from([(source, 0)]);
    let mut seen = vec![false; view.node_count];
    seen[start] = true;
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((idx, depth)) = queue.pop_front() {
        for next in view.neighbors(idx, direction) {
            if !seen[next] {
                seen[next] = true;
                levels.insert(view.index_to_node[next], depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }
    levels
}

/// Heap entry; the cheapest entry (lowest index on ties) pops first
#[derive(Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    idx: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `source` to `target`.
///
/// `Direction::Outgoing` follows edges forward and uses the view's weights
/// when it has them. Any other direction costs 1.0 per hop, which turns the
/// search into a minimum-hop search. Edges with negative weight are ignored.
pub fn dijkstra(view: &GraphView, source: NodeId, target: NodeId, direction: Direction) -> Option<PathResult> {
    let start = view.index_of(source)?;
    let goal = view.index_of(target)?;

    let mut best = vec![f64::INFINITY; view.node_count];
    let mut came_from: Vec<Option<usize>> = vec![None; view.node_count];
    let mut frontier = BinaryHeap::from([Frontier { cost: 0.0, idx: start }]);
    best[start] = 0.0;

    while let Some(Frontier { cost, idx }) = frontier.pop() {
        if idx == goal {
            return Some(PathResult {
                source,
                target,
                path: walk_back(view, &came_from, goal),
                cost,
            });
        }
        if cost > best[idx] {
            continue;
        }

        let steps: Vec<(usize, f64)> = match direction {
            Direction::Outgoing => view
                .out_edge_range(idx)
                .map(|pos| (view.out_targets[pos], view.edge_weight(pos)))
                .collect(),
            _ => view.neighbors(idx, direction).map(|next| (next, 1.0)).collect(),
        };

        for (next, weight) in steps.into_iter().filter(|&(_, w)| w >= 0.0) {
            let candidate = cost + weight;
            if candidate < best[next] {
                best[next] = candidate;
                came_from[next] = Some(idx);
                frontier.push(Frontier { cost: candidate, idx: next });
            }
        }
    }
    None
}

fn walk_back(view: &GraphView, came_from: &[Option<usize>], goal: usize) -> Vec<NodeId> {
    let mut path: Vec<NodeId> = std::iter::successors(Some(goal), |&idx| came_from[idx])
        .map(|idx| view.index_to_node[idx])
        .collect();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::GraphView;

    #[test]
    fn test_bfs_levels_undirected() {
        // 1->2, 3->2 : ignoring direction 3 is two hops from 1
        let view = GraphView::from_edges(&[1, 2, 3, 4], &[(1, 2), (3, 2)]);

        let levels = bfs_levels(&view, 1, Direction::Both);
        assert_eq!(levels, HashMap::from([(1, 0), (2, 1), (3, 2)]));

        let directed = bfs_levels(&view, 1, Direction::Outgoing);
        assert_eq!(directed.get(&3), None);
    }

    #[test]
    fn test_bfs_levels_unknown_source() {
        let view = GraphView::from_edges(&[1, 2], &[(1, 2)]);
        assert!(bfs_levels(&view, 42, Direction::Both).is_empty());
    }

    #[test]
    fn test_dijkstra_min_hops() {
        // 1->2->3->4 walked backwards from 4
        let view = GraphView::from_edges(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);

        let result = dijkstra(&view, 4, 1, Direction::Both).unwrap();
        assert_eq!(result.path, vec![4, 3, 2, 1]);
        assert_eq!(result.cost, 3.0);
        assert_eq!(result.hops(), 3);

        assert!(dijkstra(&view, 4, 1, Direction::Outgoing).is_none());
    }

    #[test]
    fn test_dijkstra_weighted() {
        // 1->2 (10), 1->3 (50), 2->3 (5)
        let view = GraphView::from_adjacency_list(
            3,
            vec![1, 2, 3],
            HashMap::from([(1, 0), (2, 1), (3, 2)]),
            vec![vec![1, 2], vec![2], vec![]],
            vec![vec![], vec![0], vec![0, 1]],
            Some(vec![vec![10.0, 50.0], vec![5.0], vec![]]),
        );

        let result = dijkstra(&view, 1, 3, Direction::Outgoing).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 15.0);

        // Unit weights take the direct edge
        let hops = dijkstra(&view, 1, 3, Direction::Both).unwrap();
        assert_eq!(hops.path, vec![1, 3]);
    }

    #[test]
    fn test_dijkstra_same_node() {
        let view = GraphView::from_edges(&[1, 2], &[(1, 2)]);
        let result = dijkstra(&view, 1, 1, Direction::Both).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.hops(), 0);
    }

    #[test]
    fn test_equal_cost_ties_are_stable() {
        // Diamond 1->2->4, 1->3->4: the lower index wins
        let view = GraphView::from_edges(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
        let first = dijkstra(&view, 1, 4, Direction::Both).unwrap();
        assert_eq!(first.path, vec![1, 2, 4]);
        assert_eq!(dijkstra(&view, 1, 4, Direction::Both).unwrap(), first);
    }
}

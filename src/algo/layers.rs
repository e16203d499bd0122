//! Layer assignment: hop distance from the investigation root
//!
//! Layering ignores link direction. An upstream `metadata.layer` always wins
//! over the computed value.

use super::view::{algo_id, SnapshotView};
use crate::graph::{GraphSnapshot, Node, NodeId};
use casegraph_algorithms::{bfs_levels, Direction};
use tracing::{debug, warn};

/// Return the snapshot's nodes with `layer` filled in.
///
/// - `metadata.layer`, when present, is copied to `layer` unchanged.
/// - Otherwise the BFS hop distance from `root` is used.
/// - Nodes unreachable from `root` get `max observed BFS layer + 1`.
///
/// An unknown `root` reaches nobody, so every node without an upstream
/// layer lands on the fallback layer 1.
pub fn calculate_layers(snapshot: &GraphSnapshot, root: &NodeId) -> Vec<Node> {
    let sv = SnapshotView::all_links(snapshot);
    let levels = match algo_id(snapshot, root) {
        Some(root_id) => bfs_levels(&sv.view, root_id, Direction::Both),
        None => {
            warn!("Layer root {} is not in the snapshot, using fallback layer", root);
            Default::default()
        }
    };

    let max_observed = levels.values().copied().max().unwrap_or(0) as u32;
    let fallback = max_observed + 1;
    debug!(
        "Layered {} of {} nodes from root {} (max layer {})",
        levels.len(),
        snapshot.node_count(),
        root,
        max_observed
    );

    snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(pos, node)| {
            let mut node = node.clone();
            node.layer = Some(match node.metadata.layer {
                Some(upstream) => upstream,
                None => levels.get(&(pos as u64)).map_or(fallback, |&d| d as u32),
            });
            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Link, NodeMetadata};

    fn layer_of(nodes: &[Node], id: &str) -> Option<u32> {
        nodes.iter().find(|n| n.id.as_str() == id).and_then(|n| n.layer)
    }

    #[test]
    fn test_chain_layers() {
        let nodes = vec![Node::new("1", "1", "account"), Node::new("2", "2", "account"), Node::new("3", "3", "account")];
        let links = vec![Link::new("a", "1", "2", "CALLED"), Link::new("b", "2", "3", "CALLED")];
        let snapshot = GraphSnapshot::new(nodes, links).unwrap();

        let layered = calculate_layers(&snapshot, &NodeId::new("1"));
        assert_eq!(layer_of(&layered, "1"), Some(0));
        assert_eq!(layer_of(&layered, "2"), Some(1));
        assert_eq!(layer_of(&layered, "3"), Some(2));

        // Source snapshot untouched
        assert!(snapshot.nodes().iter().all(|n| n.layer.is_none()));
    }

    #[test]
    fn test_unreachable_fallback() {
        let nodes = vec![Node::new("r", "r", "person"), Node::new("a", "a", "account"), Node::new("z", "z", "account")];
        let links = vec![Link::new("l", "a", "r", "OWNS")];
        let snapshot = GraphSnapshot::new(nodes, links).unwrap();

        let layered = calculate_layers(&snapshot, &NodeId::new("r"));
        assert_eq!(layer_of(&layered, "a"), Some(1));
        assert_eq!(layer_of(&layered, "z"), Some(2));
    }

    #[test]
    fn test_unknown_root() {
        let nodes = vec![Node::new("a", "a", "account"), Node::new("b", "b", "account")];
        let links = vec![Link::new("l", "a", "b", "OWNS")];
        let snapshot = GraphSnapshot::new(nodes, links).unwrap();

        let layered = calculate_layers(&snapshot, &NodeId::new("missing"));
        assert!(layered.iter().all(|n| n.layer == Some(1)));
    }

    #[test]
    fn test_upstream_layer_honoured() {
        let mut meta = NodeMetadata::default();
        meta.layer = Some(5);
        let nodes = vec![
            Node::new("1", "1", "account"),
            Node::new("2", "2", "account").with_metadata(meta),
            Node::new("3", "3", "account"),
        ];
        let links = vec![Link::new("a", "1", "2", "CALLED"), Link::new("b", "2", "3", "CALLED")];
        let snapshot = GraphSnapshot::new(nodes, links).unwrap();

        let layered = calculate_layers(&snapshot, &NodeId::new("1"));
        assert_eq!(layer_of(&layered, "2"), Some(5));
        assert_eq!(layer_of(&layered, "3"), Some(2));
    }
}

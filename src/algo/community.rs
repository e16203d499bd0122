//! Community detection
//!
//! A community is a connected component of the undirected graph. This is
//! deliberately not a modularity-optimizing clustering.

use super::view::{node_id, SnapshotView};
use crate::graph::{GraphSnapshot, Node, NodeId};
use casegraph_algorithms::weakly_connected_components;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Sequential id, in order of each community's first node
    pub id: usize,
    pub members: Vec<NodeId>,
}

impl Community {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityResult {
    pub communities: Vec<Community>,
    /// The snapshot's nodes with `community` set
    pub nodes: Vec<Node>,
}

impl CommunityResult {
    pub fn largest(&self) -> usize {
        self.communities.iter().map(Community::size).max().unwrap_or(0)
    }
}

/// Partition the snapshot into connected components, ignoring direction.
/// Every node belongs to exactly one community.
pub fn detect_communities(snapshot: &GraphSnapshot) -> CommunityResult {
    let sv = SnapshotView::all_links(snapshot);
    let wcc = weakly_connected_components(&sv.view);

    let nodes = snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(pos, node)| {
            let mut node = node.clone();
            node.community = wcc.node_component.get(&(pos as u64)).copied();
            node
        })
        .collect();

    let communities: Vec<Community> = wcc
        .components
        .into_iter()
        .enumerate()
        .map(|(id, members)| Community {
            id,
            members: members.into_iter().map(|m| node_id(snapshot, m)).collect(),
        })
        .collect();

    debug!("Detected {} communities among {} nodes", communities.len(), snapshot.node_count());
    CommunityResult { communities, nodes }
}

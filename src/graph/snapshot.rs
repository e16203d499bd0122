//! Immutable node/link snapshot handed to every analysis
//!
//! A snapshot owns the entities and relationships of one case as delivered
//! by the ingestion side. Analyses read it and return new collections; they
//! never mutate it.

use super::link::Link;
use super::node::Node;
use super::types::{LinkId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building a snapshot
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} appears more than once")]
    DuplicateNodeId(NodeId),

    #[error("Link {0} appears more than once")]
    DuplicateLinkId(LinkId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Entities and relationships of one case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot", into = "RawSnapshot")]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    links: Vec<Link>,
    /// NodeId -> position in `nodes`
    index: HashMap<NodeId, usize>,
}

#[derive(Serialize, Deserialize)]
struct RawSnapshot {
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<Link>,
}

impl TryFrom<RawSnapshot> for GraphSnapshot {
    type Error = GraphError;

    fn try_from(raw: RawSnapshot) -> GraphResult<Self> {
        GraphSnapshot::new(raw.nodes, raw.links)
    }
}

impl From<GraphSnapshot> for RawSnapshot {
    fn from(snapshot: GraphSnapshot) -> Self {
        let (nodes, links) = snapshot.into_parts();
        RawSnapshot { nodes, links }
    }
}

impl GraphSnapshot {
    /// Build a snapshot. Node and link ids must be unique; links whose
    /// endpoints are missing are kept and skipped by every analysis.
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> GraphResult<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), pos).is_some() {
                return Err(GraphError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut link_ids = HashSet::with_capacity(links.len());
        for link in &links {
            if !link_ids.insert(&link.id) {
                return Err(GraphError::DuplicateLinkId(link.id.clone()));
            }
        }

        let snapshot = GraphSnapshot { nodes, links, index };
        let dangling = snapshot.links.len() - snapshot.valid_links().count();
        if dangling > 0 {
            debug!("Snapshot has {} dangling links, they will be ignored", dangling);
        }
        Ok(snapshot)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    /// Position of a node in [`GraphSnapshot::nodes`]
    pub fn position_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Links whose source and target both exist
    pub fn valid_links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links
            .iter()
            .filter(|link| self.contains(&link.source) && self.contains(&link.target))
    }

    /// Replace the nodes with an updated copy of the same entities, e.g. the
    /// output of a layout. Ids must be unchanged.
    pub fn with_nodes(&self, nodes: Vec<Node>) -> GraphResult<Self> {
        GraphSnapshot::new(nodes, self.links.clone())
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Link>) {
        (self.nodes, self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, *id, "account")).collect()
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = GraphSnapshot::new(nodes(&["a", "b", "a"]), vec![]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNodeId(NodeId::new("a")));
        assert_eq!(err.to_string(), "Node a appears more than once");
    }

    #[test]
    fn test_duplicate_link_rejected() {
        let links = vec![Link::new("l1", "a", "b", "CALLED"), Link::new("l1", "b", "a", "CALLED")];
        let err = GraphSnapshot::new(nodes(&["a", "b"]), links).unwrap_err();
        assert_eq!(err, GraphError::DuplicateLinkId(LinkId::new("l1")));
    }

    #[test]
    fn test_dangling_links_tolerated() {
        let links = vec![Link::new("l1", "a", "b", "CALLED"), Link::new("l2", "a", "ghost", "CALLED")];
        let snapshot = GraphSnapshot::new(nodes(&["a", "b"]), links).unwrap();

        assert_eq!(snapshot.links().len(), 2);
        let valid: Vec<&str> = snapshot.valid_links().map(|l| l.id.as_str()).collect();
        assert_eq!(valid, vec!["l1"]);
    }

    #[test]
    fn test_lookup() {
        let snapshot = GraphSnapshot::new(nodes(&["a", "b"]), vec![]).unwrap();
        assert_eq!(snapshot.position_of(&NodeId::new("b")), Some(1));
        assert_eq!(snapshot.node(&NodeId::new("a")).map(|n| n.label.as_str()), Some("a"));
        assert!(!snapshot.contains(&NodeId::new("z")));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let json = r#"{"nodes": [{"id": "a", "label": "A", "type": "person"}, {"id": "a", "label": "A2", "type": "person"}]}"#;
        assert!(serde_json::from_str::<GraphSnapshot>(json).is_err());

        let ok = r#"{"nodes": [{"id": "a", "label": "A", "type": "person"}]}"#;
        let snapshot: GraphSnapshot = serde_json::from_str(ok).unwrap();
        assert_eq!(snapshot.node_count(), 1);
        assert!(snapshot.links().is_empty());
    }
}

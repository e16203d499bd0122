//! Layout engine
//!
//! Maps a layout identifier to a position-assignment strategy. Every
//! strategy reads a snapshot and returns new nodes with `x`/`y` set; the
//! snapshot is never modified.
//!
//! Unknown identifiers fall back to the force-directed layout and
//! placeholder layouts return the nodes unchanged. Both cases log a warning
//! and neither is an error.

pub mod bank_cluster;
pub mod force;
pub mod radial;
pub mod sankey;
pub mod timeline;
pub mod tree;

use crate::config::LayoutConfig;
use crate::geometry::Viewport;
use crate::graph::{GraphSnapshot, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

pub use bank_cluster::{bank_cluster_layout, bank_key};
pub use force::force_layout;
pub use radial::radial_layout;
pub use sankey::sankey_layout;
pub use timeline::timeline_layout;
pub use tree::tree_layout;

/// Available layout strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Force,
    Radial,
    Sankey,
    Timeline,
    BankCluster,
    Tree,
    // Placeholders: positions are left untouched
    Circular,
    Grid,
    Hierarchical,
    Block,
    Centrality,
    Orthogonal,
    Horizontal,
    Chakra,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 14] = [
        LayoutKind::Force,
        LayoutKind::Radial,
        LayoutKind::Sankey,
        LayoutKind::Timeline,
        LayoutKind::BankCluster,
        LayoutKind::Tree,
        LayoutKind::Circular,
        LayoutKind::Grid,
        LayoutKind::Hierarchical,
        LayoutKind::Block,
        LayoutKind::Centrality,
        LayoutKind::Orthogonal,
        LayoutKind::Horizontal,
        LayoutKind::Chakra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Force => "force",
            LayoutKind::Radial => "radial",
            LayoutKind::Sankey => "sankey",
            LayoutKind::Timeline => "timeline",
            LayoutKind::BankCluster => "bank_cluster",
            LayoutKind::Tree => "tree",
            LayoutKind::Circular => "circular",
            LayoutKind::Grid => "grid",
            LayoutKind::Hierarchical => "hierarchical",
            LayoutKind::Block => "block",
            LayoutKind::Centrality => "centrality",
            LayoutKind::Orthogonal => "orthogonal",
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Chakra => "chakra",
        }
    }

    /// Extension points without an implementation
    pub fn is_placeholder(&self) -> bool {
        !matches!(
            self,
            LayoutKind::Force
                | LayoutKind::Radial
                | LayoutKind::Sankey
                | LayoutKind::Timeline
                | LayoutKind::BankCluster
                | LayoutKind::Tree
        )
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown layout '{0}'")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutKind {
    type Err = UnknownLayout;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `bank-cluster`,
    /// `bankCluster` and `bank_cluster` are the same layout.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let kind = match normalized.as_str() {
            "force" | "forcedirected" => LayoutKind::Force,
            "bankcluster" => LayoutKind::BankCluster,
            other => LayoutKind::ALL
                .iter()
                .copied()
                .find(|k| k.as_str() == other)
                .ok_or_else(|| UnknownLayout(s.to_string()))?,
        };
        Ok(kind)
    }
}

/// Positions produced by a layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutOutcome {
    pub nodes: Vec<Node>,
    /// Zoom/pan fitting the result into the container, when the layout
    /// computes one
    pub suggested_viewport: Option<Viewport>,
    /// Vertical extent per node, for layouts that size nodes
    pub extents: HashMap<NodeId, f64>,
}

impl LayoutOutcome {
    fn positions(nodes: Vec<Node>) -> Self {
        LayoutOutcome {
            nodes,
            ..Default::default()
        }
    }
}

/// Run the layout named `layout_id`, falling back to force-directed when
/// the name is not recognised.
pub fn apply_layout(layout_id: &str, snapshot: &GraphSnapshot, config: &LayoutConfig) -> LayoutOutcome {
    let kind = layout_id.parse::<LayoutKind>().unwrap_or_else(|err| {
        warn!("{}, falling back to force-directed", err);
        LayoutKind::Force
    });
    run_layout(kind, snapshot, config)
}

/// Run a layout strategy
pub fn run_layout(kind: LayoutKind, snapshot: &GraphSnapshot, config: &LayoutConfig) -> LayoutOutcome {
    if snapshot.is_empty() {
        return LayoutOutcome::default();
    }
    debug!("Running {} layout on {} nodes", kind, snapshot.node_count());

    match kind {
        LayoutKind::Force => LayoutOutcome::positions(force_layout(snapshot, config)),
        LayoutKind::Radial => LayoutOutcome::positions(radial_layout(snapshot, config)),
        LayoutKind::Sankey => sankey_layout(snapshot, config),
        LayoutKind::Timeline => LayoutOutcome::positions(timeline_layout(snapshot, config)),
        LayoutKind::BankCluster => LayoutOutcome::positions(bank_cluster_layout(snapshot, config)),
        LayoutKind::Tree => tree_layout(snapshot, config),
        placeholder => {
            warn!("Layout {} is not implemented, positions left unchanged", placeholder);
            LayoutOutcome::positions(snapshot.nodes().to_vec())
        }
    }
}

/// Node positions grouped by effective layer, ascending. Nodes without a
/// layer join the layer after the deepest one present (layer 0 when no
/// node has a layer). Members keep snapshot order.
pub(crate) fn layer_groups(nodes: &[Node]) -> BTreeMap<u32, Vec<usize>> {
    let unlayered = nodes
        .iter()
        .filter_map(Node::effective_layer)
        .max()
        .map_or(0, |max| max + 1);

    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (pos, node) in nodes.iter().enumerate() {
        groups
            .entry(node.effective_layer().unwrap_or(unlayered))
            .or_default()
            .push(pos);
    }
    groups
}

/// Undirected degree of every node, by snapshot position
pub(crate) fn degrees(snapshot: &GraphSnapshot) -> Vec<usize> {
    let mut degree = vec![0; snapshot.node_count()];
    for link in snapshot.valid_links() {
        if let (Some(s), Some(t)) = (snapshot.position_of(&link.source), snapshot.position_of(&link.target)) {
            degree[s] += 1;
            degree[t] += 1;
        }
    }
    degree
}

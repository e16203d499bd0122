//! Accounts grouped by bank

use crate::config::LayoutConfig;
use crate::graph::{GraphSnapshot, Node};
use indexmap::IndexMap;
use tracing::debug;

pub const UNKNOWN_BANK: &str = "Unknown Bank";

/// Cluster key for a node: `"name (ifsc)"`, the bank name alone, the IFSC
/// code alone, or [`UNKNOWN_BANK`]. Blank values count as missing.
pub fn bank_key(node: &Node) -> String {
    let clean = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    match (clean(&node.metadata.bank_name), clean(&node.metadata.ifsc_code)) {
        (Some(name), Some(ifsc)) => format!("{} ({})", name, ifsc),
        (Some(name), None) => name,
        (None, Some(ifsc)) => ifsc,
        (None, None) => UNKNOWN_BANK.to_string(),
    }
}

/// One roughly square grid per bank, clusters side by side in order of
/// first appearance.
pub fn bank_cluster_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Vec<Node> {
    let cluster = &config.bank_cluster;
    let mut nodes = snapshot.nodes().to_vec();

    let mut banks: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (pos, node) in nodes.iter().enumerate() {
        banks.entry(bank_key(node)).or_default().push(pos);
    }

    let mut left = cluster.margin;
    for members in banks.values() {
        let cols = (members.len() as f64).sqrt().ceil().max(1.0) as usize;
        for (i, &pos) in members.iter().enumerate() {
            let x = left + cluster.cell_spacing * (i % cols) as f64;
            let y = cluster.margin + cluster.cell_spacing * (i / cols) as f64;
            nodes[pos].set_position(x, y);
        }
        left += cluster.cell_spacing * cols as f64 + cluster.cluster_gap;
    }

    debug!("Bank cluster layout: {} clusters", banks.len());
    nodes
}

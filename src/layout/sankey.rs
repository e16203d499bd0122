//! Sankey-style columns sized by money flow

use super::{layer_groups, LayoutOutcome};
use crate::config::LayoutConfig;
use crate::graph::GraphSnapshot;
use std::collections::HashMap;

/// One column per layer, left to right. A node's vertical extent is
/// proportional to the larger of its incoming and outgoing transfer volume;
/// each column is stacked largest first and centred on the container's
/// horizontal midline. Extents are returned alongside the positions.
pub fn sankey_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> LayoutOutcome {
    let sankey = &config.sankey;
    let flow = node_flows(snapshot);
    let max_flow = flow.iter().copied().fold(0.0, f64::max);
    let extent: Vec<f64> = flow
        .iter()
        .map(|&f| {
            let scaled = if max_flow > 0.0 {
                f / max_flow * sankey.max_extent
            } else {
                0.0
            };
            scaled.max(sankey.min_extent)
        })
        .collect();

    let mut nodes = snapshot.nodes().to_vec();
    for (column, mut members) in layer_groups(&nodes).into_values().enumerate() {
        members.sort_by(|&a, &b| flow[b].total_cmp(&flow[a]));

        let stacked: f64 = members.iter().map(|&m| extent[m]).sum::<f64>()
            + sankey.node_gap * members.len().saturating_sub(1) as f64;
        let x = sankey.margin + sankey.column_spacing * column as f64;
        let mut cursor = config.height / 2.0 - stacked / 2.0;
        for pos in members {
            nodes[pos].set_position(x, cursor + extent[pos] / 2.0);
            cursor += extent[pos] + sankey.node_gap;
        }
    }

    let extents: HashMap<_, _> = nodes.iter().map(|n| n.id.clone()).zip(extent).collect();
    LayoutOutcome {
        nodes,
        suggested_viewport: None,
        extents,
    }
}

/// `max(incoming, outgoing)` transfer volume per snapshot position
fn node_flows(snapshot: &GraphSnapshot) -> Vec<f64> {
    let mut incoming = vec![0.0; snapshot.node_count()];
    let mut outgoing = vec![0.0; snapshot.node_count()];
    for link in snapshot.valid_links().filter(|l| l.is_transfer()) {
        if let (Some(s), Some(t)) = (snapshot.position_of(&link.source), snapshot.position_of(&link.target)) {
            outgoing[s] += link.amount_or_zero();
            incoming[t] += link.amount_or_zero();
        }
    }
    incoming.into_iter().zip(outgoing).map(|(i, o)| f64::max(i, o)).collect()
}

//! Concentric rings by layer

use super::{degrees, layer_groups};
use crate::config::LayoutConfig;
use crate::graph::{GraphSnapshot, Node};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Place each layer on a ring around the container centre.
///
/// When the lowest layer holds a single node (the usual investigation
/// root) it sits at the centre and the following layers take the rings.
/// Within a ring, nodes are ordered by descending degree, then id, and
/// spread evenly starting at 12 o'clock.
pub fn radial_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Vec<Node> {
    let (cx, cy) = (config.width / 2.0, config.height / 2.0);
    let radial = &config.radial;
    let degree = degrees(snapshot);
    let mut nodes = snapshot.nodes().to_vec();

    let mut groups: Vec<Vec<usize>> = layer_groups(&nodes).into_values().collect();
    if groups.first().is_some_and(|g| g.len() == 1) {
        let centre = groups.remove(0);
        nodes[centre[0]].set_position(cx, cy);
    }

    for (ring, mut members) in groups.into_iter().enumerate() {
        members.sort_by(|&a, &b| degree[b].cmp(&degree[a]).then_with(|| nodes[a].id.cmp(&nodes[b].id)));

        let radius = radial.base_radius + radial.radius_step * ring as f64;
        let count = members.len() as f64;
        for (i, pos) in members.into_iter().enumerate() {
            let angle = -FRAC_PI_2 + TAU * i as f64 / count;
            nodes[pos].set_position(cx + radius * angle.cos(), cy + radius * angle.sin());
        }
    }
    nodes
}

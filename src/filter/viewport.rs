//! Stage 2: spatial culling against the visible rectangle

use super::semantic::{FilteredGraph, StyledLink};
use crate::geometry::{Rect, Viewport};
use crate::graph::{Node, NodeId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Current zoom/pan and the size of the rendering container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub viewport: Viewport,
    pub width: f64,
    pub height: f64,
}

impl ViewportState {
    pub fn new(viewport: Viewport, width: f64, height: f64) -> Self {
        Self { viewport, width, height }
    }

    /// Graph-space rectangle that must be drawn, grown by `padding`
    pub fn visible_rect(&self, padding: f64) -> Rect {
        self.viewport.visible_rect(self.width, self.height, padding)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<StyledLink>,
}

/// Keep filtered nodes positioned inside the padded visible rectangle, and
/// the links between them. Nodes without a position are culled.
pub fn cull_to_viewport(filtered: &FilteredGraph, state: &ViewportState, padding: f64) -> VisibleGraph {
    let rect = state.visible_rect(padding);

    let nodes: Vec<Node> = filtered
        .nodes
        .iter()
        .filter(|n| n.position().is_some_and(|(x, y)| rect.contains(x, y)))
        .cloned()
        .collect();

    let kept: FxHashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
    let links = filtered
        .links
        .iter()
        .filter(|l| kept.contains(&l.link.source) && kept.contains(&l.link.target))
        .cloned()
        .collect();

    VisibleGraph { nodes, links }
}

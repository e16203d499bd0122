//! Filter and viewport-culling pipeline
//!
//! Two stages reduce a positioned graph to what has to be drawn:
//!
//! 1. [`filter_graph`]: semantic predicates from the UI filter state
//! 2. [`cull_to_viewport`]: nodes outside the zoom/pan-adjusted visible
//!    rectangle are dropped
//!
//! Both stages are O(V+E) and depend only on their inputs, so callers may
//! memoize them on (filters, zoom, pan).

pub mod semantic;
pub mod viewport;

pub use semantic::{filter_graph, FilteredGraph, StyledLink};
pub use viewport::{cull_to_viewport, ViewportState, VisibleGraph};

use crate::graph::{EntityType, Link, Node, RiskLevel};
use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Layer visibility presets offered by the layer panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerPreset {
    #[default]
    All,
    /// Layer 0 only
    RootOnly,
    /// Layers 0 and 1
    Direct,
    /// Layers 0 to 2
    Extended,
    /// Exactly the layers in [`LayerVisibility::visible`]
    Custom,
}

/// Which layers are shown, and how opaque each one is drawn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub preset: LayerPreset,
    pub visible: BTreeSet<u32>,
    /// Per-layer opacity in [0, 1]; unlisted layers are opaque
    pub opacity: BTreeMap<u32, f64>,
}

impl LayerVisibility {
    pub fn custom(layers: impl IntoIterator<Item = u32>) -> Self {
        LayerVisibility {
            preset: LayerPreset::Custom,
            visible: layers.into_iter().collect(),
            opacity: BTreeMap::new(),
        }
    }

    pub fn with_opacity(mut self, layer: u32, opacity: f64) -> Self {
        self.opacity.insert(layer, opacity.clamp(0.0, 1.0));
        self
    }

    /// Nodes without a layer are always visible
    pub fn is_visible(&self, layer: Option<u32>) -> bool {
        let Some(layer) = layer else {
            return true;
        };
        match self.preset {
            LayerPreset::All => true,
            LayerPreset::RootOnly => layer == 0,
            LayerPreset::Direct => layer <= 1,
            LayerPreset::Extended => layer <= 2,
            LayerPreset::Custom => self.visible.contains(&layer),
        }
    }

    pub fn opacity_for(&self, layer: Option<u32>) -> f64 {
        layer
            .and_then(|l| self.opacity.get(&l).copied())
            .unwrap_or(1.0)
    }
}

/// Semantic filter state. Empty lists and unset bounds are inactive; every
/// active predicate must hold for a node to pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFilters {
    pub entity_types: Vec<EntityType>,
    pub risk_levels: Vec<RiskLevel>,
    /// 0 disables the predicate
    pub min_confidence: f64,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Only nodes carrying some metadata
    pub has_metadata: bool,
    pub layers: LayerVisibility,
}

/// Counts reported after each run of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterStats {
    pub total_nodes: usize,
    pub total_links: usize,
    pub filtered_nodes: usize,
    pub filtered_links: usize,
    pub visible_nodes: usize,
    pub visible_links: usize,
    /// Filtered but outside the viewport
    pub culled_nodes: usize,
    pub culled_links: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub filtered: FilteredGraph,
    pub visible: VisibleGraph,
    pub stats: FilterStats,
}

/// Run both stages and collect [`FilterStats`]
pub fn run_pipeline(
    nodes: &[Node],
    links: &[Link],
    visible_types: &FxHashSet<EntityType>,
    filters: &GraphFilters,
    viewport: &ViewportState,
    padding: f64,
) -> PipelineResult {
    let filtered = filter_graph(nodes, links, visible_types, filters);
    let visible = cull_to_viewport(&filtered, viewport, padding);

    let stats = FilterStats {
        total_nodes: nodes.len(),
        total_links: links.len(),
        filtered_nodes: filtered.nodes.len(),
        filtered_links: filtered.links.len(),
        visible_nodes: visible.nodes.len(),
        visible_links: visible.links.len(),
        culled_nodes: filtered.nodes.len() - visible.nodes.len(),
        culled_links: filtered.links.len() - visible.links.len(),
    };
    debug!(
        "Filter pipeline: {}/{} nodes filtered, {} visible",
        stats.filtered_nodes, stats.total_nodes, stats.visible_nodes
    );

    PipelineResult { filtered, visible, stats }
}

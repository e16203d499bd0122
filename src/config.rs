//! Engine configuration
//!
//! Every tunable of the layouts, the statistics sampler and the viewport
//! cull lives here with its default. Configuration can be loaded from YAML;
//! sections and fields left out keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub statistics: StatisticsConfig,
    pub viewport: ViewportConfig,
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Reject values no layout can work with
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(field) = self.first_non_finite() {
            return Err(ConfigError::Invalid {
                field,
                reason: "value must be a finite number".to_string(),
            });
        }
        if self.layout.width <= 0.0 || self.layout.height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "layout.width/height",
                reason: "container size must be positive".to_string(),
            });
        }
        let tree = &self.layout.tree;
        if tree.min_zoom > tree.max_zoom
            || tree.min_vertical_spacing > tree.max_vertical_spacing
            || tree.min_horizontal_spacing > tree.max_horizontal_spacing
        {
            return Err(ConfigError::Invalid {
                field: "layout.tree",
                reason: "min bounds must not exceed max bounds".to_string(),
            });
        }
        if self.viewport.padding < 0.0 {
            return Err(ConfigError::Invalid {
                field: "viewport.padding",
                reason: "padding must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    fn first_non_finite(&self) -> Option<&'static str> {
        let (layout, tree) = (&self.layout, &self.layout.tree);
        [
            ("layout.width", layout.width),
            ("layout.height", layout.height),
            ("layout.force.repulsion", layout.force.repulsion),
            ("layout.force.spring_length", layout.force.spring_length),
            ("layout.force.spring_stiffness", layout.force.spring_stiffness),
            ("layout.force.max_step", layout.force.max_step),
            ("layout.radial.base_radius", layout.radial.base_radius),
            ("layout.radial.radius_step", layout.radial.radius_step),
            ("layout.sankey.column_spacing", layout.sankey.column_spacing),
            ("layout.sankey.margin", layout.sankey.margin),
            ("layout.sankey.max_extent", layout.sankey.max_extent),
            ("layout.sankey.min_extent", layout.sankey.min_extent),
            ("layout.sankey.node_gap", layout.sankey.node_gap),
            ("layout.timeline.margin", layout.timeline.margin),
            ("layout.timeline.spacing", layout.timeline.spacing),
            ("layout.timeline.layer_offset", layout.timeline.layer_offset),
            ("layout.timeline.band_height", layout.timeline.band_height),
            ("layout.bank_cluster.margin", layout.bank_cluster.margin),
            ("layout.bank_cluster.cell_spacing", layout.bank_cluster.cell_spacing),
            ("layout.bank_cluster.cluster_gap", layout.bank_cluster.cluster_gap),
            ("layout.tree.top_margin", tree.top_margin),
            ("layout.tree.min_vertical_spacing", tree.min_vertical_spacing),
            ("layout.tree.max_vertical_spacing", tree.max_vertical_spacing),
            ("layout.tree.min_horizontal_spacing", tree.min_horizontal_spacing),
            ("layout.tree.max_horizontal_spacing", tree.max_horizontal_spacing),
            ("layout.tree.fit_margin", tree.fit_margin),
            ("layout.tree.min_zoom", tree.min_zoom),
            ("layout.tree.max_zoom", tree.max_zoom),
            ("viewport.padding", self.viewport.padding),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }
}

/// Container geometry and per-strategy layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Container width in pixels
    pub width: f64,
    /// Container height in pixels
    pub height: f64,
    pub force: ForceConfig,
    pub radial: RadialConfig,
    pub sankey: SankeyConfig,
    pub timeline: TimelineConfig,
    pub bank_cluster: BankClusterConfig,
    pub tree: TreeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1000.0,
            force: ForceConfig::default(),
            radial: RadialConfig::default(),
            sankey: SankeyConfig::default(),
            timeline: TimelineConfig::default(),
            bank_cluster: BankClusterConfig::default(),
            tree: TreeConfig::default(),
        }
    }
}

/// Force-directed simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub iterations: usize,
    /// Inverse-square repulsion constant
    pub repulsion: f64,
    /// Spring rest length
    pub spring_length: f64,
    /// Spring stiffness
    pub spring_stiffness: f64,
    /// Largest move per node in the first iteration; cools linearly
    pub max_step: f64,
    /// Seed for placing nodes that have no position yet
    pub seed: u64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 30,
            repulsion: 4500.0,
            spring_length: 220.0,
            spring_stiffness: 0.12,
            max_step: 50.0,
            seed: 7,
        }
    }
}

/// Concentric rings by layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    pub base_radius: f64,
    pub radius_step: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            base_radius: 200.0,
            radius_step: 180.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyConfig {
    pub column_spacing: f64,
    pub margin: f64,
    /// Extent of the node carrying the largest flow
    pub max_extent: f64,
    pub min_extent: f64,
    /// Vertical gap between nodes of a column
    pub node_gap: f64,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            column_spacing: 350.0,
            margin: 100.0,
            max_extent: 300.0,
            min_extent: 20.0,
            node_gap: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub margin: f64,
    /// Horizontal distance between consecutive ranks
    pub spacing: f64,
    /// Vertical offset per layer
    pub layer_offset: f64,
    pub band_height: f64,
    /// Number of round-robin bands
    pub bands: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            spacing: 200.0,
            layer_offset: 150.0,
            band_height: 40.0,
            bands: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankClusterConfig {
    pub margin: f64,
    /// Grid cell size inside a cluster
    pub cell_spacing: f64,
    /// Horizontal gap between clusters
    pub cluster_gap: f64,
}

impl Default for BankClusterConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            cell_spacing: 150.0,
            cluster_gap: 250.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub top_margin: f64,
    pub min_vertical_spacing: f64,
    pub max_vertical_spacing: f64,
    pub min_horizontal_spacing: f64,
    pub max_horizontal_spacing: f64,
    /// Added to the bounding box before fitting it into the container
    pub fit_margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            top_margin: 100.0,
            min_vertical_spacing: 600.0,
            max_vertical_spacing: 800.0,
            min_horizontal_spacing: 300.0,
            max_horizontal_spacing: 500.0,
            fit_margin: 400.0,
            min_zoom: 0.45,
            max_zoom: 1.1,
        }
    }
}

/// Average path length sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Upper bound on sampled node pairs (further capped at V²)
    pub sample_pairs: usize,
    pub seed: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            sample_pairs: 100,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Graph-space margin added around the visible rectangle
    pub padding: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { padding: 800.0 }
    }
}

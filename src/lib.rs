//! Casegraph investigation graph engine
//!
//! Graph analysis, layout and render-culling for financial and telecom
//! crime investigations.
//!
//! # Architecture
//!
//! - [`graph`]: entities, relationships and immutable snapshots
//! - [`algo`]: layering, shortest path, cycles, money-flow tracing,
//!   communities and statistics. Topology runs in the
//!   `casegraph-algorithms` crate over a dense CSR view.
//! - [`layout`]: force-directed and specialised positional layouts
//! - [`filter`]: semantic filtering and viewport culling
//! - [`config`]: tunables, loadable from YAML
//!
//! Every engine function is pure: it reads a snapshot and returns new
//! nodes or result structures.
//!
//! ## Example Usage
//!
//! ```rust
//! use casegraph::algo::{calculate_layers, find_shortest_path};
//! use casegraph::graph::{GraphSnapshot, Link, Node, NodeId};
//!
//! let nodes = vec![
//!     Node::new("victim", "Victim", "person"),
//!     Node::new("mule", "Mule account", "account"),
//!     Node::new("atm", "ATM withdrawal", "atm"),
//! ];
//! let links = vec![
//!     Link::transfer("t1", "victim", "mule", 50_000.0),
//!     Link::transfer("t2", "mule", "atm", 49_000.0),
//! ];
//! let snapshot = GraphSnapshot::new(nodes, links).unwrap();
//!
//! let layered = calculate_layers(&snapshot, &NodeId::new("victim"));
//! assert_eq!(layered[2].layer, Some(2));
//!
//! let path = find_shortest_path(&snapshot, &NodeId::new("victim"), &NodeId::new("atm")).unwrap();
//! assert_eq!(path.length, 2);
//! assert_eq!(path.total_amount, 99_000.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod filter;
pub mod geometry;
pub mod graph;
pub mod layout;

// Re-export main types for convenience
pub use graph::{
    EntityType, GraphError, GraphResult, GraphSnapshot, Link, LinkId, LinkType, Node, NodeId, NodeMetadata,
    PropertyMap, PropertyValue, RiskLevel,
};

pub use algo::{
    calculate_layers, calculate_statistics, detect_communities, detect_cycles, detect_unique_cycles,
    find_shortest_path, trace_money_flow, CommunityResult, CycleResult, FlowPath, GraphStatistics, PathResult,
};

pub use layout::{apply_layout, run_layout, LayoutKind, LayoutOutcome};

pub use filter::{run_pipeline, FilterStats, GraphFilters, LayerVisibility, PipelineResult, ViewportState};

pub use config::{ConfigError, ConfigResult, EngineConfig};

pub use geometry::{Rect, Viewport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

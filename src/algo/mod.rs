//! Graph analyses
//!
//! Topology work runs in the `casegraph-algorithms` crate over a dense
//! [`casegraph_algorithms::GraphView`]. This module projects snapshots onto
//! that view and maps results back to entity and link ids.
//!
//! Every analysis is pure: it reads a [`crate::graph::GraphSnapshot`] and
//! returns new nodes or result structures.

pub mod community;
pub mod cycles;
pub mod flow;
pub mod layers;
pub mod pathfinding;
pub mod statistics;
pub mod view;

pub use community::{detect_communities, Community, CommunityResult};
pub use cycles::{detect_cycles, detect_cycles_matching, detect_unique_cycles, CycleResult};
pub use flow::{trace_money_flow, FlowPath};
pub use layers::calculate_layers;
pub use pathfinding::{find_shortest_path, PathResult};
pub use statistics::{calculate_statistics, DateRange, GraphStatistics};
pub use view::SnapshotView;

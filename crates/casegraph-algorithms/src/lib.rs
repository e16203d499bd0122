pub mod common;
pub mod community;
pub mod cycles;
pub mod pathfinding;
pub mod flow;

pub use common::{Direction, GraphView, NodeId};
pub use community::{weakly_connected_components, WccResult};
pub use cycles::{dedup_cycles, detect_cycles, CycleResult};
pub use pathfinding::{bfs_levels, dijkstra, PathResult};
pub use flow::{trace_flows, FlowPath};

//! Investigation graph data model
//!
//! This module implements the shared entity/relationship contract:
//! - Entities with an open type taxonomy, risk level and typed metadata
//! - Directed, typed relationships with optional amount, date and confidence
//! - Immutable snapshots with unique ids and tolerated dangling links

pub mod link;
pub mod node;
pub mod property;
pub mod snapshot;
pub mod types;

// Re-export main types
pub use link::Link;
pub use node::{Node, NodeMetadata};
pub use property::{parse_datetime, PropertyMap, PropertyValue};
pub use snapshot::{GraphError, GraphResult, GraphSnapshot};
pub use types::{EntityType, LinkId, LinkType, NodeId, RiskLevel};

//! Core type definitions for the investigation graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entity (node)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for a relationship (link)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        LinkId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(id: &str) -> Self {
        LinkId(id.to_string())
    }
}

impl From<String> for LinkId {
    fn from(id: String) -> Self {
        LinkId(id)
    }
}

/// Entity type (open taxonomy, e.g. "person", "account", "phone")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(entity_type: impl Into<String>) -> Self {
        EntityType(entity_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        EntityType(s.to_string())
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        EntityType(s)
    }
}

/// Relationship kind (free-form, e.g. "TRANSFERRED", "CALLED", "OWNS")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LinkType(String);

impl LinkType {
    /// The relationship kind that represents money movement
    pub const TRANSFERRED: &'static str = "TRANSFERRED";

    pub fn new(link_type: impl Into<String>) -> Self {
        LinkType(link_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this link type is a financial flow (case-insensitive `TRANSFERRED`)
    pub fn is_transfer(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::TRANSFERRED)
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkType {
    fn from(s: &str) -> Self {
        LinkType(s.to_string())
    }
}

impl From<String> for LinkType {
    fn from(s: String) -> Self {
        LinkType(s)
    }
}

/// Ordinal risk category of an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new("acc-42");
        assert_eq!(id.as_str(), "acc-42");
        assert_eq!(format!("{}", id), "acc-42");

        let id2: NodeId = "acc-43".into();
        assert!(id < id2);
    }

    #[test]
    fn test_link_type_transfer() {
        assert!(LinkType::new("TRANSFERRED").is_transfer());
        assert!(LinkType::new("transferred").is_transfer());
        assert!(!LinkType::new("CALLED").is_transfer());
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert_eq!(RiskLevel::default(), RiskLevel::Low);
        assert_eq!(format!("{}", RiskLevel::Critical), "critical");
    }

    #[test]
    fn test_serde_transparent() {
        let id: NodeId = serde_json::from_str("\"n1\"").unwrap();
        assert_eq!(id, NodeId::new("n1"));

        let risk: RiskLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(risk, RiskLevel::High);
    }
}

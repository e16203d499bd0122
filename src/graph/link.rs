//! Relationship (link) between two entities
//!
//! Links are directed. Only `TRANSFERRED` links take part in money-flow
//! analyses; every kind takes part in layering, paths and communities.

use super::property::parse_datetime;
use super::types::{LinkId, LinkType, NodeId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A directed relationship in the investigation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique identifier for this link
    pub id: LinkId,

    /// Source entity (link goes FROM this node)
    pub source: NodeId,

    /// Target entity (link goes TO this node)
    pub target: NodeId,

    /// Kind of relationship (e.g. "TRANSFERRED", "CALLED")
    #[serde(rename = "type")]
    pub link_type: LinkType,

    /// Money moved, non-negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Analyst confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl Link {
    pub fn new(
        id: impl Into<LinkId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        link_type: impl Into<LinkType>,
    ) -> Self {
        Link {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            link_type: link_type.into(),
            amount: None,
            date: None,
            confidence: None,
        }
    }

    /// A `TRANSFERRED` link carrying `amount`
    pub fn transfer(
        id: impl Into<LinkId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        amount: f64,
    ) -> Self {
        Self::new(id, source, target, LinkType::TRANSFERRED).with_amount(amount)
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount.max(0.0));
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence.min(100));
        self
    }

    /// Whether this link is a financial flow
    pub fn is_transfer(&self) -> bool {
        self.link_type.is_transfer()
    }

    /// Amount moved, 0 when absent
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Check if this link connects two specific nodes (in either direction)
    pub fn connects(&self, node1: &NodeId, node2: &NodeId) -> bool {
        (self.source == *node1 && self.target == *node2)
            || (self.source == *node2 && self.target == *node1)
    }

    /// Check if this link goes FROM `source` TO `target`
    pub fn goes(&self, source: &NodeId, target: &NodeId) -> bool {
        self.source == *source && self.target == *target
    }

    /// Check if this link starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_datetime)
    }
}

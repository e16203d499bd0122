//! Entity (node) of the investigation graph

use super::property::{parse_datetime, PropertyMap, PropertyValue};
use super::types::{EntityType, NodeId, RiskLevel};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Typed metadata an entity may carry.
///
/// Fields read by the analyses and layouts are typed; anything else the
/// ingestion side attaches is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Layer assigned by an upstream classification. Takes precedence over
    /// BFS layering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,

    /// Transaction amount associated with the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,

    /// Marks a money trail end point (cash withdrawal, ATM, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_terminal: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,

    /// Analyst confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl NodeMetadata {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.layer.is_none()
            && self.amount.is_none()
            && self.bank_name.is_none()
            && self.ifsc_code.is_none()
            && self.is_terminal.is_none()
            && self.transaction_date.is_none()
            && self.confidence.is_none()
            && self.extra.is_empty()
    }

    /// Set an untyped property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.extra.get(key)
    }
}

/// An entity in the investigation graph.
///
/// `x`/`y` stay `None` until a layout has run; `layer` and `community` are
/// filled by the analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub metadata: NodeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, entity_type: impl Into<EntityType>) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            entity_type: entity_type.into(),
            risk_level: RiskLevel::default(),
            metadata: NodeMetadata::default(),
            layer: None,
            community: None,
            x: None,
            y: None,
        }
    }

    pub fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Place the node at a graph-space position
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = Some(x);
        self.y = Some(y);
    }

    /// Upstream `metadata.layer` if present, otherwise the computed layer
    pub fn effective_layer(&self) -> Option<u32> {
        self.metadata.layer.or(self.layer)
    }

    /// Transaction amount carried in metadata, 0 when absent
    pub fn amount(&self) -> f64 {
        self.metadata
            .amount
            .or_else(|| self.metadata.get("amount").and_then(PropertyValue::as_number))
            .unwrap_or(0.0)
    }

    /// Best available date: `transaction_date`, then `date`, then `timestamp`.
    pub fn best_date(&self) -> Option<NaiveDateTime> {
        self.metadata
            .transaction_date
            .as_deref()
            .and_then(parse_datetime)
            .or_else(|| self.metadata.get("date").and_then(PropertyValue::as_datetime))
            .or_else(|| self.metadata.get("timestamp").and_then(PropertyValue::as_datetime))
    }
}

//! Stage 1: semantic filtering

use super::GraphFilters;
use crate::graph::{EntityType, Link, Node, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// A link that survived filtering, with the opacity it should be drawn at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledLink {
    #[serde(flatten)]
    pub link: Link,
    pub opacity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<StyledLink>,
}

/// Keep nodes whose type is in `visible_types` and that pass every active
/// predicate of `filters`, then the links whose endpoints both survived.
///
/// A link's opacity is the lower of its endpoints' layer opacities. Nodes
/// with no date or no confidence are not excluded by the date or confidence
/// bounds.
pub fn filter_graph(
    nodes: &[Node],
    links: &[Link],
    visible_types: &FxHashSet<EntityType>,
    filters: &GraphFilters,
) -> FilteredGraph {
    let nodes: Vec<Node> = nodes
        .iter()
        .filter(|node| visible_types.contains(&node.entity_type) && passes(node, filters))
        .cloned()
        .collect();

    let opacity: FxHashMap<&NodeId, f64> = nodes
        .iter()
        .map(|n| (&n.id, filters.layers.opacity_for(n.effective_layer())))
        .collect();

    let links = links
        .iter()
        .filter_map(|link| {
            let source = opacity.get(&link.source)?;
            let target = opacity.get(&link.target)?;
            Some(StyledLink {
                link: link.clone(),
                opacity: source.min(*target),
            })
        })
        .collect();

    FilteredGraph { nodes, links }
}

fn passes(node: &Node, filters: &GraphFilters) -> bool {
    if !filters.entity_types.is_empty() && !filters.entity_types.contains(&node.entity_type) {
        return false;
    }
    if !filters.risk_levels.is_empty() && !filters.risk_levels.contains(&node.risk_level) {
        return false;
    }
    if filters.min_confidence > 0.0 {
        if let Some(confidence) = node.metadata.confidence {
            if confidence < filters.min_confidence {
                return false;
            }
        }
    }
    if filters.date_from.is_some() || filters.date_to.is_some() {
        if let Some(date) = node.best_date().map(|d| d.date()) {
            if filters.date_from.is_some_and(|from| date < from) || filters.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
    }
    if filters.has_metadata && node.metadata.is_empty() {
        return false;
    }
    filters.layers.is_visible(node.effective_layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LayerVisibility;
    use crate::graph::{NodeMetadata, RiskLevel};
    use chrono::NaiveDate;

    fn all_types() -> FxHashSet<EntityType> {
        ["person", "account", "phone"].into_iter().map(EntityType::from).collect()
    }

    fn sample() -> (Vec<Node>, Vec<Link>) {
        let mut dated = NodeMetadata::default();
        dated.transaction_date = Some("2024-02-10".to_string());
        dated.confidence = Some(40.0);

        let nodes = vec![
            Node::new("p", "suspect", "person").with_risk(RiskLevel::High).with_layer(0),
            Node::new("acc", "account", "account").with_metadata(dated).with_layer(1),
            Node::new("ph", "phone", "phone").with_layer(2),
        ];
        let links = vec![
            Link::new("owns", "p", "acc", "OWNS"),
            Link::new("called", "p", "ph", "CALLED"),
            Link::new("dangling", "p", "ghost", "CALLED"),
        ];
        (nodes, links)
    }

    fn ids(filtered: &FilteredGraph) -> Vec<&str> {
        filtered.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_drops_only_dangling_links() {
        let (nodes, links) = sample();
        let filtered = filter_graph(&nodes, &links, &all_types(), &GraphFilters::default());
        assert_eq!(filtered.nodes.len(), 3);
        assert_eq!(filtered.links.len(), 2);
    }

    #[test]
    fn test_visible_types_allow_set() {
        let (nodes, links) = sample();
        let types: FxHashSet<EntityType> = [EntityType::from("person")].into_iter().collect();
        let filtered = filter_graph(&nodes, &links, &types, &GraphFilters::default());
        assert_eq!(ids(&filtered), vec!["p"]);
        assert!(filtered.links.is_empty());

        let filtered = filter_graph(&nodes, &links, &FxHashSet::default(), &GraphFilters::default());
        assert!(filtered.nodes.is_empty());
    }

    #[test]
    fn test_predicates_are_anded() {
        let (nodes, links) = sample();
        let filters = GraphFilters {
            risk_levels: vec![RiskLevel::Low],
            has_metadata: true,
            ..Default::default()
        };
        let filtered = filter_graph(&nodes, &links, &all_types(), &filters);
        assert_eq!(ids(&filtered), vec!["acc"]);
    }

    #[test]
    fn test_confidence_and_dates_skip_missing_values() {
        let (nodes, links) = sample();
        let filters = GraphFilters {
            min_confidence: 50.0,
            ..Default::default()
        };
        assert_eq!(ids(&filter_graph(&nodes, &links, &all_types(), &filters)), vec!["p", "ph"]);

        let filters = GraphFilters {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_graph(&nodes, &links, &all_types(), &filters)), vec!["p", "ph"]);

        let filters = GraphFilters {
            date_from: NaiveDate::from_ymd_opt(2024, 2, 10),
            date_to: NaiveDate::from_ymd_opt(2024, 2, 10),
            ..Default::default()
        };
        assert_eq!(filter_graph(&nodes, &links, &all_types(), &filters).nodes.len(), 3);
    }

    #[test]
    fn test_layer_visibility_and_opacity() {
        let (nodes, links) = sample();
        let filters = GraphFilters {
            layers: LayerVisibility::custom([0, 1]).with_opacity(1, 0.3),
            ..Default::default()
        };
        let filtered = filter_graph(&nodes, &links, &all_types(), &filters);

        assert_eq!(ids(&filtered), vec!["p", "acc"]);
        assert_eq!(filtered.links.len(), 1);
        assert_eq!(filtered.links[0].opacity, 0.3);
    }
}

use casegraph::filter::{
    cull_to_viewport, filter_graph, run_pipeline, GraphFilters, LayerPreset, LayerVisibility, ViewportState,
};
use casegraph::geometry::Viewport;
use casegraph::graph::{EntityType, Link, Node, NodeId, NodeMetadata, RiskLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::collections::HashSet;

const TYPES: [&str; 3] = ["person", "account", "phone"];
const RISKS: [RiskLevel; 4] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical];

/// Positioned graph with random types, risks, layers and confidence
fn random_case(seed: u64, n: usize, m: usize) -> (Vec<Node>, Vec<Link>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes = (0..n)
        .map(|i| {
            let mut meta = NodeMetadata::default();
            if rng.gen_bool(0.5) {
                meta.confidence = Some(rng.gen_range(0.0..100.0));
            }
            Node::new(i.to_string(), format!("n{}", i), TYPES[rng.gen_range(0..TYPES.len())])
                .with_risk(RISKS[rng.gen_range(0..RISKS.len())])
                .with_layer(rng.gen_range(0..4))
                .with_metadata(meta)
                .at(rng.gen_range(-5_000.0..5_000.0), rng.gen_range(-5_000.0..5_000.0))
        })
        .collect();
    // A few links point at nodes that do not exist
    let links = (0..m)
        .map(|i| {
            let s = rng.gen_range(0..n + 3).to_string();
            let t = rng.gen_range(0..n + 3).to_string();
            Link::new(format!("l{}", i), s, t, "CALLED")
        })
        .collect();
    (nodes, links)
}

fn all_types() -> FxHashSet<EntityType> {
    TYPES.into_iter().map(EntityType::from).collect()
}

fn filter_sets() -> Vec<GraphFilters> {
    vec![
        GraphFilters::default(),
        GraphFilters {
            entity_types: vec![EntityType::from("account")],
            ..Default::default()
        },
        GraphFilters {
            risk_levels: vec![RiskLevel::High, RiskLevel::Critical],
            min_confidence: 50.0,
            ..Default::default()
        },
        GraphFilters {
            has_metadata: true,
            layers: LayerVisibility {
                preset: LayerPreset::Extended,
                ..Default::default()
            },
            ..Default::default()
        },
        GraphFilters {
            layers: LayerVisibility::custom([1, 3]).with_opacity(3, 0.25),
            ..Default::default()
        },
    ]
}

#[test]
fn test_filter_containment() {
    for seed in 0..10 {
        let (nodes, links) = random_case(seed, 200, 400);
        let all_ids: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
        let viewport = ViewportState::new(Viewport::new(0.8, 300.0, -200.0), 1200.0, 900.0);

        for filters in filter_sets() {
            let result = run_pipeline(&nodes, &links, &all_types(), &filters, &viewport, 800.0);

            let filtered: HashSet<&NodeId> = result.filtered.nodes.iter().map(|n| &n.id).collect();
            assert!(filtered.is_subset(&all_ids));
            for styled in &result.filtered.links {
                assert!(filtered.contains(&styled.link.source) && filtered.contains(&styled.link.target));
                assert!((0.0..=1.0).contains(&styled.opacity));
            }

            let visible: HashSet<&NodeId> = result.visible.nodes.iter().map(|n| &n.id).collect();
            assert!(visible.is_subset(&filtered));
            for styled in &result.visible.links {
                assert!(visible.contains(&styled.link.source) && visible.contains(&styled.link.target));
            }

            let stats = result.stats;
            assert_eq!(stats.total_nodes, nodes.len());
            assert_eq!(stats.culled_nodes, stats.filtered_nodes - stats.visible_nodes);
            assert_eq!(stats.culled_links, stats.filtered_links - stats.visible_links);
        }
    }
}

#[test]
fn test_filtered_links_are_exactly_surviving_pairs() {
    let (nodes, links) = random_case(3, 100, 300);
    let filters = GraphFilters {
        risk_levels: vec![RiskLevel::Low],
        ..Default::default()
    };
    let filtered = filter_graph(&nodes, &links, &all_types(), &filters);
    let kept: HashSet<&NodeId> = filtered.nodes.iter().map(|n| &n.id).collect();

    let expected = links
        .iter()
        .filter(|l| kept.contains(&l.source) && kept.contains(&l.target))
        .count();
    assert_eq!(filtered.links.len(), expected);
    assert!(filtered.nodes.iter().all(|n| n.risk_level == RiskLevel::Low));
}

#[test]
fn test_cull_matches_visible_rect() {
    let (nodes, links) = random_case(5, 300, 0);
    let filtered = filter_graph(&nodes, &links, &all_types(), &GraphFilters::default());
    let state = ViewportState::new(Viewport::new(1.5, -400.0, 250.0), 1000.0, 700.0);
    let rect = state.visible_rect(100.0);

    let visible = cull_to_viewport(&filtered, &state, 100.0);
    let expected: Vec<&NodeId> = filtered
        .nodes
        .iter()
        .filter(|n| n.position().is_some_and(|(x, y)| rect.contains(x, y)))
        .map(|n| &n.id)
        .collect();
    let actual: Vec<&NodeId> = visible.nodes.iter().map(|n| &n.id).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_non_positive_zoom_does_not_panic() {
    let (nodes, links) = random_case(1, 50, 50);
    let state = ViewportState::new(Viewport::new(0.0, 0.0, 0.0), 800.0, 600.0);
    let result = run_pipeline(&nodes, &links, &all_types(), &GraphFilters::default(), &state, 800.0);
    assert_eq!(result.stats.filtered_nodes, 50);
}

//! Top-down layered tree

use super::{layer_groups, LayoutOutcome};
use crate::config::LayoutConfig;
use crate::geometry::{clamp_between, Rect, Viewport};
use crate::graph::GraphSnapshot;

/// One row per layer, top to bottom, each row centred horizontally.
///
/// Row spacing is the container height shared out over the layers and
/// horizontal spacing the width shared out over the row, both clamped to the
/// configured ranges. Within a row, nodes are ordered by descending amount,
/// then label. The outcome carries a viewport fitting the bounding box
/// (grown by `fit_margin`) into the container.
pub fn tree_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> LayoutOutcome {
    let tree = &config.tree;
    let mut nodes = snapshot.nodes().to_vec();
    let groups = layer_groups(&nodes);

    let vspace = clamp_between(
        config.height / groups.len().max(1) as f64,
        tree.min_vertical_spacing,
        tree.max_vertical_spacing,
    );

    for (row, mut members) in groups.into_values().enumerate() {
        members.sort_by(|&a, &b| {
            nodes[b]
                .amount()
                .total_cmp(&nodes[a].amount())
                .then_with(|| nodes[a].label.cmp(&nodes[b].label))
        });

        let count = members.len() as f64;
        let hspace = clamp_between(
            config.width / count,
            tree.min_horizontal_spacing,
            tree.max_horizontal_spacing,
        );
        let y = tree.top_margin + vspace * row as f64;
        for (i, pos) in members.into_iter().enumerate() {
            let x = config.width / 2.0 + (i as f64 - (count - 1.0) / 2.0) * hspace;
            nodes[pos].set_position(x, y);
        }
    }

    let suggested_viewport = Rect::bounding(nodes.iter().filter_map(|n| n.position())).map(|bounds| {
        Viewport::fit(
            &bounds.expand(tree.fit_margin / 2.0),
            config.width,
            config.height,
            tree.min_zoom,
            tree.max_zoom,
        )
    });

    LayoutOutcome {
        nodes,
        suggested_viewport,
        extents: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeMetadata};

    fn with_amount(id: &str, layer: u32, amount: f64) -> Node {
        let meta = NodeMetadata {
            amount: Some(amount),
            ..Default::default()
        };
        Node::new(id, id, "account").with_layer(layer).with_metadata(meta)
    }

    #[test]
    fn test_rows_and_ordering() {
        let nodes = vec![
            with_amount("root", 0, 0.0),
            with_amount("small", 1, 10.0),
            with_amount("large", 1, 500.0),
        ];
        let snapshot = GraphSnapshot::new(nodes, vec![]).unwrap();
        let config = LayoutConfig::default();
        let nodes = tree_layout(&snapshot, &config).nodes;

        // 1000 / 2 layers = 500, clamped up to 600
        assert_eq!(nodes[0].position(), Some((800.0, 100.0)));
        assert_eq!(nodes[1].y, Some(700.0));
        // 1600 / 2 = 800 clamped to 500; larger amount goes left
        assert_eq!(nodes[2].x, Some(550.0));
        assert_eq!(nodes[1].x, Some(1050.0));
    }

    #[test]
    fn test_suggested_viewport_is_clamped() {
        let nodes = (0..10).map(|i| with_amount(&i.to_string(), i, 0.0)).collect();
        let snapshot = GraphSnapshot::new(nodes, vec![]).unwrap();
        let config = LayoutConfig::default();

        let viewport = tree_layout(&snapshot, &config).suggested_viewport.unwrap();
        assert_eq!(viewport.zoom, config.tree.min_zoom);

        let single = GraphSnapshot::new(vec![with_amount("a", 0, 0.0)], vec![]).unwrap();
        let viewport = tree_layout(&single, &config).suggested_viewport.unwrap();
        assert_eq!(viewport.zoom, config.tree.max_zoom);
    }

    #[test]
    fn test_inverted_or_nan_ranges_do_not_panic() {
        let nodes = vec![
            with_amount("root", 0, 0.0),
            with_amount("a", 1, 1.0),
            with_amount("b", 1, 2.0),
        ];
        let snapshot = GraphSnapshot::new(nodes, vec![]).unwrap();
        let mut config = LayoutConfig::default();
        config.tree.min_vertical_spacing = 800.0;
        config.tree.max_vertical_spacing = 600.0;
        config.tree.min_horizontal_spacing = f64::NAN;
        config.tree.min_zoom = f64::NAN;

        let outcome = tree_layout(&snapshot, &config);
        // 1000 / 2 layers = 500, raised to the range's low end 600
        assert_eq!(outcome.nodes[1].y, Some(700.0));
        assert!(outcome.nodes.iter().all(|n| n.position().is_some()));
        assert!(outcome.suggested_viewport.unwrap().zoom.is_finite());
    }
}

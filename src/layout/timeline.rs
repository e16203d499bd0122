//! Chronological layout

use crate::config::LayoutConfig;
use crate::graph::{GraphSnapshot, Node};

/// Order nodes by their best available date, undated nodes last (ties keep
/// snapshot order). `x` follows the rank; `y` is the layer offset plus a
/// round-robin band so neighbouring ranks do not overlap.
pub fn timeline_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Vec<Node> {
    let timeline = &config.timeline;
    let bands = timeline.bands.max(1);

    let mut order: Vec<(usize, Option<_>)> = snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(pos, node)| (pos, node.best_date()))
        .collect();
    // None sorts after every date
    order.sort_by_key(|&(pos, date)| (date.is_none(), date, pos));

    let mut nodes = snapshot.nodes().to_vec();
    for (rank, (pos, _)) in order.into_iter().enumerate() {
        let layer = nodes[pos].effective_layer().unwrap_or(0) as f64;
        let x = timeline.margin + timeline.spacing * rank as f64;
        let y = timeline.margin + timeline.layer_offset * layer + timeline.band_height * (rank % bands) as f64;
        nodes[pos].set_position(x, y);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeMetadata;

    fn dated(id: &str, key: &str, date: &str) -> Node {
        let mut meta = NodeMetadata::default();
        meta.set(key, date);
        Node::new(id, id, "transaction").with_metadata(meta)
    }

    #[test]
    fn test_sorted_by_best_date() {
        let mut early = NodeMetadata::default();
        early.transaction_date = Some("2024-01-01".to_string());
        let nodes = vec![
            Node::new("undated", "u", "transaction"),
            dated("late", "timestamp", "2024-03-01T10:00:00"),
            Node::new("early", "e", "transaction").with_metadata(early),
            dated("mid", "date", "15/02/2024"),
        ];
        let snapshot = GraphSnapshot::new(nodes, vec![]).unwrap();
        let nodes = timeline_layout(&snapshot, &LayoutConfig::default());

        let x = |id: &str| nodes.iter().find(|n| n.id.as_str() == id).unwrap().x.unwrap();
        assert_eq!(x("early"), 100.0);
        assert_eq!(x("mid"), 300.0);
        assert_eq!(x("late"), 500.0);
        assert_eq!(x("undated"), 700.0);
    }

    #[test]
    fn test_bands_and_layer_offset() {
        let nodes = (0..4).map(|i| Node::new(i.to_string(), "n", "x").with_layer(1)).collect();
        let snapshot = GraphSnapshot::new(nodes, vec![]).unwrap();
        let nodes = timeline_layout(&snapshot, &LayoutConfig::default());

        let ys: Vec<f64> = nodes.iter().map(|n| n.y.unwrap()).collect();
        assert_eq!(ys, vec![250.0, 290.0, 330.0, 250.0]);
    }
}

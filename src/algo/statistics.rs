//! Aggregate metrics for the case metrics panel

use super::community::detect_communities;
use super::pathfinding::shortest_path_in;
use super::view::SnapshotView;
use crate::config::StatisticsConfig;
use crate::graph::GraphSnapshot;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Earliest and latest timestamp seen on entities and links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub span_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub entity_count: usize,
    /// Links whose endpoints both exist
    pub relationship_count: usize,
    /// Sum of amounts over transfer links
    pub total_money: f64,
    /// Links as a percentage of the V·(V-1)/2 possible pairs
    pub density: f64,
    pub components: usize,
    pub largest_component: usize,
    /// Entities outside the largest component
    pub isolated_entities: usize,
    /// Sampled estimate, see [`calculate_statistics`]
    pub avg_path_length: f64,
    pub date_range: Option<DateRange>,
}

/// Compute [`GraphStatistics`].
///
/// `avg_path_length` is estimated from `min(config.sample_pairs, V²)` random
/// node pairs drawn with a generator seeded by `config.seed`; pairs without
/// a path (including a node paired with itself) are left out of the mean.
pub fn calculate_statistics(snapshot: &GraphSnapshot, config: &StatisticsConfig) -> GraphStatistics {
    let v = snapshot.node_count();
    let (relationship_count, total_money) = snapshot
        .valid_links()
        .fold((0usize, 0.0f64), |(count, money), link| {
            let money = if link.is_transfer() {
                money + link.amount_or_zero()
            } else {
                money
            };
            (count + 1, money)
        });

    let density = if v < 2 {
        0.0
    } else {
        let possible = (v * (v - 1)) as f64 / 2.0;
        relationship_count as f64 / possible * 100.0
    };

    let communities = detect_communities(snapshot);
    let largest_component = communities.largest();

    let stats = GraphStatistics {
        entity_count: v,
        relationship_count,
        total_money,
        density,
        components: communities.communities.len(),
        largest_component,
        isolated_entities: v - largest_component,
        avg_path_length: sample_avg_path_length(snapshot, config),
        date_range: date_range(snapshot),
    };
    debug!(
        "Statistics: {} entities, {} relationships, {} components",
        stats.entity_count, stats.relationship_count, stats.components
    );
    stats
}

fn sample_avg_path_length(snapshot: &GraphSnapshot, config: &StatisticsConfig) -> f64 {
    let v = snapshot.node_count();
    if v == 0 {
        return 0.0;
    }

    let samples = config.sample_pairs.min(v.saturating_mul(v));
    let sv = SnapshotView::all_links(snapshot);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let nodes = snapshot.nodes();

    let (total, found) = (0..samples).fold((0usize, 0usize), |(total, found), _| {
        let a = &nodes[rng.gen_range(0..v)].id;
        let b = &nodes[rng.gen_range(0..v)].id;
        match shortest_path_in(&sv, snapshot, a, b) {
            Some(path) => (total + path.length, found + 1),
            None => (total, found),
        }
    });

    if found == 0 {
        0.0
    } else {
        total as f64 / found as f64
    }
}

fn date_range(snapshot: &GraphSnapshot) -> Option<DateRange> {
    let dates = snapshot
        .nodes()
        .iter()
        .filter_map(|n| n.best_date())
        .chain(snapshot.valid_links().filter_map(|l| l.parsed_date()));

    let (start, end) = dates.fold(None, |acc: Option<(NaiveDateTime, NaiveDateTime)>, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    })?;

    Some(DateRange {
        start,
        end,
        span_days: (end - start).num_days(),
    })
}

//! Force-directed layout
//!
//! A fixed number of simulation steps with inverse-square repulsion between
//! every pair of nodes and Hookean springs along links.
//!
//! Cost is O(V²·iterations): each step visits every node pair. The pair
//! sums for one step are independent per node, so they run on the rayon
//! pool; each node still sums its neighbours in snapshot order, which keeps
//! the result identical between runs.

use crate::config::LayoutConfig;
use crate::graph::{GraphSnapshot, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

// Below this squared distance two nodes are treated as coincident
const COINCIDENT: f64 = 1e-6;

/// Position every node with the force simulation. Nodes that already have
/// a position start from it; the rest are seeded uniformly at random in the
/// container.
pub fn force_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Vec<Node> {
    let force = &config.force;
    let mut positions = seed_positions(snapshot.nodes(), config);
    let springs = springs(snapshot);

    for iteration in 0..force.iterations {
        let mut displacement = repulsion(&positions, force.repulsion);

        for &(s, t) in &springs {
            let dx = positions[t].0 - positions[s].0;
            let dy = positions[t].1 - positions[s].1;
            let dist = (dx * dx + dy * dy).sqrt().max(COINCIDENT.sqrt());
            let pull = force.spring_stiffness * (dist - force.spring_length);
            let (fx, fy) = (dx / dist * pull, dy / dist * pull);
            displacement[s].0 += fx;
            displacement[s].1 += fy;
            displacement[t].0 -= fx;
            displacement[t].1 -= fy;
        }

        let limit = force.max_step * (1.0 - iteration as f64 / force.iterations as f64);
        for (pos, (dx, dy)) in positions.iter_mut().zip(displacement) {
            let len = (dx * dx + dy * dy).sqrt();
            let scale = if len > limit && len > 0.0 {
                limit / len
            } else {
                1.0
            };
            pos.0 += dx * scale;
            pos.1 += dy * scale;
        }
    }

    debug!(
        "Force layout: {} nodes, {} springs, {} iterations",
        positions.len(),
        springs.len(),
        force.iterations
    );

    snapshot
        .nodes()
        .iter()
        .zip(positions)
        .map(|(node, (x, y))| node.clone().at(x, y))
        .collect()
}

fn seed_positions(nodes: &[Node], config: &LayoutConfig) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(config.force.seed);
    let (width, height) = (config.width.max(1.0), config.height.max(1.0));

    nodes
        .iter()
        .map(|node| {
            node.position()
                .unwrap_or_else(|| (rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        })
        .collect()
}

/// Endpoint positions of every link that can pull, self-loops excluded
fn springs(snapshot: &GraphSnapshot) -> Vec<(usize, usize)> {
    snapshot
        .valid_links()
        .filter(|link| !link.is_self_loop())
        .filter_map(|link| Some((snapshot.position_of(&link.source)?, snapshot.position_of(&link.target)?)))
        .collect()
}

fn repulsion(positions: &[(f64, f64)], strength: f64) -> Vec<(f64, f64)> {
    (0..positions.len())
        .into_par_iter()
        .map(|i| {
            let (xi, yi) = positions[i];
            positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold((0.0, 0.0), |(ax, ay), (j, &(xj, yj))| {
                    let (mut dx, mut dy) = (xi - xj, yi - yj);
                    let mut dist_sq = dx * dx + dy * dy;
                    if dist_sq < COINCIDENT {
                        // Separate stacked nodes along x, lower index to the left
                        dx = if i > j { 1.0 } else { -1.0 };
                        dy = 0.0;
                        dist_sq = 1.0;
                    }
                    let dist = dist_sq.sqrt();
                    let push = strength / dist_sq;
                    (ax + dx / dist * push, ay + dy / dist * push)
                })
        })
        .collect()
}

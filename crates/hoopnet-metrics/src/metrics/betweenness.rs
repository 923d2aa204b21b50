//! Betweenness centrality via Brandes' algorithm on the cost graph.
//!
//! # Overview
//!
//! Betweenness measures how often a player lies on shortest passing paths
//! between two other players. Path length is the sum of edge costs in a
//! [`CostGraph`] (cost = 1 / assists), so a frequently used link is short.
//!
//! # Algorithm
//!
//! Brandes (2001), weighted variant:
//!
//! 1. For each source `s`, run Dijkstra to obtain shortest-path counts
//!    (`sigma`), predecessor lists and the order nodes were settled in.
//! 2. Accumulate dependencies in reverse settle order.
//! 3. Sum the dependencies across all sources.
//!
//! Pairs with no directed path contribute nothing. Two paths tie only when
//! their summed costs are exactly equal.
//!
//! # Output
//!
//! With `normalized = true`, scores are divided by `(n-1)(n-2)`, the number
//! of ordered pairs excluding the node itself, which bounds them to
//! `[0, 1]`. Graphs with two or fewer nodes are returned unscaled (every
//! score is 0 there anyway).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::{graph::NodeIndex, visit::EdgeRef};
use tracing::instrument;

use crate::graph::CostGraph;

/// Min-heap entry for Dijkstra: ordered by distance, then insertion order.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    seq: usize,
    pred: usize,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Shortest-path DAG from one source, as needed by the accumulation step.
struct SingleSource {
    /// Nodes in the order they were settled (non-decreasing distance).
    settled: Vec<usize>,
    predecessors: Vec<Vec<usize>>,
    sigma: Vec<f64>,
}

/// Compute betweenness centrality for all players in the cost graph.
///
/// # Returns
///
/// A `HashMap<String, f64>` mapping each player to its score. Players that
/// never sit between two others score 0.0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn betweenness_centrality(g: &CostGraph, normalized: bool) -> HashMap<String, f64> {
    let n = g.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let mut cb = vec![0.0_f64; n];

    for s in 0..n {
        let sp = dijkstra_paths(g, s);

        let mut delta = vec![0.0_f64; n];
        for &w in sp.settled.iter().rev() {
            let coeff = (1.0 + delta[w]) / sp.sigma[w];
            for &v in &sp.predecessors[w] {
                delta[v] += sp.sigma[v] * coeff;
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if normalized && n > 2 {
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut cb {
            *score *= scale;
        }
    }

    g.graph
        .node_indices()
        .map(|idx| (g.graph[idx].clone(), cb[idx.index()]))
        .collect()
}

/// Dijkstra from `s`, counting shortest paths and recording predecessors.
#[allow(clippy::float_cmp)]
fn dijkstra_paths(g: &CostGraph, s: usize) -> SingleSource {
    let n = g.node_count();
    let mut settled = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<f64>> = vec![None; n];
    let mut seen: Vec<Option<f64>> = vec![None; n];

    sigma[s] = 1.0;
    seen[s] = Some(0.0);

    let mut seq = 0;
    let mut heap = BinaryHeap::new();
    heap.push(Frontier {
        dist: 0.0,
        seq,
        pred: s,
        node: s,
    });

    while let Some(Frontier {
        dist: d,
        pred,
        node: v,
        ..
    }) = heap.pop()
    {
        if dist[v].is_some() {
            continue;
        }
        if v != s {
            sigma[v] += sigma[pred];
        }
        settled.push(v);
        dist[v] = Some(d);

        for edge in g.graph.edges(NodeIndex::new(v)) {
            let w = edge.target().index();
            let vw_dist = d + *edge.weight();

            let improves = dist[w].is_none() && seen[w].is_none_or(|sw| vw_dist < sw);
            if improves {
                seen[w] = Some(vw_dist);
                seq += 1;
                heap.push(Frontier {
                    dist: vw_dist,
                    seq,
                    pred: v,
                    node: w,
                });
                sigma[w] = 0.0;
                predecessors[w] = vec![v];
            } else if seen[w] == Some(vw_dist) {
                // Equal-length path through v.
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    SingleSource {
        settled,
        predecessors,
        sigma,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

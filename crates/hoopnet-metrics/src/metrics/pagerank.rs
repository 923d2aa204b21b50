//! Weighted PageRank over the assist graph.
//!
//! # Algorithm
//!
//! Power iteration on the weight-normalized transition matrix:
//!
//! ```text
//! PR'(v) = (1 - d) / N
//!        + d * Σ_{u → v} PR(u) * w(u, v) / W(u)
//!        + d * Σ_{u dangling} PR(u) / N
//! ```
//!
//! where `W(u)` is the out-strength of `u` and `d` the damping factor
//! (default 0.85). Players who never assisted (dangling nodes) hand their
//! mass to everyone uniformly, so the vector keeps summing to 1.
//!
//! Iteration starts from the uniform vector and stops once the L1 change
//! drops below `N * tolerance`. Running out of iterations is an error, not a
//! silently returned approximation.

use std::collections::HashMap;

use hoopnet_core::config::PageRankSettings;
use hoopnet_core::{Error, Result};
use petgraph::Direction;
use tracing::{debug, instrument, warn};

use crate::graph::AssistGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Damping factor (probability of following an assist link vs
    /// teleporting). Default: 0.85.
    pub damping: f64,
    /// Convergence threshold per node: stop when the L1 norm of the rank
    /// delta is below `N * tolerance`. Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<&PageRankSettings> for PageRankConfig {
    fn from(s: &PageRankSettings) -> Self {
        Self {
            damping: s.damping,
            tolerance: s.tolerance,
            max_iter: s.max_iter,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a converged PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: player → probability mass.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute weighted PageRank for every player in `g`.
///
/// # Errors
///
/// Returns [`Error::Numerical`] if the damping factor is outside `[0, 1]`,
/// the tolerance is not a positive finite number, or the iteration does not
/// converge within `config.max_iter` steps.
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn pagerank(g: &AssistGraph, config: &PageRankConfig) -> Result<PageRankResult> {
    validate_config(config)?;

    let n = g.node_count();
    if n == 0 {
        return Ok(PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let n_f64 = n as f64;
    let d = config.damping;
    let base = (1.0 - d) / n_f64;

    // Out-strength per node; 0 marks a dangling node.
    let out_weight: Vec<f64> = g
        .graph
        .node_indices()
        .map(|idx| {
            g.weighted_neighbors(idx, Direction::Outgoing)
                .map(|(_, w)| f64::from(w))
                .sum()
        })
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut next = vec![0.0_f64; n];

    for iteration in 1..=config.max_iter {
        let dangling_mass: f64 = ranks
            .iter()
            .zip(&out_weight)
            .filter(|(_, w)| **w == 0.0)
            .map(|(r, _)| *r)
            .sum();
        let teleport = base + d * dangling_mass / n_f64;

        for r in &mut next {
            *r = teleport;
        }

        for idx in g.graph.node_indices() {
            let i = idx.index();
            if out_weight[i] == 0.0 {
                continue;
            }
            let mass = d * ranks[i] / out_weight[i];
            for (target, w) in g.weighted_neighbors(idx, Direction::Outgoing) {
                next[target.index()] += mass * f64::from(w);
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut next);

        if !delta.is_finite() {
            return Err(Error::Numerical(format!(
                "PageRank diverged at iteration {iteration}"
            )));
        }

        if delta < n_f64 * config.tolerance {
            debug!(iterations = iteration, delta, "PageRank converged");
            if iteration * 2 > config.max_iter {
                warn!(
                    iterations = iteration,
                    max_iter = config.max_iter,
                    "PageRank needed more than half its iteration budget"
                );
            }
            let scores = g
                .graph
                .node_indices()
                .map(|idx| (g.graph[idx].clone(), ranks[idx.index()]))
                .collect();
            return Ok(PageRankResult {
                scores,
                iterations: iteration,
            });
        }
    }

    warn!(max_iter = config.max_iter, "PageRank failed to converge");
    Err(Error::Numerical(format!(
        "PageRank did not converge within {} iterations (tolerance {})",
        config.max_iter, config.tolerance
    )))
}

fn validate_config(config: &PageRankConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.damping) {
        return Err(Error::Numerical(format!(
            "damping must be within [0, 1], got {}",
            config.damping
        )));
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(Error::Numerical(format!(
            "tolerance must be positive, got {}",
            config.tolerance
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Weighted degree (strength) of each player.
//!
//! - **out-strength**: total assists a player handed out.
//! - **in-strength**: total assists a player received.
//!
//! A self-loop counts toward both.

use std::collections::HashMap;

use petgraph::Direction;

use crate::graph::AssistGraph;

/// Per-player out- and in-strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strengths {
    pub out_strength: HashMap<String, u64>,
    pub in_strength: HashMap<String, u64>,
}

impl Strengths {
    /// Out-strength of `player`, 0 if unknown.
    #[must_use]
    pub fn out_of(&self, player: &str) -> u64 {
        self.out_strength.get(player).copied().unwrap_or(0)
    }

    /// In-strength of `player`, 0 if unknown.
    #[must_use]
    pub fn in_of(&self, player: &str) -> u64 {
        self.in_strength.get(player).copied().unwrap_or(0)
    }
}

/// Compute out- and in-strength for every player in `g`.
///
/// Every node gets an entry in both maps, 0 when it has no edges in that
/// direction.
#[must_use]
pub fn strengths(g: &AssistGraph) -> Strengths {
    let mut out_strength = HashMap::with_capacity(g.node_count());
    let mut in_strength = HashMap::with_capacity(g.node_count());

    for idx in g.graph.node_indices() {
        let name = g.graph[idx].clone();
        let out_s: u64 = g
            .weighted_neighbors(idx, Direction::Outgoing)
            .map(|(_, w)| u64::from(w))
            .sum();
        let in_s: u64 = g
            .weighted_neighbors(idx, Direction::Incoming)
            .map(|(_, w)| u64::from(w))
            .sum();
        out_strength.insert(name.clone(), out_s);
        in_strength.insert(name, in_s);
    }

    Strengths {
        out_strength,
        in_strength,
    }
}

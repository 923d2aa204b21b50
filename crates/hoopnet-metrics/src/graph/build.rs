//! Assist graph construction from a validated edge list.
//!
//! # Overview
//!
//! Each [`AssistEdge`] `A → B (w)` becomes one petgraph edge with weight
//! `w`. Nodes are the union of all endpoints, inserted in order of first
//! appearance so that node indices are stable for a given input order.
//!
//! ## Repeated Pairs
//!
//! An ordered pair maps to a single edge weight. If the input repeats a
//! pair, the later count replaces the earlier one and a warning is logged.
//!
//! ## Content Hash
//!
//! The graph carries a BLAKE3 hash of the edge list as ingested. Two runs
//! with the same hash saw byte-identical input.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use hoopnet_core::{AssistEdge, EdgeList};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use tracing::{instrument, warn};

// ---------------------------------------------------------------------------
// AssistGraph
// ---------------------------------------------------------------------------

/// A directed, weighted assist network.
///
/// Nodes are player names. An edge `A → B` with weight `w` means A assisted
/// B on `w` made baskets.
#[derive(Debug, Clone)]
pub struct AssistGraph {
    /// Directed graph: nodes = player names, edge weights = assist counts.
    pub graph: DiGraph<String, u32>,
    /// Mapping from player name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of the ingested edge list.
    pub content_hash: String,
}

impl AssistGraph {
    /// Build an [`AssistGraph`] from `edges`.
    #[must_use]
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn from_edges(edges: &EdgeList) -> Self {
        let mut graph = DiGraph::<String, u32>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for edge in edges {
            let from = *node_map
                .entry(edge.from_player.clone())
                .or_insert_with(|| graph.add_node(edge.from_player.clone()));
            let to = *node_map
                .entry(edge.to_player.clone())
                .or_insert_with(|| graph.add_node(edge.to_player.clone()));

            if let Some(existing) = graph.find_edge(from, to) {
                warn!(
                    from = %edge.from_player,
                    to = %edge.to_player,
                    previous = graph[existing],
                    replacement = edge.assists,
                    "repeated assist pair, keeping the later count"
                );
                graph[existing] = edge.assists;
            } else {
                graph.add_edge(from, to, edge.assists);
            }
        }

        Self {
            graph,
            node_map,
            content_hash: compute_edge_hash(edges.edges()),
        }
    }

    /// Return the number of players in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct passer → receiver pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a player.
    #[must_use]
    pub fn node_index(&self, player: &str) -> Option<NodeIndex> {
        self.node_map.get(player).copied()
    }

    /// Return the player name for a node.
    #[must_use]
    pub fn player(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// All player names, sorted.
    #[must_use]
    pub fn players_sorted(&self) -> Vec<String> {
        let mut players: Vec<String> = self.graph.node_weights().cloned().collect();
        players.sort();
        players
    }

    /// Assist count on `from → to`, or `None` if there is no such edge.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Sum of all edge weights after repeated pairs were collapsed.
    #[must_use]
    pub fn total_assists(&self) -> u64 {
        self.graph.edge_weights().map(|w| u64::from(*w)).sum()
    }

    /// Weighted edges leaving or entering `idx`, as `(neighbor, weight)`.
    pub fn weighted_neighbors(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeIndex, u32)> + '_ {
        self.graph.edges_directed(idx, direction).map(move |e| {
            let other = match direction {
                Direction::Outgoing => e.target(),
                Direction::Incoming => e.source(),
            };
            (other, *e.weight())
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the edge list in input order.
fn compute_edge_hash(edges: &[AssistEdge]) -> String {
    let mut hasher = blake3::Hasher::new();
    for edge in edges {
        hasher.update(edge.from_player.as_bytes());
        hasher.update(b"\x00");
        hasher.update(edge.to_player.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&edge.assists.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(triples: &[(&str, &str, u32)]) -> EdgeList {
        EdgeList::from_triples(triples).expect("valid edges")
    }

    #[test]
    fn empty_edge_list_produces_empty_graph() {
        let g = AssistGraph::from_edges(&EdgeList::default());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn nodes_are_union_of_endpoints() {
        let g = AssistGraph::from_edges(&edges(&[("A", "B", 2), ("B", "A", 1), ("A", "C", 1)]));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.players_sorted(), vec!["A", "B", "C"]);
    }

    #[test]
    fn nodes_inserted_in_first_appearance_order() {
        let g = AssistGraph::from_edges(&edges(&[("Zed", "Amy", 1), ("Amy", "Bo", 1)]));
        assert_eq!(g.player(NodeIndex::new(0)), Some("Zed"));
        assert_eq!(g.player(NodeIndex::new(1)), Some("Amy"));
        assert_eq!(g.player(NodeIndex::new(2)), Some("Bo"));
    }

    #[test]
    fn edge_direction_and_weight() {
        let g = AssistGraph::from_edges(&edges(&[("A", "B", 2)]));
        assert_eq!(g.weight("A", "B"), Some(2));
        assert_eq!(g.weight("B", "A"), None);
        assert_eq!(g.weight("A", "Z"), None);
    }

    #[test]
    fn repeated_pair_last_write_wins() {
        let g = AssistGraph::from_edges(&edges(&[("A", "B", 2), ("A", "B", 5)]));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight("A", "B"), Some(5));
        assert_eq!(g.total_assists(), 5);
    }

    #[test]
    fn self_loop_is_kept() {
        let g = AssistGraph::from_edges(&edges(&[("A", "A", 3)]));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.weight("A", "A"), Some(3));
    }

    #[test]
    fn content_hash_tracks_weights() {
        let a = AssistGraph::from_edges(&edges(&[("A", "B", 2)]));
        let b = AssistGraph::from_edges(&edges(&[("A", "B", 3)]));
        let c = AssistGraph::from_edges(&edges(&[("A", "B", 2)]));
        assert_ne!(a.content_hash, b.content_hash);
        assert_eq!(a.content_hash, c.content_hash);
    }

    #[test]
    fn weighted_neighbors_both_directions() {
        let g = AssistGraph::from_edges(&edges(&[("A", "B", 2), ("C", "B", 4)]));
        let b = g.node_index("B").expect("B");
        let mut incoming: Vec<(String, u32)> = g
            .weighted_neighbors(b, Direction::Incoming)
            .map(|(n, w)| (g.player(n).unwrap_or_default().to_string(), w))
            .collect();
        incoming.sort();
        assert_eq!(incoming, vec![("A".to_string(), 2), ("C".to_string(), 4)]);
        assert_eq!(g.weighted_neighbors(b, Direction::Outgoing).count(), 0);
    }
}

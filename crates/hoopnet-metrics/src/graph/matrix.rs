//! Pivoted from × to assist matrix.
//!
//! Rows are the players with at least one outgoing edge, columns the
//! players with at least one incoming edge, both sorted by name. Missing
//! combinations are 0. A row sum therefore equals the player's
//! out-strength.

use petgraph::{Direction, visit::EdgeRef};
use serde::Serialize;

use super::build::AssistGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightMatrix {
    /// Row labels: passers.
    pub sources: Vec<String>,
    /// Column labels: receivers.
    pub targets: Vec<String>,
    /// `cells[row][col]` = assists from `sources[row]` to `targets[col]`.
    pub cells: Vec<Vec<u32>>,
}

impl WeightMatrix {
    /// Pivot the graph's edges into a dense matrix.
    #[must_use]
    pub fn from_graph(g: &AssistGraph) -> Self {
        let mut sources: Vec<String> = Vec::new();
        let mut targets: Vec<String> = Vec::new();
        for idx in g.graph.node_indices() {
            let name = &g.graph[idx];
            if g.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
            {
                sources.push(name.clone());
            }
            if g.graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_some()
            {
                targets.push(name.clone());
            }
        }
        sources.sort();
        targets.sort();

        let mut cells = vec![vec![0_u32; targets.len()]; sources.len()];
        for edge in g.graph.edge_references() {
            let from = &g.graph[edge.source()];
            let to = &g.graph[edge.target()];
            if let (Ok(r), Ok(c)) = (
                sources.binary_search(from),
                targets.binary_search(to),
            ) {
                cells[r][c] = *edge.weight();
            }
        }

        Self {
            sources,
            targets,
            cells,
        }
    }

    /// Assists from `from` to `to`; 0 when either label is absent.
    #[must_use]
    pub fn get(&self, from: &str, to: &str) -> u32 {
        let Some(r) = self.row_position(from) else {
            return 0;
        };
        self.targets
            .binary_search_by(|t| t.as_str().cmp(to))
            .map_or(0, |c| self.cells[r][c])
    }

    /// The row for `from`, if that player has any outgoing assists.
    #[must_use]
    pub fn row(&self, from: &str) -> Option<&[u32]> {
        self.row_position(from).map(|r| self.cells[r].as_slice())
    }

    /// Sum of a row; 0 for players without outgoing assists.
    #[must_use]
    pub fn row_sum(&self, from: &str) -> u64 {
        self.row(from)
            .map_or(0, |row| row.iter().map(|&v| u64::from(v)).sum())
    }

    /// Largest cell value (0 for an empty matrix).
    #[must_use]
    pub fn max(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn row_position(&self, from: &str) -> Option<usize> {
        self.sources
            .binary_search_by(|s| s.as_str().cmp(from))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopnet_core::EdgeList;

    fn matrix(triples: &[(&str, &str, u32)]) -> WeightMatrix {
        let edges = EdgeList::from_triples(triples).expect("valid");
        WeightMatrix::from_graph(&AssistGraph::from_edges(&edges))
    }

    #[test]
    fn three_player_pivot() {
        let m = matrix(&[("A", "B", 2), ("B", "A", 1), ("A", "C", 1)]);
        assert_eq!(m.sources, vec!["A", "B"]);
        assert_eq!(m.targets, vec!["A", "B", "C"]);
        assert_eq!(m.get("A", "B"), 2);
        assert_eq!(m.get("B", "A"), 1);
        assert_eq!(m.get("A", "C"), 1);
        assert_eq!(m.get("A", "A"), 0);
        assert_eq!(m.get("B", "C"), 0);
        assert_eq!(m.get("C", "A"), 0);
        assert_eq!(m.cells, vec![vec![0, 2, 1], vec![1, 0, 0]]);
    }

    #[test]
    fn row_sums_and_max() {
        let m = matrix(&[("A", "B", 2), ("B", "A", 1), ("A", "C", 1)]);
        assert_eq!(m.row_sum("A"), 3);
        assert_eq!(m.row_sum("B"), 1);
        assert_eq!(m.row_sum("C"), 0);
        assert!(m.row("C").is_none());
        assert_eq!(m.max(), 2);
    }

    #[test]
    fn empty_graph_gives_empty_matrix() {
        let m = WeightMatrix::from_graph(&AssistGraph::from_edges(&EdgeList::default()));
        assert!(m.is_empty());
        assert!(m.targets.is_empty());
        assert_eq!(m.max(), 0);
    }
}

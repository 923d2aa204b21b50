//! Cost-inverted view of the assist graph for shortest-path metrics.
//!
//! Edge cost is `1 / assists`: a link used four times costs 0.25, a link
//! used once costs 1.0. Heavily used passing links therefore behave as
//! short paths. Node indices are identical to the source [`AssistGraph`].

use petgraph::graph::DiGraph;

use super::build::AssistGraph;

/// Same topology as an [`AssistGraph`], with `f64` traversal costs.
#[derive(Debug, Clone)]
pub struct CostGraph {
    pub graph: DiGraph<String, f64>,
}

impl CostGraph {
    #[must_use]
    pub fn from_assists(assists: &AssistGraph) -> Self {
        Self {
            graph: assists
                .graph
                .map(|_, name| name.clone(), |_, w| 1.0 / f64::from(*w)),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

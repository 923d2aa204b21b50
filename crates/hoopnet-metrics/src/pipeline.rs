//! End-to-end analysis of one edge list.
//!
//! ```text
//! EdgeList ─▶ AssistGraph ─┬─▶ strengths ─────────────┐
//!                          ├─▶ pagerank ──────────────┤
//!                          ├─▶ CostGraph ─▶ betweenness ┼─▶ MetricsTable
//!                          └─▶ WeightMatrix            │
//! ```
//!
//! Every stage is timed; the binary prints the timings with `--timing`.

use hoopnet_core::timing::StageTimer;
use hoopnet_core::{EdgeList, Result};
use tracing::{info, instrument};

use crate::graph::{AssistGraph, CostGraph, WeightMatrix};
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::pagerank::{PageRankConfig, pagerank};
use crate::metrics::strength::strengths;
use crate::table::MetricsTable;

/// Everything derived from one edge list.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: AssistGraph,
    pub table: MetricsTable,
    pub matrix: WeightMatrix,
    /// Power iterations PageRank needed to converge.
    pub pagerank_iterations: usize,
    pub timings: StageTimer,
}

/// Build the graph and compute every metric.
///
/// # Errors
///
/// Returns [`hoopnet_core::Error::Numerical`] if PageRank is misconfigured
/// or fails to converge.
#[instrument(skip(edges, config), fields(edges = edges.len()))]
pub fn analyze(edges: &EdgeList, config: &PageRankConfig) -> Result<Analysis> {
    let mut timings = StageTimer::new();

    let graph = timings.time("build", || AssistGraph::from_edges(edges));
    let strength = timings.time("strength", || strengths(&graph));
    let pr = timings.time("pagerank", || pagerank(&graph, config))?;
    let bc = timings.time("betweenness", || {
        betweenness_centrality(&CostGraph::from_assists(&graph), true)
    });
    let table = timings.time("rank", || {
        MetricsTable::assemble(&graph.players_sorted(), &strength, &pr.scores, &bc)
    });
    let matrix = timings.time("matrix", || WeightMatrix::from_graph(&graph));

    info!(
        players = graph.node_count(),
        pairs = graph.edge_count(),
        iterations = pr.iterations,
        hash = %graph.content_hash,
        "analysis complete"
    );

    Ok(Analysis {
        graph,
        table,
        matrix,
        pagerank_iterations: pr.iterations,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_stage_in_order() {
        let edges = EdgeList::from_triples(&[("A", "B", 2), ("B", "A", 1), ("A", "C", 1)])
            .expect("valid");
        let analysis = analyze(&edges, &PageRankConfig::default()).expect("ok");
        let names: Vec<&str> = analysis
            .timings
            .stages()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["build", "strength", "pagerank", "betweenness", "rank", "matrix"]
        );
        assert_eq!(analysis.table.len(), 3);
        assert!(analysis.pagerank_iterations > 0);
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        let analysis = analyze(&EdgeList::default(), &PageRankConfig::default()).expect("ok");
        assert!(analysis.table.is_empty());
        assert!(analysis.matrix.is_empty());
        assert_eq!(analysis.pagerank_iterations, 0);
    }

    #[test]
    fn pagerank_failure_propagates() {
        let edges = EdgeList::from_triples(&[("A", "B", 1), ("B", "C", 1)]).expect("valid");
        let config = PageRankConfig {
            max_iter: 1,
            ..PageRankConfig::default()
        };
        assert!(matches!(
            analyze(&edges, &config),
            Err(hoopnet_core::Error::Numerical(_))
        ));
    }
}

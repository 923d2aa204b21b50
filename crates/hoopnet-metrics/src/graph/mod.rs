//! Assist graph module.
//!
//! # Overview
//!
//! This module turns a validated [`hoopnet_core::EdgeList`] into the
//! petgraph-based structures the metrics engine reads.
//!
//! ## Pipeline
//!
//! ```text
//! EdgeList (validated triples)
//!        ↓  build::AssistGraph::from_edges()
//! AssistGraph (DiGraph<String, u32>, weight = assists)
//!        ├─ cost::CostGraph::from_assists()   edge cost = 1 / assists
//!        └─ matrix::WeightMatrix::from_graph() from × to pivot
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use hoopnet_metrics::graph::{AssistGraph, CostGraph, WeightMatrix};
//!
//! let g = AssistGraph::from_edges(&edges);
//! let cost = CostGraph::from_assists(&g);
//! let matrix = WeightMatrix::from_graph(&g);
//! println!("players={} pairs={}", g.node_count(), g.edge_count());
//! ```

pub mod build;
pub mod cost;
pub mod matrix;

pub use build::AssistGraph;
pub use cost::CostGraph;
pub use matrix::WeightMatrix;

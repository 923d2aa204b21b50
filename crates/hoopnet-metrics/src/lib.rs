#![forbid(unsafe_code)]
//! hoopnet-metrics library.
//!
//! Builds the directed, weighted assist network and scores every player on
//! out-strength, in-strength, PageRank and betweenness.
//!
//! # Conventions
//!
//! - **Errors**: Use [`hoopnet_core::Result`] for fallible operations.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod export;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod table;

pub use graph::{AssistGraph, CostGraph, WeightMatrix};
pub use metrics::pagerank::PageRankConfig;
pub use pipeline::{Analysis, analyze};
pub use table::{MetricsTable, PlayerMetrics};

//! Player influence metrics over the assist network.
//!
//! # Overview
//!
//! Each metric answers a different question about a player:
//!
//! - **Strength** (`strength`): How many assists did the player hand out
//!   (out-strength) and receive (in-strength)?
//! - **PageRank** (`pagerank`): How much assist flow ends up at the player,
//!   counting who it came from?
//! - **Betweenness** (`betweenness`): How often does the player sit on the
//!   cheapest passing route between two teammates, where a link's cost is
//!   `1 / assists`?
//!
//! # Usage
//!
//! ```rust,ignore
//! use hoopnet_metrics::graph::{AssistGraph, CostGraph};
//! use hoopnet_metrics::metrics::{betweenness, pagerank, strength};
//!
//! let g = AssistGraph::from_edges(&edges);
//! let s = strength::strengths(&g);
//! let pr = pagerank::pagerank(&g, &pagerank::PageRankConfig::default())?;
//! let bc = betweenness::betweenness_centrality(&CostGraph::from_assists(&g), true);
//! ```

pub mod betweenness;
pub mod pagerank;
pub mod strength;

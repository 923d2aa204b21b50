#![forbid(unsafe_code)]
//! hoopnet-core library.
//!
//! Edge model, ingestion, configuration and error codes shared by the
//! metrics engine and the `hoopnet` binary.
//!
//! # Conventions
//!
//! - **Errors**: Library code returns [`Result`] with the typed [`Error`];
//!   the binary wraps it in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod csv_io;
pub mod dataset;
pub mod error;
pub mod model;
pub mod timing;

pub use dataset::{Dataset, GameInfo};
pub use error::{Error, ErrorCode, Result};
pub use model::{AssistEdge, EdgeList};

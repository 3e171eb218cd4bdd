//! Core types for modelling dependency relationships as a directed graph.
//!
//! Provides the graph container ([`graph::DirectedGraph`]), longest-path adjacency
//! levels with cycle detection ([`adjacency`]), JSON graph files, configuration,
//! and DOT/Mermaid export.

pub mod adjacency;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod storage;

pub use error::{GraphError, GraphResult};
pub use graph::DirectedGraph;

//! Read/write graph files from disk.
//!
//! A graph file is a JSON object mapping each vertex label to its ordered list
//! of targets, e.g. `{"A": ["C", "D"], "C": [], "D": []}`.

use crate::graph::DirectedGraph;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default graph file name, resolved against the project root.
pub const DEFAULT_GRAPH_FILE: &str = "depgraph.json";

/// Check if a graph file exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Serialize a graph to a pretty-printed JSON string.
pub fn to_json(graph: &DirectedGraph<String>) -> Result<String> {
    serde_json::to_string_pretty(graph).context("failed to serialize graph to JSON")
}

/// Deserialize a graph from a JSON string.
pub fn from_json(json: &str) -> Result<DirectedGraph<String>> {
    serde_json::from_str(json).context("failed to deserialize graph from JSON")
}

/// Load a graph from disk.
pub fn load(path: &Path) -> Result<DirectedGraph<String>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph from {}", path.display()))?;
    let graph = from_json(&json).with_context(|| format!("invalid graph file {}", path.display()))?;
    debug!(
        "loaded {} vertices, {} edges from {}",
        graph.vertex_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Save a graph to disk, creating parent directories if needed.
pub fn save(path: &Path, graph: &DirectedGraph<String>) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let mut json = to_json(graph)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write graph to {}", path.display()))?;
    debug!("saved {} vertices to {}", graph.vertex_count(), path.display());

    Ok(())
}

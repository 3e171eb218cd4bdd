//! Errors raised by graph traversals.

/// Errors from traversing a [`DirectedGraph`](crate::graph::DirectedGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The traversal reached a vertex with no entry in the adjacency map.
    #[error("unknown vertex {0}")]
    UnknownVertex(String),
    /// A directed cycle is reachable from the traversal root.
    ///
    /// Holds the ancestor path from the first occurrence of the repeated
    /// vertex down to the current vertex, followed by the repeated vertex.
    #[error("found circular reference {}", .0.join(" -> "))]
    CircularReference(Vec<String>),
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Whether this error reports a cycle rather than a malformed graph.
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularReference(_))
    }

    /// The vertices forming the reported cycle, first vertex repeated at the end.
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            Self::CircularReference(path) => Some(path),
            Self::UnknownVertex(_) => None,
        }
    }
}

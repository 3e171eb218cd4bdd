//! Longest-path adjacency levels with path-sensitive cycle detection.
//!
//! Starting from a root vertex, every reachable vertex is assigned the length of
//! the longest directed path from the root to it. Reconvergent (diamond) paths
//! are legal; only a vertex that reappears on the current ancestor path counts
//! as a cycle.

use crate::error::{GraphError, GraphResult};
use crate::graph::DirectedGraph;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use tracing::debug;

/// A vertex on the current path whose children are still being walked.
struct Frame<'a, T> {
    node: &'a T,
    level: usize,
    children: std::slice::Iter<'a, T>,
}

/// Traversal state for one depth-first walk.
///
/// The walk uses an explicit frame stack so path length is bounded by memory,
/// not by the call stack.
struct AdjacencyContext<'a, T> {
    edges: &'a HashMap<T, Vec<T>>,
    /// Best (longest) level recorded per vertex.
    levels: HashMap<T, usize>,
    /// Vertices on the current path, root first.
    path: Vec<Frame<'a, T>>,
    /// Index of each on-path vertex in `path`.
    on_path: HashMap<&'a T, usize>,
    /// Number of visits that improved a level and expanded children.
    expansions: usize,
}

impl<'a, T> AdjacencyContext<'a, T>
where
    T: Eq + Hash + Clone + Display,
{
    /// Visit `node` at `level`, pushing a frame only if the level improved.
    fn enter(&mut self, node: &'a T, level: usize) -> GraphResult<()> {
        let edges = self.edges;
        let children = edges
            .get(node)
            .ok_or_else(|| GraphError::UnknownVertex(node.to_string()))?;

        // A path no longer than one already explored has nothing new to propagate.
        if self.levels.get(node).is_none_or(|&best| best < level) {
            self.levels.insert(node.clone(), level);
            self.expansions += 1;
            self.on_path.insert(node, self.path.len());
            self.path.push(Frame {
                node,
                level,
                children: children.iter(),
            });
        }
        Ok(())
    }

    fn walk(&mut self, root: &'a T) -> GraphResult<()> {
        self.enter(root, 0)?;

        while let Some(frame) = self.path.last_mut() {
            let level = frame.level;
            match frame.children.next() {
                Some(child) => {
                    if let Some(&start) = self.on_path.get(child) {
                        let mut cycle: Vec<String> = self.path[start..]
                            .iter()
                            .map(|f| f.node.to_string())
                            .collect();
                        cycle.push(child.to_string());
                        return Err(GraphError::CircularReference(cycle));
                    }
                    self.enter(child, level + 1)?;
                }
                None => {
                    if let Some(done) = self.path.pop() {
                        self.on_path.remove(done.node);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T> DirectedGraph<T>
where
    T: Eq + Hash + Clone + Display,
{
    /// Compute the longest-path level of every vertex reachable from `root`.
    ///
    /// `root` is at level 0. Fails with [`GraphError::CircularReference`] as soon
    /// as a vertex is found among its own ancestors, and with
    /// [`GraphError::UnknownVertex`] if the traversal reaches a vertex that has no
    /// entry in the graph.
    ///
    /// # Example
    ///
    /// ```
    /// use depgraph_core::DirectedGraph;
    ///
    /// let graph: DirectedGraph<&str> =
    ///     [("root", "a"), ("a", "b"), ("root", "b")].into_iter().collect();
    /// let levels = graph.adjacency_to_node(&"root").unwrap();
    /// assert_eq!(levels[&"b"], 2);
    /// ```
    pub fn adjacency_to_node(&self, root: &T) -> GraphResult<HashMap<T, usize>> {
        let (root, _) = self
            .edges
            .get_key_value(root)
            .ok_or_else(|| GraphError::UnknownVertex(root.to_string()))?;

        let mut ctx = AdjacencyContext {
            edges: &self.edges,
            levels: HashMap::new(),
            path: Vec::new(),
            on_path: HashMap::new(),
            expansions: 0,
        };

        if let Err(err) = ctx.walk(root) {
            debug!("adjacency from {} failed: {}", root, err);
            return Err(err);
        }

        debug!(
            "adjacency from {}: {} reachable vertices, {} expansions",
            root,
            ctx.levels.len(),
            ctx.expansions
        );
        Ok(ctx.levels)
    }
}

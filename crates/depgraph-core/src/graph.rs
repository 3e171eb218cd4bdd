//! Adjacency-list graph container for dependency relationships.
//!
//! Vertices are arbitrary `Eq + Hash` labels. Each vertex owns an ordered list of
//! targets (its outgoing edges). Every vertex that is added explicitly or appears
//! as an edge endpoint has an entry, so there are no implicit vertices.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A directed graph stored as vertex → ordered targets.
///
/// Multi-edges and self-loops are accepted on insertion. Cycles are only
/// rejected by traversals such as
/// [`adjacency_to_node`](DirectedGraph::adjacency_to_node).
///
/// # Example
///
/// ```
/// use depgraph_core::DirectedGraph;
///
/// let mut graph = DirectedGraph::new();
/// graph.add_edge("A", "C");
/// graph.add_edge("A", "D");
/// graph.add_vertex("G");
///
/// assert_eq!(graph.leaves(), vec![&"C", &"D", &"G"]);
/// assert_eq!(graph.reverse().targets(&"C"), Some(&["A"][..]));
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<T> {
    /// Vertex → outgoing edge targets, in insertion order.
    pub(crate) edges: HashMap<T, Vec<T>>,
    /// First-seen order of vertices for deterministic iteration.
    insertion_order: Vec<T>,
}

impl<T> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self {
            edges: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> DirectedGraph<T> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a graph from an existing edge mapping.
    ///
    /// Keys are registered in iteration order with their targets copied verbatim.
    /// Targets that never appear as a key are registered afterwards as vertices
    /// with no outgoing edges.
    pub fn from_edges<I, J>(edges: I) -> Self
    where
        I: IntoIterator<Item = (T, J)>,
        J: IntoIterator<Item = T>,
    {
        let mut graph = Self::new();
        for (source, targets) in edges {
            graph.add_vertex(source).extend(targets);
        }

        let mut seen: HashSet<&T> = HashSet::new();
        let mut missing: Vec<T> = Vec::new();
        for vertex in &graph.insertion_order {
            for target in &graph.edges[vertex] {
                if !graph.edges.contains_key(target) && seen.insert(target) {
                    missing.push(target.clone());
                }
            }
        }
        for vertex in missing {
            graph.add_vertex(vertex);
        }
        graph
    }

    /// Ensure `vertex` has an entry and return its target list.
    ///
    /// Idempotent: existing edges of a known vertex are left untouched.
    pub fn add_vertex(&mut self, vertex: T) -> &mut Vec<T> {
        match self.edges.entry(vertex) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.insertion_order.push(entry.key().clone());
                entry.insert(Vec::new())
            }
        }
    }

    /// Add a directed edge, registering either endpoint if it is new.
    ///
    /// Repeated calls with the same pair produce parallel edges.
    pub fn add_edge(&mut self, source: T, target: T) {
        self.add_vertex(source.clone());
        self.add_vertex(target.clone());
        self.add_vertex(source).push(target);
    }

    /// Live, read-only view of the adjacency mapping.
    pub fn edges(&self) -> Edges<'_, T> {
        Edges { graph: self }
    }

    /// Outgoing targets of `vertex`, or `None` if it is not in the graph.
    pub fn targets(&self, vertex: &T) -> Option<&[T]> {
        self.edges.get(vertex).map(Vec::as_slice)
    }

    /// Whether `vertex` has an entry in the graph.
    pub fn contains_vertex(&self, vertex: &T) -> bool {
        self.edges.contains_key(vertex)
    }

    /// All vertices in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> {
        self.insertion_order.iter()
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of stored edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices with no outgoing edges, in first-seen order.
    pub fn leaves(&self) -> Vec<&T> {
        self.edges()
            .iter()
            .filter(|(_, targets)| targets.is_empty())
            .map(|(vertex, _)| vertex)
            .collect()
    }

    /// Copy the mapping and every target list.
    ///
    /// Vertex values are cloned with `T::clone`, so reference-like vertex types
    /// (`&str`, `Rc<_>`) still point at the same underlying data.
    #[must_use]
    pub fn shallow_clone(&self) -> Self {
        self.clone()
    }

    /// Build a new graph with every edge flipped.
    ///
    /// Every vertex of `self` is registered in the result, including those that
    /// end up with no outgoing edges.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::new();
        for (source, targets) in self.edges() {
            reversed.add_vertex(source.clone());
            for target in targets {
                reversed.add_edge(target.clone(), source.clone());
            }
        }
        reversed
    }
}

impl<T: Eq + Hash + Clone> FromIterator<(T, T)> for DirectedGraph<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<T: Eq + Hash + Clone> Extend<(T, T)> for DirectedGraph<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (source, target) in iter {
            self.add_edge(source, target);
        }
    }
}

/// Borrowed view over a graph's adjacency mapping.
///
/// Iterates `(vertex, targets)` pairs in first-seen vertex order.
#[derive(Debug)]
pub struct Edges<'a, T> {
    graph: &'a DirectedGraph<T>,
}

impl<T> Clone for Edges<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Edges<'_, T> {}

impl<'a, T: Eq + Hash> Edges<'a, T> {
    /// Targets of `vertex`, or `None` if it is not in the graph.
    pub fn get(&self, vertex: &T) -> Option<&'a [T]> {
        self.graph.edges.get(vertex).map(Vec::as_slice)
    }

    /// Whether `vertex` has an entry.
    pub fn contains_key(&self, vertex: &T) -> bool {
        self.graph.edges.contains_key(vertex)
    }

    /// Number of vertices in the mapping.
    pub fn len(&self) -> usize {
        self.graph.edges.len()
    }

    /// Whether the mapping has no vertices.
    pub fn is_empty(&self) -> bool {
        self.graph.edges.is_empty()
    }

    /// Vertices in first-seen order.
    pub fn keys(&self) -> std::slice::Iter<'a, T> {
        self.graph.insertion_order.iter()
    }

    /// `(vertex, targets)` pairs in first-seen order.
    pub fn iter(&self) -> EdgesIter<'a, T> {
        EdgesIter {
            order: self.graph.insertion_order.iter(),
            edges: &self.graph.edges,
        }
    }
}

impl<'a, T: Eq + Hash> IntoIterator for Edges<'a, T> {
    type Item = (&'a T, &'a [T]);
    type IntoIter = EdgesIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(vertex, targets)` pairs, see [`Edges::iter`].
#[derive(Debug, Clone)]
pub struct EdgesIter<'a, T> {
    order: std::slice::Iter<'a, T>,
    edges: &'a HashMap<T, Vec<T>>,
}

impl<'a, T: Eq + Hash> Iterator for EdgesIter<'a, T> {
    type Item = (&'a T, &'a [T]);

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.order.next()?;
        let targets = self.edges.get(vertex).map_or(&[][..], Vec::as_slice);
        Some((vertex, targets))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T: Eq + Hash> ExactSizeIterator for EdgesIter<'_, T> {}

impl<T> Serialize for DirectedGraph<T>
where
    T: Serialize + Eq + Hash + Clone,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.vertex_count()))?;
        for (vertex, targets) in self.edges() {
            map.serialize_entry(vertex, targets)?;
        }
        map.end()
    }
}

impl<'de, T> Deserialize<'de> for DirectedGraph<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GraphVisitor(PhantomData))
    }
}

struct GraphVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for GraphVisitor<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = DirectedGraph<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from vertex to a list of target vertices")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(T, Vec<T>)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((vertex, targets)) = access.next_entry()? {
            entries.push((vertex, targets));
        }
        Ok(DirectedGraph::from_edges(entries))
    }
}

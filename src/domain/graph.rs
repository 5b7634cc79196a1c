use indexmap::IndexMap;
use serde::Serialize;

/// Outgoing edge; the source is implied by the adjacency list it lives in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub to: String,
    pub weight: f64,
}

/// Directed, edge-weighted graph keyed by node identifier.
///
/// Node and edge insertion order is preserved and drives every traversal, so two
/// runs over the same graph always produce the same components, order and paths.
/// Every edge target is guaranteed to be a node of the graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: IndexMap<String, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` if it is not already present. Returns its dense index.
    pub fn add_node(&mut self, id: impl Into<String>) -> usize {
        let entry = self.adjacency.entry(id.into());
        let index = entry.index();
        entry.or_default();
        index
    }

    /// Appends an edge, creating either endpoint if needed.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) {
        let from = self.add_node(from);
        let to = to.into();
        self.add_node(to.clone());
        if let Some((_, edges)) = self.adjacency.get_index_mut(from) {
            edges.push(Edge { to, weight });
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.adjacency.get_index_of(id)
    }

    pub fn node_at(&self, index: usize) -> Option<&str> {
        self.adjacency.get_index(index).map(|(id, _)| id.as_str())
    }

    /// Node identifiers in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// Outgoing edges of `id`; empty for unknown nodes.
    pub fn edges(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges_at(&self, index: usize) -> &[Edge] {
        self.adjacency
            .get_index(index)
            .map(|(_, edges)| edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Strongly connected components in emission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SccResult {
    /// Each component lists its members in the order they were popped.
    pub components: Vec<Vec<String>>,
    /// True when the component contains a cycle (several members, or a self-loop).
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }
}

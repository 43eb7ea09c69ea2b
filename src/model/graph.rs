//! Directed graph with attribute maps on nodes, edges and the graph itself.

use hashbrown::HashMap;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::{AttrMap, NodeKey};

/// Node payload stored in the underlying petgraph graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub key: NodeKey,
    pub attrs: AttrMap,
}

/// A simple directed graph: unique nodes, at most one edge per ordered pair.
///
/// Adding a node or edge that already exists merges the new attributes into
/// the existing map (later writes win). Adding an edge creates any missing
/// endpoint. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: Option<String>,
    attrs: AttrMap,
    inner: DiGraph<GraphNode, AttrMap>,
    /// node key → petgraph index
    index: HashMap<NodeKey, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    /// Build a graph from an edge list, with no attributes.
    pub fn from_edges<I, K>(edges: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
        K: Into<NodeKey>,
    {
        let mut g = Self::new();
        for (u, v) in edges {
            g.add_edge(u, v, AttrMap::new());
        }
        g
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Graph-level attributes (e.g. `rankdir`).
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a node, or merge `attrs` into an existing one.
    pub fn add_node(&mut self, key: impl Into<NodeKey>, attrs: AttrMap) {
        let idx = self.ensure_node(key.into());
        self.inner[idx].attrs.extend(attrs);
    }

    /// Add the edge `u → v`, or merge `attrs` into the existing edge.
    pub fn add_edge(&mut self, u: impl Into<NodeKey>, v: impl Into<NodeKey>, attrs: AttrMap) {
        let src = self.ensure_node(u.into());
        let dst = self.ensure_node(v.into());
        match self.inner.find_edge(src, dst) {
            Some(e) => self.inner[e].extend(attrs),
            None => { self.inner.add_edge(src, dst, attrs); }
        }
    }

    fn ensure_node(&mut self, key: NodeKey) -> NodeIndex {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.inner.add_node(GraphNode { key: key.clone(), attrs: AttrMap::new() });
        self.index.insert(key, idx);
        idx
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn contains_edge(&self, u: &NodeKey, v: &NodeKey) -> bool {
        self.edge_attrs(u, v).is_some()
    }

    /// Nodes with their attributes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeKey, &AttrMap)> {
        self.inner.node_weights().map(|n| (&n.key, &n.attrs))
    }

    pub fn node_keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.inner.node_weights().map(|n| &n.key)
    }

    /// Edges as `(source, target, attrs)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeKey, &NodeKey, &AttrMap)> {
        self.inner.edge_references().map(|e| {
            (&self.inner[e.source()].key, &self.inner[e.target()].key, e.weight())
        })
    }

    pub fn node_attrs(&self, key: &NodeKey) -> Option<&AttrMap> {
        self.index.get(key).map(|&idx| &self.inner[idx].attrs)
    }

    pub fn edge_attrs(&self, u: &NodeKey, v: &NodeKey) -> Option<&AttrMap> {
        let src = *self.index.get(u)?;
        let dst = *self.index.get(v)?;
        self.inner.find_edge(src, dst).map(|e| &self.inner[e])
    }

    /// Mutable access to every edge's attribute map.
    pub fn edge_attrs_mut(&mut self) -> impl Iterator<Item = &mut AttrMap> {
        self.inner.edge_weights_mut()
    }

    /// True iff the graph has no directed cycle. A self-loop is a cycle.
    pub fn is_acyclic(&self) -> bool {
        !algo::is_cyclic_directed(&self.inner)
    }

    /// A topological ordering of the nodes, or `None` if the graph is cyclic.
    pub fn topological_order(&self) -> Option<Vec<&NodeKey>> {
        algo::toposort(&self.inner, None)
            .ok()
            .map(|order| order.into_iter().map(|idx| &self.inner[idx].key).collect())
    }
}

/// Structural equality: same name, graph attributes, nodes and edges in the
/// same insertion order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attrs == other.attrs
            && self.nodes().eq(other.nodes())
            && self.edges().eq(other.edges())
    }
}

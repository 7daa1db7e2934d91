//! Graph state captured at one time step

use crate::edge::Edge;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Nodes and edges of one snapshot
///
/// Edges may reference nodes that are not in the node set; the source data
/// is not required to be referentially consistent. `Clone` produces a fully
/// independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    nodes: BTreeSet<String>,
    edges: BTreeSet<Edge>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for node in nodes {
            self.add_node(node);
        }
        self
    }

    pub fn with_edges<I, A, B>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
        self
    }

    /// Add a node, returns false if it was already present
    pub fn add_node(&mut self, node: impl Into<String>) -> bool {
        self.nodes.insert(node.into())
    }

    /// Remove a node, returns false if it was not present
    pub fn remove_node(&mut self, node: &str) -> bool {
        self.nodes.remove(node)
    }

    /// Add an edge, returns false if an equal edge was already present
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> bool {
        self.edges.insert(Edge::new(from, to))
    }

    /// Remove an edge, returns false if it was not present
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        self.edges.remove(&Edge::new(from, to))
    }

    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges.contains(&Edge::new(from, to))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GraphState {
        GraphState::new()
            .with_nodes(["A", "B", "C"])
            .with_edges([("A", "B"), ("B", "C")])
    }

    #[test]
    fn test_add_and_remove() {
        let mut state = GraphState::new();

        assert!(state.add_node("A"));
        assert!(!state.add_node("A"));
        assert!(state.add_edge("A", "B"));
        assert!(!state.add_edge("a", "b"));
        assert_eq!(state.node_count(), 1);
        assert_eq!(state.edge_count(), 1);

        assert!(state.remove_edge("A", "B"));
        assert!(!state.remove_edge("A", "B"));
        assert!(state.remove_node("A"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_nodes_are_case_sensitive() {
        let state = GraphState::new().with_nodes(["Alice", "alice"]);
        assert_eq!(state.node_count(), 2);
    }

    #[test]
    fn test_edges_may_reference_unknown_nodes() {
        let state = GraphState::new().with_edges([("X", "Y")]);
        assert!(state.contains_edge("x", "y"));
        assert!(!state.contains_node("X"));
    }

    #[test]
    fn test_clone_is_equal_by_value() {
        let state = sample();
        let copy = state.clone();

        assert_eq!(copy.nodes(), state.nodes());
        assert_eq!(copy.edges(), state.edges());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = sample();
        let mut copy = original.clone();

        copy.add_node("D");
        copy.remove_edge("A", "B");
        assert!(!original.contains_node("D"));
        assert!(original.contains_edge("A", "B"));

        original.remove_node("C");
        original.add_edge("C", "A");
        assert!(copy.contains_node("C"));
        assert!(!copy.contains_edge("C", "A"));
    }
}

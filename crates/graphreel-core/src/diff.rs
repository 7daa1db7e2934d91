//! Diff engine: new nodes and edges between consecutive snapshots

use crate::edge::{fold, Edge};
use crate::state::GraphState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What to do with an edge whose two endpoints are both new in the same
/// incremental step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEdges {
    /// Emit the edge once, with the endpoint revealed last
    #[default]
    Suppress,
    /// Emit the edge once per new endpoint
    Allow,
}

impl std::str::FromStr for DuplicateEdges {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suppress" => Ok(Self::Suppress),
            "allow" => Ok(Self::Allow),
            other => Err(format!(
                "unknown duplicate edge policy '{}' (expected suppress or allow)",
                other
            )),
        }
    }
}

impl std::fmt::Display for DuplicateEdges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suppress => write!(f, "suppress"),
            Self::Allow => write!(f, "allow"),
        }
    }
}

/// A node revealed in a step together with the edges shown alongside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub node: String,
    pub edges: Vec<Edge>,
}

/// Everything introduced by one time step, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDiff {
    pub step: usize,
    pub reveals: Vec<Reveal>,
}

impl StepDiff {
    pub fn new_nodes(&self) -> Vec<&str> {
        self.reveals.iter().map(|r| r.node.as_str()).collect()
    }

    pub fn new_edges(&self) -> Vec<&Edge> {
        self.reveals.iter().flat_map(|r| r.edges.iter()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.reveals.iter().map(|r| r.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.reveals.is_empty()
    }
}

/// Computes the reveals for the first snapshot and for each later one
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    duplicates: DuplicateEdges,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicates(mut self, duplicates: DuplicateEdges) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Diff `current` against `previous`, or lay out `current` from scratch
    /// when there is no previous state.
    pub fn diff(&self, step: usize, previous: Option<&GraphState>, current: &GraphState) -> StepDiff {
        match previous {
            Some(previous) => self.incremental(step, previous, current),
            None => {
                let mut diff = self.initial_layout(current);
                diff.step = step;
                diff
            }
        }
    }

    /// Reveal every node of the first snapshot one at a time.
    ///
    /// A node joins the revealed set before its edges are examined, so each
    /// edge is emitted exactly once: with whichever endpoint is revealed
    /// last. Edges with an endpoint that is never revealed are not emitted.
    pub fn initial_layout(&self, current: &GraphState) -> StepDiff {
        let mut revealed: HashSet<String> = HashSet::new();
        let mut pending: Vec<&Edge> = current.edges().iter().collect();
        let mut reveals = Vec::with_capacity(current.node_count());

        for node in current.nodes() {
            revealed.insert(fold(node));

            let (ready, rest): (Vec<&Edge>, Vec<&Edge>) = pending.into_iter().partition(|edge| {
                edge.other_end(node)
                    .is_some_and(|other| revealed.contains(&fold(other)))
            });
            pending = rest;

            tracing::trace!("Revealing {} with {} edges", node, ready.len());
            reveals.push(Reveal {
                node: node.clone(),
                edges: ready.into_iter().cloned().collect(),
            });
        }

        if !pending.is_empty() {
            tracing::debug!(
                "{} edges reference nodes missing from the initial snapshot",
                pending.len()
            );
        }

        StepDiff { step: 0, reveals }
    }

    /// Reveal the nodes of `current` that are absent from `previous`.
    ///
    /// Under [`DuplicateEdges::Suppress`] an edge is emitted with the new
    /// endpoint that completes it: its other end is part of `previous` or was
    /// revealed earlier in this step. Edges whose other end never shows up are
    /// not emitted. Under [`DuplicateEdges::Allow`] every edge touching a new
    /// node is emitted with it, so an edge between two new nodes appears twice.
    pub fn incremental(&self, step: usize, previous: &GraphState, current: &GraphState) -> StepDiff {
        let mut present: HashSet<String> = previous.nodes().iter().map(|n| fold(n)).collect();
        let mut emitted: HashSet<&Edge> = HashSet::new();
        let mut reveals = Vec::new();

        for node in current.nodes().iter().filter(|n| !previous.contains_node(n)) {
            present.insert(fold(node));

            let edges: Vec<Edge> = current
                .edges()
                .iter()
                .filter(|edge| edge.touches(node))
                .filter(|edge| match self.duplicates {
                    DuplicateEdges::Allow => true,
                    DuplicateEdges::Suppress => {
                        edge.other_end(node)
                            .is_some_and(|other| present.contains(&fold(other)))
                            && emitted.insert(*edge)
                    }
                })
                .cloned()
                .collect();

            reveals.push(Reveal {
                node: node.clone(),
                edges,
            });
        }

        let diff = StepDiff { step, reveals };
        tracing::debug!(
            "Step {}: {} new nodes, {} new edges",
            step,
            diff.reveals.len(),
            diff.edge_count()
        );
        diff
    }
}

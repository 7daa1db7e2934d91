//! Events forwarded to rendering sinks

use crate::diff::StepDiff;
use crate::edge::Edge;
use serde::{Deserialize, Serialize};

/// A single change of the displayed graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GraphEvent {
    /// A time step starts
    StepBegin { step: usize },
    /// A node appears, highlighted as new
    AddNode { id: String },
    /// An edge appears, highlighted as new
    AddEdge { from: String, to: String },
    /// The node's "new" highlight is removed
    SettleNode { id: String },
    /// The edge's "new" highlight is removed
    SettleEdge { from: String, to: String },
}

impl GraphEvent {
    pub fn add_node(id: impl Into<String>) -> Self {
        Self::AddNode { id: id.into() }
    }

    pub fn add_edge(edge: &Edge) -> Self {
        Self::AddEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
        }
    }

    pub fn settle_node(id: impl Into<String>) -> Self {
        Self::SettleNode { id: id.into() }
    }

    pub fn settle_edge(edge: &Edge) -> Self {
        Self::SettleEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
        }
    }

    /// Whether this event adds an element to the graph
    pub fn is_addition(&self) -> bool {
        matches!(self, Self::AddNode { .. } | Self::AddEdge { .. })
    }
}

impl std::fmt::Display for GraphEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepBegin { step } => write!(f, "step {}", step),
            Self::AddNode { id } => write!(f, "add node {}", id),
            Self::AddEdge { from, to } => write!(f, "add edge {}-{}", from, to),
            Self::SettleNode { id } => write!(f, "settle node {}", id),
            Self::SettleEdge { from, to } => write!(f, "settle edge {}-{}", from, to),
        }
    }
}

impl StepDiff {
    /// Flatten the diff into sink events, without pacing.
    pub fn events(&self) -> Vec<GraphEvent> {
        let mut events = vec![GraphEvent::StepBegin { step: self.step }];
        for reveal in &self.reveals {
            events.push(GraphEvent::add_node(&reveal.node));
            for edge in &reveal.edges {
                events.push(GraphEvent::add_edge(edge));
                events.push(GraphEvent::settle_edge(edge));
            }
            events.push(GraphEvent::settle_node(&reveal.node));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Reveal;

    #[test]
    fn test_step_diff_events_order() {
        let diff = StepDiff {
            step: 2,
            reveals: vec![Reveal {
                node: "C".to_string(),
                edges: vec![Edge::new("B", "C")],
            }],
        };

        assert_eq!(
            diff.events(),
            vec![
                GraphEvent::StepBegin { step: 2 },
                GraphEvent::add_node("C"),
                GraphEvent::add_edge(&Edge::new("B", "C")),
                GraphEvent::settle_edge(&Edge::new("B", "C")),
                GraphEvent::settle_node("C"),
            ]
        );
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&GraphEvent::add_node("A")).unwrap();
        assert_eq!(json, r#"{"event":"add_node","id":"A"}"#);
    }
}

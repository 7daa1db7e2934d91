//! Run-wide deduplicated event log
//!
//! Every node and link of every snapshot is turned into an add instruction,
//! in snapshot order and then document order. An instruction is recorded
//! only the first time it occurs in the run; each recorded instruction gets
//! the next stamp, starting at 1.

use crate::edge::Edge;
use crate::error::Result;
use crate::event::GraphEvent;
use crate::sequence::SnapshotSequence;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An add instruction of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    AddNode { id: String },
    AddEdge { from: String, to: String },
}

impl Instruction {
    pub fn to_event(&self) -> GraphEvent {
        match self {
            Self::AddNode { id } => GraphEvent::AddNode { id: id.clone() },
            Self::AddEdge { from, to } => GraphEvent::AddEdge {
                from: from.clone(),
                to: to.clone(),
            },
        }
    }
}

/// A recorded instruction with its stamp and source time step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub stamp: u64,
    pub step: usize,
    pub instruction: Instruction,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    seen_nodes: HashSet<String>,
    seen_edges: HashSet<Edge>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the log from every snapshot of a sequence
    pub fn from_sequence(sequence: &SnapshotSequence) -> Result<Self> {
        let mut log = Self::new();
        for step in 0..sequence.len() {
            let path = sequence.path(step);
            let document = sequence.read_document(step)?;
            let edges = document.endpoints(&path)?;
            log.record_snapshot(step, document.node_names(), edges);
        }
        tracing::info!(
            "Event log holds {} instructions from {} snapshots",
            log.len(),
            sequence.len()
        );
        Ok(log)
    }

    /// Record one snapshot: nodes first, then links
    pub fn record_snapshot<'a, N, E, A, B>(&mut self, step: usize, nodes: N, edges: E)
    where
        N: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        for node in nodes {
            self.record_node(step, node);
        }
        for (from, to) in edges {
            self.record_edge(step, Edge::new(from, to));
        }
    }

    /// Returns false if the node was already logged
    pub fn record_node(&mut self, step: usize, id: &str) -> bool {
        if !self.seen_nodes.insert(id.to_string()) {
            return false;
        }
        self.push(
            step,
            Instruction::AddNode {
                id: id.to_string(),
            },
        );
        true
    }

    /// Returns false if an equal edge was already logged
    pub fn record_edge(&mut self, step: usize, edge: Edge) -> bool {
        if self.seen_edges.contains(&edge) {
            return false;
        }
        self.push(
            step,
            Instruction::AddEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
            },
        );
        self.seen_edges.insert(edge);
        true
    }

    fn push(&mut self, step: usize, instruction: Instruction) {
        let stamp = self.entries.len() as u64 + 1;
        tracing::trace!("Logged {:?} at stamp {}", instruction, stamp);
        self.entries.push(LogEntry {
            stamp,
            step,
            instruction,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sink events for the log, with a step boundary before each time step
    pub fn events(&self) -> Vec<GraphEvent> {
        let mut events = Vec::with_capacity(self.entries.len());
        let mut current_step = None;
        for entry in &self.entries {
            if current_step != Some(entry.step) {
                current_step = Some(entry.step);
                events.push(GraphEvent::StepBegin { step: entry.step });
            }
            events.push(entry.instruction.to_event());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(log: &EventLog, wanted: &Instruction) -> usize {
        log.entries()
            .iter()
            .filter(|e| &e.instruction == wanted)
            .count()
    }

    #[test]
    fn test_dedup_across_snapshots() {
        let mut log = EventLog::new();
        log.record_snapshot(0, ["A", "B"], [("A", "B")]);
        log.record_snapshot(1, ["A", "B", "C"], [("A", "B"), ("B", "C")]);

        let add_a = Instruction::AddNode { id: "A".into() };
        let add_ab = Instruction::AddEdge {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(count(&log, &add_a), 1);
        assert_eq!(count(&log, &add_ab), 1);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_stamps_are_sequential() {
        let mut log = EventLog::new();
        log.record_snapshot(0, ["A", "B"], [("A", "B")]);
        log.record_snapshot(1, ["C"], [("B", "C")]);

        let stamps: Vec<u64> = log.entries().iter().map(|e| e.stamp).collect();
        assert_eq!(stamps, vec![1, 2, 3, 4, 5]);
        assert_eq!(log.entries()[3].step, 1);
    }

    #[test]
    fn test_nodes_before_links_within_snapshot() {
        let mut log = EventLog::new();
        log.record_snapshot(0, ["B", "A"], [("A", "B")]);

        let ops: Vec<&Instruction> = log.entries().iter().map(|e| &e.instruction).collect();
        assert_eq!(ops[0], &Instruction::AddNode { id: "B".into() });
        assert_eq!(ops[1], &Instruction::AddNode { id: "A".into() });
        assert!(matches!(ops[2], Instruction::AddEdge { .. }));
    }

    #[test]
    fn test_edge_dedup_ignores_case_but_not_direction() {
        let mut log = EventLog::new();
        assert!(log.record_edge(0, Edge::new("A", "B")));
        assert!(!log.record_edge(1, Edge::new("a", "b")));
        assert!(log.record_edge(1, Edge::new("B", "A")));
    }

    #[test]
    fn test_events_insert_step_boundaries() {
        let mut log = EventLog::new();
        log.record_snapshot(0, ["A"], Vec::<(String, String)>::new());
        log.record_snapshot(1, ["A"], Vec::<(String, String)>::new());
        log.record_snapshot(2, ["B"], Vec::<(String, String)>::new());

        assert_eq!(
            log.events(),
            vec![
                GraphEvent::StepBegin { step: 0 },
                GraphEvent::add_node("A"),
                GraphEvent::StepBegin { step: 2 },
                GraphEvent::add_node("B"),
            ]
        );
    }

    #[test]
    fn test_from_sequence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("network0.json"),
            r#"{"nodes": [{"name": "A"}, {"name": "B"}], "links": [{"source": "A", "target": "B"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("network1.json"),
            r#"{"nodes": [{"name": "A"}, {"name": "B"}], "links": [{"source": "A", "target": "B"}]}"#,
        )
        .unwrap();

        let sequence = SnapshotSequence::discover(dir.path(), "network").unwrap();
        let log = EventLog::from_sequence(&sequence).unwrap();
        assert_eq!(log.len(), 3);
    }
}

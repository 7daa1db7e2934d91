//! Graphreel Core - Snapshot model and diff engine
//!
//! This crate provides the graph state types, the snapshot loader and the
//! diff logic that turns a sequence of graph snapshots into incremental
//! add-node / add-edge events.

pub mod config;
pub mod diff;
pub mod edge;
pub mod error;
pub mod event;
pub mod eventlog;
pub mod loader;
pub mod sequence;
pub mod state;

pub use config::{AnimationConfig, Quality, Resolution};
pub use diff::{DiffEngine, DuplicateEdges, Reveal, StepDiff};
pub use edge::Edge;
pub use error::{Error, Result};
pub use event::GraphEvent;
pub use eventlog::{EventLog, Instruction, LogEntry};
pub use loader::{load_snapshot, parse_snapshot};
pub use sequence::SnapshotSequence;
pub use state::GraphState;

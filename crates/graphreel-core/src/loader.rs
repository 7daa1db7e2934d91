//! Snapshot loader for node-link JSON documents
//!
//! A snapshot looks like:
//!
//! ```json
//! {"nodes": [{"name": "A"}, {"name": "B"}],
//!  "links": [{"source": "A", "target": "B"}]}
//! ```
//!
//! Link endpoints may be numbers or other scalars; they are coerced to their
//! textual form. Extra fields are ignored.

use crate::error::{Error, Result};
use crate::state::GraphState;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One node entry of a snapshot document
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub name: String,
}

/// One link entry of a snapshot document, endpoints as written
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    pub source: Value,
    pub target: Value,
}

/// A parsed snapshot document, in document order
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

impl SnapshotDocument {
    /// Links with coerced endpoints, in document order
    pub fn endpoints(&self, path: &Path) -> Result<Vec<(String, String)>> {
        self.links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let source = coerce_endpoint(&link.source).ok_or_else(|| Error::InvalidSnapshot {
                    path: path.to_path_buf(),
                    reason: format!("link {} has a non-scalar source", i),
                })?;
                let target = coerce_endpoint(&link.target).ok_or_else(|| Error::InvalidSnapshot {
                    path: path.to_path_buf(),
                    reason: format!("link {} has a non-scalar target", i),
                })?;
                Ok((source, target))
            })
            .collect()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    pub fn into_state(self, path: &Path) -> Result<GraphState> {
        let edges = self.endpoints(path)?;
        Ok(GraphState::new()
            .with_nodes(self.nodes.into_iter().map(|n| n.name))
            .with_edges(edges))
    }
}

/// Textual form of a link endpoint; arrays and objects are rejected
fn coerce_endpoint(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a snapshot document from a string. `path` is only used in errors.
pub fn parse_document(content: &str, path: &Path) -> Result<SnapshotDocument> {
    serde_json::from_str(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a snapshot document from disk
pub fn read_document(path: &Path) -> Result<SnapshotDocument> {
    if !path.exists() {
        return Err(Error::SnapshotNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content, path)
}

/// Parse a snapshot string straight into a graph state
pub fn parse_snapshot(content: &str, path: &Path) -> Result<GraphState> {
    parse_document(content, path)?.into_state(path)
}

/// Load one time step's graph state from disk
pub fn load_snapshot(path: &Path) -> Result<GraphState> {
    tracing::info!("Loading snapshot {}", path.display());
    let state = read_document(path)?.into_state(path)?;
    tracing::debug!(
        "Loaded {} nodes and {} edges from {}",
        state.node_count(),
        state.edge_count(),
        path.display()
    );
    Ok(state)
}

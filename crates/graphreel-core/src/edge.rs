//! Edge (link) type

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A directed link between two node identifiers.
///
/// Equality, hashing and ordering compare both endpoints case-insensitively
/// and in order: `A -> B` equals `a -> b` but not `B -> A`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Identifier used by sinks and event logs, `"<from>-<to>"`
    pub fn id(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    /// Whether `node` is either endpoint (case-insensitive)
    pub fn touches(&self, node: &str) -> bool {
        same_node(&self.from, node) || same_node(&self.to, node)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint
    pub fn other_end(&self, node: &str) -> Option<&str> {
        if same_node(&self.from, node) {
            Some(&self.to)
        } else if same_node(&self.to, node) {
            Some(&self.from)
        } else {
            None
        }
    }

    fn key(&self) -> (String, String) {
        (fold(&self.from), fold(&self.to))
    }
}

/// Case-insensitive comparison of two node identifiers
pub fn same_node(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}

/// Canonical (lowercased) form of a node identifier used for matching
pub fn fold(id: &str) -> String {
    id.to_lowercase()
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        same_node(&self.from, &other.from) && same_node(&self.to, &other.to)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

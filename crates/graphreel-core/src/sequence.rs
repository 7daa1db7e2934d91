//! Snapshot sequence: `<dir>/<prefix><N>.json` for N = 0..count

use crate::error::{Error, Result};
use crate::loader::{self, SnapshotDocument};
use crate::state::GraphState;
use std::path::PathBuf;

/// An ordered run of snapshot documents sharing a file prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSequence {
    dir: PathBuf,
    prefix: String,
    count: usize,
}

impl SnapshotSequence {
    /// A sequence of exactly `count` steps. Missing files surface when loaded.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, count: usize) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            count,
        }
    }

    /// Count contiguous snapshots starting at index 0.
    pub fn discover(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let mut sequence = Self::new(dir, prefix, 0);

        if !sequence.dir.is_dir() {
            return Err(Error::Io {
                path: sequence.dir.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        while sequence.path(sequence.count).is_file() {
            sequence.count += 1;
        }

        if sequence.count == 0 {
            return Err(Error::NoSnapshots {
                dir: sequence.dir,
                prefix: sequence.prefix,
            });
        }

        tracing::info!(
            "Found {} snapshots in {}",
            sequence.count,
            sequence.dir.display()
        );
        Ok(sequence)
    }

    /// Use `steps` when given, otherwise discover
    pub fn resolve(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        steps: Option<usize>,
    ) -> Result<Self> {
        match steps {
            Some(0) => Err(Error::Config("steps must be at least 1".to_string())),
            Some(count) => Ok(Self::new(dir, prefix, count)),
            None => Self::discover(dir, prefix),
        }
    }

    pub fn path(&self, step: usize) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.prefix, step))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn load(&self, step: usize) -> Result<GraphState> {
        loader::load_snapshot(&self.path(step))
    }

    pub fn read_document(&self, step: usize) -> Result<SnapshotDocument> {
        let path = self.path(step);
        tracing::info!("Reading snapshot {}", path.display());
        loader::read_document(&path)
    }
}

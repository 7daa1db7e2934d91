//! Graphreel Render - Sinks and the presentation driver
//!
//! This crate turns graph events into output: rendered frames, a DGS event
//! log, or an in-memory record. The [`Presenter`] walks a snapshot sequence
//! and feeds each step's diff into a sink at a human-visible pace.

pub mod driver;
pub mod error;
pub mod memory;
pub mod pacing;
pub mod traits;

#[cfg(feature = "dgs")]
pub mod dgs;

#[cfg(feature = "svg")]
pub mod svg;

pub use driver::{replay, Presenter, RunSummary};
pub use error::{RenderError, RenderResult};
pub use memory::MemorySink;
pub use pacing::{NoPacer, Pacer, Pause, SleepPacer};
pub use traits::RenderSink;

#[cfg(feature = "dgs")]
pub use dgs::{parse_dgs, DgsDocument, DgsSink};

#[cfg(feature = "svg")]
pub use svg::{FrameOptions, SvgFrameSink};

//! Rendering sink trait definition

use crate::error::RenderResult;
use async_trait::async_trait;
use graphreel_core::GraphEvent;

/// Consumer of graph events
///
/// A run calls `begin` once, `handle` for every event in order, then `end`.
/// If the run aborts, `end` is not called and the sink is dropped as is.
#[async_trait]
pub trait RenderSink: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Acquire output resources
    async fn begin(&mut self) -> RenderResult<()>;

    /// Apply one event
    async fn handle(&mut self, event: &GraphEvent) -> RenderResult<()>;

    /// Flush and release output resources
    async fn end(&mut self) -> RenderResult<()>;
}

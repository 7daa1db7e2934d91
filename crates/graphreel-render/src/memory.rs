//! In-memory sink for testing

use crate::error::{RenderError, RenderResult};
use crate::traits::RenderSink;
use async_trait::async_trait;
use graphreel_core::GraphEvent;

/// Records every event it receives
///
/// Useful for testing and for inspecting what a run would emit.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<GraphEvent>,
    begun: bool,
    ended: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    pub fn is_begun(&self) -> bool {
        self.begun
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Only the add events, in order
    pub fn additions(&self) -> Vec<&GraphEvent> {
        self.events.iter().filter(|e| e.is_addition()).collect()
    }
}

#[async_trait]
impl RenderSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn begin(&mut self) -> RenderResult<()> {
        self.begun = true;
        Ok(())
    }

    async fn handle(&mut self, event: &GraphEvent) -> RenderResult<()> {
        if !self.begun || self.ended {
            return Err(RenderError::Sink(format!(
                "event '{}' outside of begin/end",
                event
            )));
        }
        self.events.push(event.clone());
        Ok(())
    }

    async fn end(&mut self) -> RenderResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_events() {
        let mut sink = MemorySink::new();
        sink.begin().await.unwrap();
        sink.handle(&GraphEvent::add_node("A")).await.unwrap();
        sink.handle(&GraphEvent::settle_node("A")).await.unwrap();
        sink.end().await.unwrap();

        assert!(sink.is_ended());
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.additions(), vec![&GraphEvent::add_node("A")]);
    }

    #[tokio::test]
    async fn test_rejects_events_outside_begin_end() {
        let mut sink = MemorySink::new();
        assert!(!sink.is_begun());
        assert!(sink.handle(&GraphEvent::add_node("A")).await.is_err());

        sink.begin().await.unwrap();
        assert!(sink.is_begun());
        sink.end().await.unwrap();
        assert!(sink.handle(&GraphEvent::add_node("A")).await.is_err());
    }
}

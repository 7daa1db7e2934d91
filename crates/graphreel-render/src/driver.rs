//! Presentation driver
//!
//! Walks the time steps in order: the first snapshot is laid out node by
//! node, every later snapshot is diffed against its predecessor. Each reveal
//! is forwarded to the sink as
//!
//! ```text
//! AddNode(n), pause
//! for each edge e: AddEdge(e), pause, SettleEdge(e)
//! SettleNode(n)
//! ```
//!
//! preceded by one `StepBegin` per time step.

use crate::error::RenderResult;
use crate::pacing::{Pacer, Pause};
use crate::traits::RenderSink;
use graphreel_core::{DiffEngine, GraphEvent, GraphState, SnapshotSequence, StepDiff};
use serde::Serialize;

/// Totals of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub nodes_added: usize,
    pub edges_added: usize,
    pub events: usize,
}

pub struct Presenter<P> {
    engine: DiffEngine,
    pacer: P,
}

impl<P: Pacer> Presenter<P> {
    pub fn new(engine: DiffEngine, pacer: P) -> Self {
        Self { engine, pacer }
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Load and present every snapshot of `sequence`.
    ///
    /// The first failing snapshot aborts the run; whatever the sink already
    /// produced is left in place.
    pub async fn run<S>(&self, sequence: &SnapshotSequence, sink: &mut S) -> RenderResult<RunSummary>
    where
        S: RenderSink + ?Sized,
    {
        tracing::info!(
            "Presenting {} snapshots through the {} sink",
            sequence.len(),
            sink.name()
        );
        let mut summary = RunSummary::default();
        let mut previous: Option<GraphState> = None;

        sink.begin().await?;
        for step in 0..sequence.len() {
            if step > 0 {
                self.pacer.pause(Pause::Step).await;
            }
            let current = sequence.load(step)?;
            self.advance(step, previous.as_ref(), &current, sink, &mut summary)
                .await?;
            previous = Some(current);
        }
        sink.end().await?;

        tracing::info!(
            "Presented {} steps: {} nodes, {} edges",
            summary.steps,
            summary.nodes_added,
            summary.edges_added
        );
        Ok(summary)
    }

    /// Present snapshots that are already in memory
    pub async fn run_states<S>(&self, states: &[GraphState], sink: &mut S) -> RenderResult<RunSummary>
    where
        S: RenderSink + ?Sized,
    {
        let mut summary = RunSummary::default();

        sink.begin().await?;
        for (step, current) in states.iter().enumerate() {
            if step > 0 {
                self.pacer.pause(Pause::Step).await;
            }
            let previous = step.checked_sub(1).map(|i| &states[i]);
            self.advance(step, previous, current, sink, &mut summary)
                .await?;
        }
        sink.end().await?;

        Ok(summary)
    }

    async fn advance<S>(
        &self,
        step: usize,
        previous: Option<&GraphState>,
        current: &GraphState,
        sink: &mut S,
        summary: &mut RunSummary,
    ) -> RenderResult<()>
    where
        S: RenderSink + ?Sized,
    {
        let diff = self.engine.diff(step, previous, current);
        self.present(&diff, sink, summary).await?;
        summary.steps += 1;
        Ok(())
    }

    /// Emit one step's reveals with pacing
    pub async fn present<S>(
        &self,
        diff: &StepDiff,
        sink: &mut S,
        summary: &mut RunSummary,
    ) -> RenderResult<()>
    where
        S: RenderSink + ?Sized,
    {
        emit(GraphEvent::StepBegin { step: diff.step }, sink, summary).await?;

        for reveal in &diff.reveals {
            tracing::debug!(
                "Step {}: revealing {} with {} edges",
                diff.step,
                reveal.node,
                reveal.edges.len()
            );
            emit(GraphEvent::add_node(&reveal.node), sink, summary).await?;
            summary.nodes_added += 1;
            self.pacer.pause(Pause::Reveal).await;

            for edge in &reveal.edges {
                emit(GraphEvent::add_edge(edge), sink, summary).await?;
                summary.edges_added += 1;
                self.pacer.pause(Pause::Reveal).await;
                emit(GraphEvent::settle_edge(edge), sink, summary).await?;
            }

            emit(GraphEvent::settle_node(&reveal.node), sink, summary).await?;
        }
        Ok(())
    }
}

/// Feed a recorded event stream (e.g. a parsed DGS log) to the sink.
///
/// Additions are paced and settled like live reveals; step boundaries after
/// the first pause for the step delay.
pub async fn replay<P, S>(pacer: &P, events: &[GraphEvent], sink: &mut S) -> RenderResult<RunSummary>
where
    P: Pacer + ?Sized,
    S: RenderSink + ?Sized,
{
    let mut summary = RunSummary::default();

    sink.begin().await?;
    for event in events {
        match event {
            GraphEvent::StepBegin { .. } => {
                if summary.steps > 0 {
                    pacer.pause(Pause::Step).await;
                }
                summary.steps += 1;
                emit(event.clone(), sink, &mut summary).await?;
            }
            GraphEvent::AddNode { id } => {
                summary.nodes_added += 1;
                emit(event.clone(), sink, &mut summary).await?;
                pacer.pause(Pause::Reveal).await;
                emit(GraphEvent::settle_node(id), sink, &mut summary).await?;
            }
            GraphEvent::AddEdge { from, to } => {
                summary.edges_added += 1;
                emit(event.clone(), sink, &mut summary).await?;
                pacer.pause(Pause::Reveal).await;
                let settle = GraphEvent::SettleEdge {
                    from: from.clone(),
                    to: to.clone(),
                };
                emit(settle, sink, &mut summary).await?;
            }
            GraphEvent::SettleNode { .. } | GraphEvent::SettleEdge { .. } => {
                emit(event.clone(), sink, &mut summary).await?;
            }
        }
    }
    sink.end().await?;

    Ok(summary)
}

async fn emit<S>(event: GraphEvent, sink: &mut S, summary: &mut RunSummary) -> RenderResult<()>
where
    S: RenderSink + ?Sized,
{
    sink.handle(&event).await?;
    summary.events += 1;
    Ok(())
}

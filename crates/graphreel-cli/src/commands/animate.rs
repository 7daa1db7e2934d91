//! Animate command: snapshots to frames

use clap::Args;
use graphreel_core::{AnimationConfig, DiffEngine, DuplicateEdges, SnapshotSequence};
use graphreel_render::{
    FrameOptions, NoPacer, Presenter, RenderSink, RunSummary, SleepPacer, SvgFrameSink,
};

use super::{resolve_sequence, FrameArgs, InputArgs};
use crate::output::print_output;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub frames: FrameArgs,

    /// Edges whose endpoints are both new: suppress or allow repeats
    #[arg(long)]
    pub duplicate_edges: Option<DuplicateEdges>,
}

pub async fn run(args: &AnimateArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let mut config = ctx.config.animation.clone();
    args.input.apply(&mut config);
    args.frames.apply(&mut config);
    if let Some(policy) = args.duplicate_edges {
        config.duplicate_edges = policy;
    }

    let sequence = resolve_sequence(&config)?;
    let mut sink = SvgFrameSink::new(&config.output_prefix, FrameOptions::from_config(&config));
    let summary = present(&config, args.frames.no_delay, &sequence, &mut sink).await?;

    if !cli.quiet {
        print_output(&summary, cli.output_format(), |s| {
            format!(
                "Rendered {} frames from {} snapshots ({} nodes, {} edges) to {}*",
                sink.frames_written(),
                s.steps,
                s.nodes_added,
                s.edges_added,
                config.output_prefix.display()
            )
        })?;
    }
    Ok(())
}

/// Drive `sink` through the sequence with the configured pacing
pub async fn present<S>(
    config: &AnimationConfig,
    no_delay: bool,
    sequence: &SnapshotSequence,
    sink: &mut S,
) -> anyhow::Result<RunSummary>
where
    S: RenderSink + ?Sized,
{
    let engine = DiffEngine::new().with_duplicates(config.duplicate_edges);
    let summary = if no_delay {
        Presenter::new(engine, NoPacer).run(sequence, sink).await?
    } else {
        Presenter::new(engine, SleepPacer::from_config(config))
            .run(sequence, sink)
            .await?
    };
    Ok(summary)
}

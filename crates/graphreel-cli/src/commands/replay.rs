//! Replay command: DGS event log to frames

use std::path::PathBuf;

use clap::Args;
use graphreel_render::{parse_dgs, replay, FrameOptions, NoPacer, SleepPacer, SvgFrameSink};

use super::FrameArgs;
use crate::output::print_output;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ReplayArgs {
    /// DGS file to replay (default: event_log from config)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub frames: FrameArgs,
}

pub async fn run(args: &ReplayArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let mut config = ctx.config.animation.clone();
    args.frames.apply(&mut config);
    let file = args.file.clone().unwrap_or_else(|| config.event_log.clone());

    tracing::info!("Replaying {:?}", file);
    let content = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", file.display(), e))?;
    let document = parse_dgs(&content)?;

    let mut sink = SvgFrameSink::new(&config.output_prefix, FrameOptions::from_config(&config));
    let summary = if args.frames.no_delay {
        replay(&NoPacer, &document.events, &mut sink).await?
    } else {
        replay(&SleepPacer::from_config(&config), &document.events, &mut sink).await?
    };

    if !cli.quiet {
        print_output(&summary, cli.output_format(), |s| {
            format!(
                "Rendered {} frames from '{}' ({} nodes, {} edges) to {}*",
                sink.frames_written(),
                document.graph_name,
                s.nodes_added,
                s.edges_added,
                config.output_prefix.display()
            )
        })?;
    }
    Ok(())
}

//! Convert command: snapshots to a DGS event log

use std::path::PathBuf;

use clap::Args;
use graphreel_core::EventLog;
use graphreel_render::{DgsSink, RenderSink};
use serde::Serialize;

use super::{animate, resolve_sequence, InputArgs};
use crate::output::print_output;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: event_log from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graph name written in the log header
    #[arg(long)]
    pub graph_name: Option<String>,

    /// Log the animation's reveal order instead of document order
    #[arg(long)]
    pub diff_order: bool,
}

#[derive(Debug, Serialize)]
struct ConvertSummary {
    output: PathBuf,
    snapshots: usize,
    instructions: u64,
}

pub async fn run(args: &ConvertArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let mut config = ctx.config.animation.clone();
    args.input.apply(&mut config);
    if let Some(output) = &args.output {
        config.event_log = output.clone();
    }
    if let Some(name) = &args.graph_name {
        config.graph_name = name.clone();
    }

    let sequence = resolve_sequence(&config)?;
    let mut sink = DgsSink::create(&config.event_log, &config.graph_name)?;

    if args.diff_order {
        animate::present(&config, true, &sequence, &mut sink).await?;
    } else {
        let log = EventLog::from_sequence(&sequence)?;
        sink.begin().await?;
        for event in log.events() {
            sink.handle(&event).await?;
        }
        sink.end().await?;
    }

    let summary = ConvertSummary {
        output: config.event_log.clone(),
        snapshots: sequence.len(),
        instructions: sink.written(),
    };

    if !cli.quiet {
        print_output(&summary, cli.output_format(), |s| {
            format!(
                "Wrote {} events from {} snapshots to {}",
                s.instructions,
                s.snapshots,
                s.output.display()
            )
        })?;
    }
    Ok(())
}

//! Diff command: inspect what a snapshot introduces

use std::path::PathBuf;

use clap::Args;
use graphreel_core::{load_snapshot, DiffEngine, DuplicateEdges, StepDiff};

use crate::output::print_output;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot to lay out, or the earlier snapshot when SECOND is given
    pub first: PathBuf,

    /// Later snapshot to diff against FIRST
    pub second: Option<PathBuf>,

    /// Edges whose endpoints are both new: suppress or allow repeats
    #[arg(long)]
    pub duplicate_edges: Option<DuplicateEdges>,
}

pub fn run(args: &DiffArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let policy = args
        .duplicate_edges
        .unwrap_or(ctx.config.animation.duplicate_edges);
    let engine = DiffEngine::new().with_duplicates(policy);

    let first = load_snapshot(&args.first)?;
    let diff = match &args.second {
        Some(second) => engine.incremental(1, &first, &load_snapshot(second)?),
        None => engine.initial_layout(&first),
    };

    print_output(&diff, cli.output_format(), format_table)
}

fn format_table(diff: &StepDiff) -> String {
    if diff.is_empty() {
        return "No new nodes".to_string();
    }

    let mut out = String::new();
    for reveal in &diff.reveals {
        out.push_str(&format!("+ node {}\n", reveal.node));
        for edge in &reveal.edges {
            out.push_str(&format!("  + edge {}\n", edge));
        }
    }
    out.push_str(&format!(
        "\n{} nodes, {} edges",
        diff.reveals.len(),
        diff.edge_count()
    ));
    out
}

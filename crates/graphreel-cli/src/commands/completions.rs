//! Shell completions command

use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

pub fn run(args: &CompletionsArgs) -> anyhow::Result<()> {
    tracing::debug!("Generating {} completions", args.shell);
    write_completions(args.shell, &mut io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    generate(shell, &mut Cli::command(), "graphreel", out);
}

//! CLI command implementations

use std::path::PathBuf;

use clap::Args;
use graphreel_core::{AnimationConfig, Quality, Resolution, SnapshotSequence};

pub mod animate;
pub mod completions;
pub mod config;
pub mod convert;
pub mod diff;
pub mod replay;

/// Where to find the snapshot documents
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Folder holding the snapshot documents
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Snapshot file prefix (files are <prefix><N>.json)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Number of time steps (default: count the files)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,
}

impl InputArgs {
    pub fn apply(&self, config: &mut AnimationConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if self.steps.is_some() {
            config.steps = self.steps;
        }
    }
}

/// How rendered frames look and where they go
#[derive(Args, Debug, Clone, Default)]
pub struct FrameArgs {
    /// Frame path prefix (frames are <prefix>NNNNNN.svg)
    #[arg(short, long)]
    pub output_prefix: Option<PathBuf>,

    /// Resolution: vga, svga, hd720, hd1080 or WxH
    #[arg(short, long)]
    pub resolution: Option<Resolution>,

    /// Quality: low, medium, high
    #[arg(long)]
    pub quality: Option<Quality>,

    /// Image overlaid on every frame
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Pause after each node or edge, in milliseconds
    #[arg(long)]
    pub reveal_delay_ms: Option<u64>,

    /// Pause between snapshots, in milliseconds
    #[arg(long)]
    pub step_delay_ms: Option<u64>,

    /// Do not pause at all
    #[arg(long)]
    pub no_delay: bool,
}

impl FrameArgs {
    pub fn apply(&self, config: &mut AnimationConfig) {
        if let Some(prefix) = &self.output_prefix {
            config.output_prefix = prefix.clone();
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(logo) = &self.logo {
            config.logo = Some(logo.clone());
        }
        if let Some(ms) = self.reveal_delay_ms {
            config.reveal_delay_ms = ms;
        }
        if let Some(ms) = self.step_delay_ms {
            config.step_delay_ms = ms;
        }
    }
}

pub fn resolve_sequence(config: &AnimationConfig) -> anyhow::Result<SnapshotSequence> {
    Ok(SnapshotSequence::resolve(
        &config.input_dir,
        &config.prefix,
        config.steps,
    )?)
}

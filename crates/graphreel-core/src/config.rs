//! Animation configuration
//!
//! Defaults reproduce the values the tool has always used: 720p frames,
//! high quality, 500 ms per reveal and one second between snapshots.

use crate::diff::DuplicateEdges;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Frame resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Resolution {
    Vga,
    Svga,
    #[default]
    Hd720,
    Hd1080,
    Custom { width: u32, height: u32 },
}

impl Resolution {
    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Vga => (640, 480),
            Self::Svga => (800, 600),
            Self::Hd720 => (1280, 720),
            Self::Hd1080 => (1920, 1080),
            Self::Custom { width, height } => (*width, *height),
        }
    }
}

impl std::str::FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vga" => Ok(Self::Vga),
            "svga" => Ok(Self::Svga),
            "hd720" | "720p" => Ok(Self::Hd720),
            "hd1080" | "1080p" => Ok(Self::Hd1080),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| format!("unknown resolution '{}'", s))?;
                let width: u32 = w.parse().map_err(|_| format!("invalid width in '{}'", s))?;
                let height: u32 = h.parse().map_err(|_| format!("invalid height in '{}'", s))?;
                if width == 0 || height == 0 {
                    return Err(format!("resolution '{}' has a zero dimension", s));
                }
                Ok(Self::Custom { width, height })
            }
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vga => write!(f, "vga"),
            Self::Svga => write!(f, "svga"),
            Self::Hd720 => write!(f, "hd720"),
            Self::Hd1080 => write!(f, "hd1080"),
            Self::Custom { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> Self {
        r.to_string()
    }
}

/// Rendering quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown quality '{}' (expected low, medium or high)", other)),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Everything a run needs to know about inputs, outputs and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Folder holding the snapshot documents
    pub input_dir: PathBuf,

    /// File prefix of the snapshot documents
    pub prefix: String,

    /// Number of time steps (None = count the files)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,

    /// Path prefix of rendered frames
    pub output_prefix: PathBuf,

    /// Output path of the event log
    pub event_log: PathBuf,

    /// Graph name written in the event log header
    pub graph_name: String,

    pub resolution: Resolution,

    pub quality: Quality,

    /// Pause after each node or edge reveal
    pub reveal_delay_ms: u64,

    /// Pause before each snapshot after the first
    pub step_delay_ms: u64,

    /// Image overlaid on every frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,

    pub duplicate_edges: DuplicateEdges,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("networkEvolution"),
            prefix: "network".to_string(),
            steps: None,
            output_prefix: PathBuf::from("movie/images/image"),
            event_log: PathBuf::from("network.dgs"),
            graph_name: "NetworkEvolution".to_string(),
            resolution: Resolution::default(),
            quality: Quality::default(),
            reveal_delay_ms: 500,
            step_delay_ms: 1000,
            logo: None,
            duplicate_edges: DuplicateEdges::default(),
        }
    }
}

impl AnimationConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Names accepted by [`get`](Self::get) and [`set`](Self::set)
    pub fn keys() -> &'static [&'static str] {
        &[
            "input_dir",
            "prefix",
            "steps",
            "output_prefix",
            "event_log",
            "graph_name",
            "resolution",
            "quality",
            "reveal_delay_ms",
            "step_delay_ms",
            "logo",
            "duplicate_edges",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "input_dir" => self.input_dir.display().to_string(),
            "prefix" => self.prefix.clone(),
            "steps" => self.steps?.to_string(),
            "output_prefix" => self.output_prefix.display().to_string(),
            "event_log" => self.event_log.display().to_string(),
            "graph_name" => self.graph_name.clone(),
            "resolution" => self.resolution.to_string(),
            "quality" => self.quality.to_string(),
            "reveal_delay_ms" => self.reveal_delay_ms.to_string(),
            "step_delay_ms" => self.step_delay_ms.to_string(),
            "logo" => self.logo.as_ref()?.display().to_string(),
            "duplicate_edges" => self.duplicate_edges.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a key from its textual form. Empty values clear optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| Error::Config(format!("{}: {}", key, reason));
        match key {
            "input_dir" => self.input_dir = PathBuf::from(value),
            "prefix" => self.prefix = value.to_string(),
            "steps" => {
                self.steps = if value.is_empty() {
                    None
                } else {
                    let steps: usize = value.parse().map_err(|e| invalid(format!("{}", e)))?;
                    if steps == 0 {
                        return Err(invalid("must be at least 1".to_string()));
                    }
                    Some(steps)
                }
            }
            "output_prefix" => self.output_prefix = PathBuf::from(value),
            "event_log" => self.event_log = PathBuf::from(value),
            "graph_name" => self.graph_name = value.to_string(),
            "resolution" => self.resolution = value.parse().map_err(invalid)?,
            "quality" => self.quality = value.parse().map_err(invalid)?,
            "reveal_delay_ms" => {
                self.reveal_delay_ms = value.parse().map_err(|e| invalid(format!("{}", e)))?
            }
            "step_delay_ms" => {
                self.step_delay_ms = value.parse().map_err(|e| invalid(format!("{}", e)))?
            }
            "logo" => {
                self.logo = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "duplicate_edges" => self.duplicate_edges = value.parse().map_err(invalid)?,
            _ => return Err(Error::Config(format!("unknown key '{}'", key))),
        }
        Ok(())
    }
}

//! SVG frame sink
//!
//! Writes one frame per visible change to `<prefix>NNNNNN.svg`. The layout
//! is recomputed for every frame: nodes sit on a circle in sorted order.
//! Elements added by the most recent events keep a "new" highlight until
//! their settle event arrives.

use crate::error::{RenderError, RenderResult};
use crate::traits::RenderSink;
use async_trait::async_trait;
use graphreel_core::edge::fold;
use graphreel_core::{AnimationConfig, Edge, GraphEvent, Quality, Resolution};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

const PADDING: f64 = 50.0;
const NODE_RADIUS: f64 = 8.0;
const NEW_NODE_RADIUS: f64 = 12.0;
const LOGO_OFFSET: u32 = 10;

/// Frame appearance settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameOptions {
    pub resolution: Resolution,
    pub quality: Quality,
    pub logo: Option<PathBuf>,
}

impl FrameOptions {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            resolution: config.resolution,
            quality: config.quality,
            logo: config.logo.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct FrameEdge {
    from: String,
    to: String,
    fresh: bool,
}

pub struct SvgFrameSink {
    prefix: PathBuf,
    options: FrameOptions,
    logo_href: Option<String>,
    /// node id -> highlighted
    nodes: BTreeMap<String, bool>,
    /// folded node id -> node id
    lookup: BTreeMap<String, String>,
    edges: BTreeMap<Edge, FrameEdge>,
    frames: usize,
}

impl SvgFrameSink {
    pub fn new(prefix: impl Into<PathBuf>, options: FrameOptions) -> Self {
        Self {
            prefix: prefix.into(),
            options,
            logo_href: None,
            nodes: BTreeMap::new(),
            lookup: BTreeMap::new(),
            edges: BTreeMap::new(),
            frames: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        let mut name = self.prefix.clone().into_os_string();
        name.push(format!("{:06}.svg", index));
        PathBuf::from(name)
    }

    /// Canonical id of an existing node, matched case-insensitively
    fn resolve(&self, id: &str) -> Option<String> {
        if self.nodes.contains_key(id) {
            return Some(id.to_string());
        }
        self.lookup.get(&fold(id)).cloned()
    }

    /// Apply an event to the model; returns whether the picture changed
    fn apply(&mut self, event: &GraphEvent) -> bool {
        match event {
            GraphEvent::StepBegin { step } => {
                tracing::debug!("svg: step {} begins at frame {}", step, self.frames);
                false
            }
            GraphEvent::AddNode { id } => {
                if self.nodes.contains_key(id) {
                    tracing::warn!("svg: node '{}' already exists, ignoring", id);
                    return false;
                }
                self.nodes.insert(id.clone(), true);
                self.lookup.entry(fold(id)).or_insert_with(|| id.clone());
                true
            }
            GraphEvent::AddEdge { from, to } => {
                let edge = Edge::new(from.as_str(), to.as_str());
                if self.edges.contains_key(&edge) {
                    tracing::warn!("svg: edge '{}' already exists, ignoring", edge);
                    return false;
                }
                let (Some(from), Some(to)) = (self.resolve(from), self.resolve(to)) else {
                    tracing::warn!("svg: edge '{}' references a missing node, ignoring", edge);
                    return false;
                };
                self.edges.insert(
                    edge,
                    FrameEdge {
                        from,
                        to,
                        fresh: true,
                    },
                );
                true
            }
            GraphEvent::SettleNode { id } => match self.nodes.get_mut(id) {
                Some(fresh) if *fresh => {
                    *fresh = false;
                    true
                }
                _ => false,
            },
            GraphEvent::SettleEdge { from, to } => {
                match self.edges.get_mut(&Edge::new(from.as_str(), to.as_str())) {
                    Some(edge) if edge.fresh => {
                        edge.fresh = false;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn layout(&self) -> BTreeMap<&str, (f64, f64)> {
        let (width, height) = self.options.resolution.dimensions();
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let radius = (cx.min(cy) - PADDING).max(0.0);
        let count = self.nodes.len();

        self.nodes
            .keys()
            .enumerate()
            .map(|(i, id)| {
                let position = if count == 1 {
                    (cx, cy)
                } else {
                    let angle = 2.0 * PI * i as f64 / count as f64 - PI / 2.0;
                    (cx + radius * angle.cos(), cy + radius * angle.sin())
                };
                (id.as_str(), position)
            })
            .collect()
    }

    /// Render the current model as an SVG document
    pub fn render(&self) -> String {
        let (width, height) = self.options.resolution.dimensions();
        let shape_rendering = match self.options.quality {
            Quality::Low => "crispEdges",
            Quality::Medium => "auto",
            Quality::High => "geometricPrecision",
        };
        let positions = self.layout();
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" shape-rendering=\"{s}\">\n",
            w = width,
            h = height,
            s = shape_rendering
        ));
        svg.push_str(&format!(
            "  <rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            width, height
        ));

        for edge in self.edges.values() {
            let (Some(&(x1, y1)), Some(&(x2, y2))) =
                (positions.get(edge.from.as_str()), positions.get(edge.to.as_str()))
            else {
                continue;
            };
            let (stroke, stroke_width) = if edge.fresh { ("#d62728", 3) } else { ("#999999", 1) };
            svg.push_str(&format!(
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                x1, y1, x2, y2, stroke, stroke_width
            ));
        }

        for (id, fresh) in &self.nodes {
            let Some(&(x, y)) = positions.get(id.as_str()) else {
                continue;
            };
            let (fill, radius) = if *fresh {
                ("#d62728", NEW_NODE_RADIUS)
            } else {
                ("#1f1f1f", NODE_RADIUS)
            };
            svg.push_str(&format!(
                "  <circle class=\"{}\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\"/>\n",
                if *fresh { "node new" } else { "node" },
                x,
                y,
                radius,
                fill
            ));
            if self.options.quality != Quality::Low {
                svg.push_str(&format!(
                    "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"12\">{}</text>\n",
                    x + radius + 2.0,
                    y - radius,
                    xml_escape(id)
                ));
            }
        }

        if let Some(href) = &self.logo_href {
            svg.push_str(&format!(
                "  <image href=\"{}\" x=\"{}\" y=\"{}\"/>\n",
                xml_escape(href),
                LOGO_OFFSET,
                LOGO_OFFSET
            ));
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn write_frame(&mut self) -> RenderResult<()> {
        let path = self.frame_path(self.frames);
        std::fs::write(&path, self.render())?;
        tracing::trace!("svg: wrote {}", path.display());
        self.frames += 1;
        Ok(())
    }
}

fn logo_href(logo: &Path) -> RenderResult<String> {
    let absolute = logo.canonicalize().map_err(|e| {
        RenderError::Sink(format!("logo {} unavailable: {}", logo.display(), e))
    })?;
    Ok(format!("file://{}", absolute.display()))
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[async_trait]
impl RenderSink for SvgFrameSink {
    fn name(&self) -> &'static str {
        "svg"
    }

    async fn begin(&mut self) -> RenderResult<()> {
        if let Some(parent) = self.prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.logo_href = match &self.options.logo {
            Some(logo) => Some(logo_href(logo)?),
            None => None,
        };
        tracing::info!(
            "Rendering {} frames to {}*",
            self.options.resolution,
            self.prefix.display()
        );
        Ok(())
    }

    async fn handle(&mut self, event: &GraphEvent) -> RenderResult<()> {
        if self.apply(event) {
            self.write_frame()?;
        }
        Ok(())
    }

    async fn end(&mut self) -> RenderResult<()> {
        tracing::info!("Rendered {} frames", self.frames);
        Ok(())
    }
}

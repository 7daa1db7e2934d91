//! DGS event log: writer sink and reader
//!
//! Only the subset the animation needs is supported:
//!
//! ```text
//! DGS004
//! "NetworkEvolution" 0 0
//! an "A"
//! st 1
//! ae "A-B" "A" "B"
//! st 2
//! ```

use crate::error::{RenderError, RenderResult};
use crate::traits::RenderSink;
use async_trait::async_trait;
use graphreel_core::{Edge, GraphEvent};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const MAGIC: &str = "DGS004";

/// Writes add events as a DGS004 log, each followed by a step stamp
///
/// An instruction that was already written is skipped. Settle and step
/// boundary events carry no log content and are ignored.
pub struct DgsSink<W: Write + Send> {
    writer: W,
    graph_name: String,
    stamp: u64,
    nodes: HashSet<String>,
    edges: HashSet<Edge>,
}

impl DgsSink<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`
    pub fn create(path: &Path, graph_name: impl Into<String>) -> RenderResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        tracing::debug!("Writing event log to {}", path.display());
        Ok(Self::new(BufWriter::new(file), graph_name))
    }
}

impl<W: Write + Send> DgsSink<W> {
    pub fn new(writer: W, graph_name: impl Into<String>) -> Self {
        Self {
            writer,
            graph_name: graph_name.into(),
            stamp: 0,
            nodes: HashSet::new(),
            edges: HashSet::new(),
        }
    }

    /// Number of instructions written so far
    pub fn written(&self) -> u64 {
        self.stamp
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_instruction(&mut self, line: String) -> RenderResult<()> {
        self.stamp += 1;
        tracing::trace!("dgs: {}", line);
        writeln!(self.writer, "{}", line)?;
        writeln!(self.writer, "st {}", self.stamp)?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> RenderSink for DgsSink<W> {
    fn name(&self) -> &'static str {
        "dgs"
    }

    async fn begin(&mut self) -> RenderResult<()> {
        writeln!(self.writer, "{}", MAGIC)?;
        writeln!(self.writer, "{} 0 0", quote(&self.graph_name))?;
        Ok(())
    }

    async fn handle(&mut self, event: &GraphEvent) -> RenderResult<()> {
        match event {
            GraphEvent::AddNode { id } => {
                if self.nodes.insert(id.clone()) {
                    self.write_instruction(format!("an {}", quote(id)))?;
                }
            }
            GraphEvent::AddEdge { from, to } => {
                let edge = Edge::new(from.as_str(), to.as_str());
                if !self.edges.contains(&edge) {
                    let line = format!("ae {} {} {}", quote(&edge.id()), quote(from), quote(to));
                    self.edges.insert(edge);
                    self.write_instruction(line)?;
                }
            }
            GraphEvent::StepBegin { .. }
            | GraphEvent::SettleNode { .. }
            | GraphEvent::SettleEdge { .. } => {}
        }
        Ok(())
    }

    async fn end(&mut self) -> RenderResult<()> {
        self.writer.flush()?;
        tracing::info!("Event log complete: {} instructions", self.stamp);
        Ok(())
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A parsed DGS log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DgsDocument {
    pub graph_name: String,
    pub events: Vec<GraphEvent>,
}

/// Parse a DGS log into graph events. `st` lines become step boundaries.
pub fn parse_dgs(content: &str) -> RenderResult<DgsDocument> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (line_no, magic) = lines.next().ok_or_else(|| RenderError::DgsParse {
        line: 1,
        message: "empty document".to_string(),
    })?;
    if !magic.starts_with("DGS00") {
        return Err(parse_error(line_no, format!("bad magic '{}'", magic)));
    }

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| parse_error(line_no + 1, "missing graph header"))?;
    let header = tokenize(header).map_err(|m| parse_error(line_no, m))?;
    let graph_name = header
        .first()
        .cloned()
        .ok_or_else(|| parse_error(line_no, "missing graph name"))?;

    let mut events = Vec::new();
    for (line_no, line) in lines {
        let tokens = tokenize(line).map_err(|m| parse_error(line_no, m))?;
        let (directive, args) = tokens
            .split_first()
            .ok_or_else(|| parse_error(line_no, "empty directive"))?;

        match directive.as_str() {
            "an" => {
                let id = args
                    .first()
                    .ok_or_else(|| parse_error(line_no, "an: missing node id"))?;
                events.push(GraphEvent::add_node(id));
            }
            "ae" => {
                let (from, to) = match args {
                    [_, from, dir, to, ..] if dir == ">" => (from, to),
                    [_, to, dir, from, ..] if dir == "<" => (from, to),
                    [_, from, to, ..] if !is_direction(from) && !is_direction(to) => (from, to),
                    _ => return Err(parse_error(line_no, "ae: expected id, source and target")),
                };
                events.push(GraphEvent::AddEdge {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            "st" => {
                let raw = args
                    .first()
                    .ok_or_else(|| parse_error(line_no, "st: missing step"))?;
                let step = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .ok_or_else(|| parse_error(line_no, format!("st: invalid step '{}'", raw)))?;
                events.push(GraphEvent::StepBegin {
                    step: step as usize,
                });
            }
            other => {
                return Err(parse_error(
                    line_no,
                    format!("unsupported directive '{}'", other),
                ))
            }
        }
    }

    tracing::debug!("Parsed {} DGS events for '{}'", events.len(), graph_name);
    Ok(DgsDocument { graph_name, events })
}

fn is_direction(token: &str) -> bool {
    token == ">" || token == "<"
}

fn parse_error(line: usize, message: impl Into<String>) -> RenderError {
    RenderError::DgsParse {
        line,
        message: message.into(),
    }
}

/// Split a line into bare words and double-quoted strings
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(escaped) => token.push(escaped),
                        None => return Err("dangling escape".to_string()),
                    },
                    Some('"') => break,
                    Some(other) => token.push(other),
                    None => return Err("unterminated string".to_string()),
                }
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
            tokens.push(token);
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphreel_core::EventLog;

    async fn write(events: &[GraphEvent]) -> String {
        let mut sink = DgsSink::new(Vec::new(), "NetworkEvolution");
        sink.begin().await.unwrap();
        for event in events {
            sink.handle(event).await.unwrap();
        }
        sink.end().await.unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_writer_format() {
        let output = write(&[
            GraphEvent::StepBegin { step: 0 },
            GraphEvent::add_node("A"),
            GraphEvent::add_node("B"),
            GraphEvent::add_edge(&Edge::new("A", "B")),
            GraphEvent::settle_edge(&Edge::new("A", "B")),
        ])
        .await;

        assert_eq!(
            output,
            "DGS004\n\"NetworkEvolution\" 0 0\nan \"A\"\nst 1\nan \"B\"\nst 2\nae \"A-B\" \"A\" \"B\"\nst 3\n"
        );
    }

    #[tokio::test]
    async fn test_writer_skips_repeated_instructions() {
        let output = write(&[
            GraphEvent::add_node("A"),
            GraphEvent::add_edge(&Edge::new("A", "B")),
            GraphEvent::add_node("A"),
            GraphEvent::add_edge(&Edge::new("a", "b")),
        ])
        .await;

        assert_eq!(output.matches("an \"A\"").count(), 1);
        assert_eq!(output.matches("ae ").count(), 1);
        assert!(output.ends_with("st 2\n"));
    }

    #[tokio::test]
    async fn test_event_log_through_sink_dedups() {
        let mut log = EventLog::new();
        log.record_snapshot(0, ["A", "B"], [("A", "B")]);
        log.record_snapshot(1, ["A", "B"], [("A", "B")]);

        let output = write(&log.events()).await;
        assert_eq!(output.matches("an \"A\"").count(), 1);
        assert_eq!(output.matches("ae \"A-B\"").count(), 1);
    }

    #[tokio::test]
    async fn test_write_then_parse() {
        let events = vec![
            GraphEvent::add_node("A"),
            GraphEvent::add_node("say \"hi\""),
            GraphEvent::add_edge(&Edge::new("A", "say \"hi\"")),
        ];
        let document = parse_dgs(&write(&events).await).unwrap();

        let additions: Vec<GraphEvent> = document
            .events
            .into_iter()
            .filter(|e| e.is_addition())
            .collect();
        assert_eq!(document.graph_name, "NetworkEvolution");
        assert_eq!(additions, events);
    }

    #[test]
    fn test_parse_steps_and_direction() {
        let content = "DGS004\n# comment\n\"g\" 0 0\n\nan a\nst 1.0\nae e1 a > b\nae e2 b < c\n";
        let document = parse_dgs(content).unwrap();

        assert_eq!(
            document.events,
            vec![
                GraphEvent::add_node("a"),
                GraphEvent::StepBegin { step: 1 },
                GraphEvent::AddEdge {
                    from: "a".into(),
                    to: "b".into()
                },
                GraphEvent::AddEdge {
                    from: "c".into(),
                    to: "b".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_dgs("DGS004\n\"g\" 0 0\nan a\ncn a label=1\n").unwrap_err();
        assert!(matches!(err, RenderError::DgsParse { line: 4, .. }));

        assert!(parse_dgs("").is_err());
        assert!(parse_dgs("GML\n").is_err());
        assert!(parse_dgs("DGS004\n\"g\" 0 0\nae e1 a\n").is_err());
        assert!(parse_dgs("DGS004\n\"g\" 0 0\nan \"open\n").is_err());
    }

    #[tokio::test]
    async fn test_create_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DGS").join("network.dgs");

        let mut sink = DgsSink::create(&path, "g").unwrap();
        sink.begin().await.unwrap();
        sink.handle(&GraphEvent::add_node("A")).await.unwrap();
        sink.end().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("DGS004\n\"g\" 0 0\n"));
        assert_eq!(sink.written(), 1);
    }
}

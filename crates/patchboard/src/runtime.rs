//! The audio runtime seam.
//!
//! Synthesis itself is an external engine; Patchboard only hands it a
//! [`Program`]. The [`Runtime`] trait is that handoff. The shipped
//! implementation, [`JsonSink`], serializes the program as JSON to any
//! writer so the engine can pick it up out of process.

use std::io::{self, Write};

use log::info;
use thiserror::Error;

use crate::program::Program;

/// Errors from a runtime handoff.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode program: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A destination that can play an assembled program.
///
/// Implementations own whatever engine state playback needs; Patchboard
/// passes the handle explicitly rather than keeping process-wide runtime
/// state.
pub trait Runtime {
    /// Start playing a program, replacing whatever was playing before.
    fn play(&mut self, program: &Program) -> Result<(), RuntimeError>;
}

/// A runtime that writes programs as JSON for an external engine.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Runtime for JsonSink<W> {
    fn play(&mut self, program: &Program) -> Result<(), RuntimeError> {
        serde_json::to_writer_pretty(&mut self.writer, program)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        info!(nodes = program.nodes().len(); "Program handed to runtime");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchboard_core::snapshot::{Shape, ShapeKind, ShapeProps, Snapshot, Terminal};

    use crate::{
        compile::compile,
        config::{CompileConfig, RuntimeConfig},
        program::assemble,
    };

    fn demo_program() -> Program {
        let snapshot = Snapshot {
            shapes: vec![
                Shape {
                    id: "shape:sine".to_string(),
                    kind: ShapeKind::Node,
                    props: ShapeProps {
                        text: "sine 440".to_string(),
                        start: None,
                        end: None,
                    },
                },
                Shape {
                    id: "shape:out".to_string(),
                    kind: ShapeKind::Node,
                    props: ShapeProps {
                        text: "out".to_string(),
                        start: None,
                        end: None,
                    },
                },
                Shape {
                    id: "shape:wire".to_string(),
                    kind: ShapeKind::Arrow,
                    props: ShapeProps {
                        text: String::new(),
                        start: Some(Terminal {
                            to_id: Some("shape:sine".to_string()),
                        }),
                        end: Some(Terminal {
                            to_id: Some("shape:out".to_string()),
                        }),
                    },
                },
            ],
        };

        let patch =
            compile(&snapshot, &snapshot, &CompileConfig::default()).expect("patch compiles");
        assemble(&patch, &RuntimeConfig::default()).expect("program assembles")
    }

    #[test]
    fn test_json_sink_writes_program() {
        let mut sink = JsonSink::new(Vec::new());
        sink.play(&demo_program()).expect("play should succeed");

        let written = sink.into_inner();
        let text = String::from_utf8(written).expect("output is UTF-8");
        assert!(text.ends_with('\n'));

        let value: serde_json::Value =
            serde_json::from_str(&text).expect("output is valid JSON");
        assert_eq!(value["nodes"][0]["kind"], "sine");
    }

    #[test]
    fn test_json_sink_replaces_previous_program() {
        let mut sink = JsonSink::new(Vec::new());
        let program = demo_program();
        sink.play(&program).expect("first play");
        sink.play(&program).expect("second play");

        let text = String::from_utf8(sink.into_inner()).expect("output is UTF-8");
        // Two newline-terminated documents, in play order.
        assert_eq!(text.matches("\"root\"").count(), 2);
    }
}

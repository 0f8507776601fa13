//! Error types for Patchboard operations.
//!
//! [`CompileError`] names every way a sketch can fail to compile into a
//! patch; [`PatchboardError`] is the crate-level wrapper returned by the
//! [`PatchBuilder`](crate::PatchBuilder) API.

use std::io;

use thiserror::Error;

use patchboard_core::identifier::Id;
use patchboard_parser::error::ParseError;

/// A structural failure while compiling a snapshot into a patch.
///
/// Each variant is a distinct, named failure mode; none of them leave
/// partial state behind, since compilation never mutates the canvas.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The canvas had no shapes. Recoverable: callers surface this as a
    /// user alert rather than a failure.
    #[error("no shapes on the canvas")]
    EmptyCanvas,

    /// An arrow endpoint is unbound, or bound to a shape that is not a
    /// node candidate (another arrow or a freehand stroke).
    #[error("arrow `{arrow}` does not connect two node shapes")]
    DanglingArrow {
        /// The arrow shape id.
        arrow: Id,
    },

    /// An arrow label named an inlet that does not exist on its target.
    #[error(
        "arrow label `{inlet}` has no matching argument name on `{kind}` (arguments: {available})"
    )]
    UnknownInlet {
        /// The arrow's label text.
        inlet: String,
        /// The target node type.
        kind: Id,
        /// The target's declared argument tokens, space-separated.
        available: String,
    },

    /// Two arrows resolved to the same inlet of the same node.
    #[error("inlet {slot} of `{kind}` node `{node}` is fed by more than one arrow")]
    InletCollision {
        /// The target shape id.
        node: Id,
        /// The target node type.
        kind: Id,
        /// The contested input slot.
        slot: usize,
    },

    /// No node of the sink type was found.
    #[error("no `{sink}` node on the canvas")]
    MissingSink {
        /// The configured sink type.
        sink: Id,
    },

    /// More than one node of the sink type was found.
    #[error("more than one `{sink}` node on the canvas")]
    MultipleSinks {
        /// The configured sink type.
        sink: Id,
    },

    /// The sink node's single input was never connected.
    #[error("the `{sink}` node has no incoming connection")]
    UnconnectedRoot {
        /// The configured sink type.
        sink: Id,
    },

    /// A reachable input slot has neither a default literal nor a
    /// connection.
    #[error("input `{name}` of `{kind}` node `{node}` is neither defaulted nor connected")]
    UnboundInput {
        /// The owning shape id.
        node: Id,
        /// The owning node type.
        kind: Id,
        /// The declared argument name.
        name: Id,
    },

    /// The wires form a cycle; the program format is a DAG.
    #[error("the patch contains a feedback cycle through `{node}`")]
    CyclicPatch {
        /// A node on the cycle.
        node: Id,
    },
}

/// The main error type for Patchboard operations.
///
/// The `Label` variant carries the parse diagnostics together with the
/// offending label text, so the CLI can render source snippets.
#[derive(Debug, Error)]
pub enum PatchboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("shape `{shape}`: {err}")]
    Label {
        shape: Id,
        err: ParseError,
        src: String,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(Box<dyn std::error::Error + Send + Sync>),
}

impl PatchboardError {
    /// Create a new `Label` error for a shape whose label failed to parse.
    pub fn new_label_error(shape: Id, err: ParseError, src: impl Into<String>) -> Self {
        Self::Label {
            shape,
            err,
            src: src.into(),
        }
    }

    /// Returns `true` for the recoverable empty-canvas condition.
    pub fn is_empty_canvas(&self) -> bool {
        matches!(self, Self::Compile(CompileError::EmptyCanvas))
    }
}

impl From<crate::runtime::RuntimeError> for PatchboardError {
    fn from(error: crate::runtime::RuntimeError) -> Self {
        Self::Runtime(Box::new(error))
    }
}

//! Data model for canvas export snapshots.
//!
//! The canvas editor is an external collaborator: the only thing Patchboard
//! sees from it is a JSON export of the current page, a flat list of shapes.
//! This module defines the deserialized form of that export ([`Snapshot`],
//! [`Shape`]) and the [`BindingSource`] seam through which arrow endpoints
//! are resolved to shape ids.
//!
//! Arrows and freehand strokes are visual-only: they are never compiled
//! into patch nodes. Every other shape kind is a node candidate whose text
//! label carries the node definition.

use serde::Deserialize;

use crate::identifier::Id;

/// An exported canvas page: the set of shapes present when the user
/// triggered a compile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// All shapes on the page, in export order.
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Snapshot {
    /// Returns `true` if the canvas had no shapes at all.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over the arrow shapes in the snapshot.
    pub fn arrows(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| shape.kind == ShapeKind::Arrow)
    }

    /// Iterate over node-candidate shapes (everything except arrows and
    /// freehand strokes).
    pub fn candidates(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|shape| shape.kind.is_candidate())
    }
}

/// A single shape from the canvas export.
#[derive(Debug, Clone, Deserialize)]
pub struct Shape {
    /// The editor-assigned shape id (e.g. `shape:x7Kp2`).
    pub id: String,
    /// The editor shape type tag.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Shape properties; only the text label and arrow terminals matter
    /// to the compiler.
    #[serde(default)]
    pub props: ShapeProps,
}

impl Shape {
    /// The shape id as an interned identifier.
    pub fn identifier(&self) -> Id {
        Id::new(&self.id)
    }

    /// The shape's text label with surrounding whitespace removed.
    pub fn label(&self) -> &str {
        self.props.text.trim()
    }
}

/// The editor's shape type tag.
///
/// The editor defines many concrete shape types (geo, text, note, ...);
/// the compiler only distinguishes arrows and freehand strokes from
/// everything else, so all other tags collapse into [`ShapeKind::Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A connector between two shapes.
    Arrow,
    /// A freehand stroke; decoration only.
    Draw,
    /// Any other shape type; a node candidate.
    #[serde(other)]
    Node,
}

impl ShapeKind {
    /// Returns `true` if shapes of this kind become patch nodes.
    pub fn is_candidate(&self) -> bool {
        matches!(self, ShapeKind::Node)
    }
}

/// Shape properties carried in the export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShapeProps {
    /// Free-form text label. For node candidates this holds the node
    /// definition; for arrows it names the target inlet.
    #[serde(default)]
    pub text: String,
    /// Arrow start terminal, if this shape is an arrow.
    #[serde(default)]
    pub start: Option<Terminal>,
    /// Arrow end terminal, if this shape is an arrow.
    #[serde(default)]
    pub end: Option<Terminal>,
}

/// One end of an arrow as exported by the editor.
///
/// A terminal bound to a shape carries that shape's id; an arrow drawn
/// into empty canvas has an unbound terminal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Terminal {
    /// Id of the shape this terminal is bound to, if any.
    #[serde(rename = "toId", default)]
    pub to_id: Option<String>,
}

/// A fully resolved arrow: source and target shape ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowBinding {
    /// The shape the arrow starts from.
    pub source: Id,
    /// The shape the arrow points at.
    pub target: Id,
}

/// Resolution of arrow endpoints to shape ids.
///
/// This is the seam to the canvas collaborator: the editor knows which
/// shapes an arrow is bound to. [`Snapshot`] implements it by reading the
/// terminals inlined into the export; an embedding application can provide
/// its own source backed by a live editor instead.
pub trait BindingSource {
    /// Resolve both endpoints of an arrow shape.
    ///
    /// Returns `None` when either endpoint is unbound, which the compiler
    /// reports as a dangling arrow.
    fn resolve(&self, arrow: &Shape) -> Option<ArrowBinding>;
}

impl BindingSource for Snapshot {
    fn resolve(&self, arrow: &Shape) -> Option<ArrowBinding> {
        let source = arrow.props.start.as_ref()?.to_id.as_deref()?;
        let target = arrow.props.end.as_ref()?.to_id.as_deref()?;
        Some(ArrowBinding {
            source: Id::new(source),
            target: Id::new(target),
        })
    }
}

//! The semantic patch model.
//!
//! A patch is what the compiler produces from a snapshot: one
//! [`PatchNode`] per node-candidate shape, each with an ordered list of
//! input slots. Slots start out holding the literal defaults written in
//! the shape label and are overwritten by incoming connections during
//! compilation; a slot that has neither a literal nor a wire stays
//! [`Input::Unbound`].

use crate::identifier::Id;

/// One input slot on a patch node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// A constant value from a literal argument in the shape label.
    Literal(f64),
    /// A connection from another node, by shape id.
    Wire(Id),
    /// A declared but unconnected slot; carries the argument name for
    /// diagnostics.
    Unbound(Id),
}

impl Input {
    /// Returns `true` if this slot is wired to another node.
    pub fn is_wire(&self) -> bool {
        matches!(self, Input::Wire(_))
    }

    /// The wired source node id, if any.
    pub fn wire(&self) -> Option<Id> {
        match self {
            Input::Wire(id) => Some(*id),
            _ => None,
        }
    }
}

/// A compiled node: the unit the audio runtime executes.
///
/// Maps 1:1 to a non-arrow, non-freehand shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchNode {
    id: Id,
    kind: Id,
    inputs: Vec<Input>,
    in_labels: Vec<String>,
}

impl PatchNode {
    /// Creates a node with its initial input slots.
    pub fn new(id: Id, kind: Id, inputs: Vec<Input>) -> Self {
        Self {
            id,
            kind,
            inputs,
            in_labels: Vec::new(),
        }
    }

    /// The originating shape id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The node type tag (first token of the shape label).
    pub fn kind(&self) -> Id {
        self.kind
    }

    /// The input slots in positional order.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Human-readable labels of inbound connections. Sorted once
    /// compilation finishes, so the list does not depend on arrow order.
    pub fn in_labels(&self) -> &[String] {
        &self.in_labels
    }

    /// Returns the input at `slot`, if declared.
    pub fn input(&self, slot: usize) -> Option<&Input> {
        self.inputs.get(slot)
    }

    /// Overwrites the input at `slot`, growing the slot list if the
    /// connection targets a slot the label never declared (the sink's
    /// implicit inlet is the common case). Padding slots are anonymous
    /// unbound inputs.
    pub fn set_input(&mut self, slot: usize, input: Input) {
        while self.inputs.len() <= slot {
            let idx = self.inputs.len();
            self.inputs.push(Input::Unbound(Id::from_anonymous(idx)));
        }
        self.inputs[slot] = input;
    }

    /// Records a human-readable description of an inbound connection.
    pub fn add_in_label(&mut self, label: impl Into<String>) {
        self.in_labels.push(label.into());
    }

    /// Sorts the inbound labels, so node equality does not depend on the
    /// order connections were discovered in.
    pub fn sort_in_labels(&mut self) {
        self.in_labels.sort();
    }
}

//! Parsed node specifications.
//!
//! A [`NodeSpec`] is the tagged result of parsing a shape label: the node
//! type plus its declared arguments. Arguments keep the raw source token
//! they were written as, because arrow labels select inlets by matching
//! that raw token.

use patchboard_core::identifier::Id;

use crate::span::Spanned;

/// A parsed shape label: node type and declared arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    kind: Spanned<Id>,
    args: Vec<Spanned<Arg>>,
}

impl NodeSpec {
    pub(crate) fn new(kind: Spanned<Id>, args: Vec<Spanned<Arg>>) -> Self {
        Self { kind, args }
    }

    /// The node type tag (first label word).
    pub fn kind(&self) -> Id {
        *self.kind.inner()
    }

    /// The node type with its span.
    pub fn kind_spanned(&self) -> &Spanned<Id> {
        &self.kind
    }

    /// The declared arguments in positional order.
    pub fn args(&self) -> &[Spanned<Arg>] {
        &self.args
    }

    /// Position of the argument whose raw source token equals `token`.
    ///
    /// This is how arrow labels select inlets: the arrow's text is matched
    /// against the argument tokens as written, so `freq` matches a named
    /// argument and `440` matches a literal one.
    pub fn arg_index(&self, token: &str) -> Option<usize> {
        self.args
            .iter()
            .position(|arg| arg.inner().raw() == token)
    }
}

/// One declared argument in a shape label.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    value: ArgValue,
    raw: String,
}

impl Arg {
    pub(crate) fn new(value: ArgValue, raw: impl Into<String>) -> Self {
        Self {
            value,
            raw: raw.into(),
        }
    }

    /// The tagged argument value.
    pub fn value(&self) -> &ArgValue {
        &self.value
    }

    /// The argument token exactly as written in the label.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// The tagged value of a label argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    /// A decimal literal; becomes a constant input.
    Literal(f64),
    /// A name; declares an inlet with no default value.
    Name(Id),
}

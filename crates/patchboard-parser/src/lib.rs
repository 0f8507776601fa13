//! Parser for Patchboard shape labels.
//!
//! Shape labels follow a small whitespace-separated grammar: the first
//! word is the node type, remaining words are arguments: decimal
//! literals for default values, names for inlets without defaults.
//!
//! ```text
//! sine 440
//! lpf cutoff 2
//! out
//! ```
//!
//! The public entry point is [`parse_label`], which returns a tagged
//! [`NodeSpec`] or a [`ParseError`](error::ParseError) carrying coded
//! diagnostics with spans into the label text.

pub mod error;

mod lexer;
mod parser;
mod span;
mod spec;

pub use span::{Span, Spanned};
pub use spec::{Arg, ArgValue, NodeSpec};

use log::{trace, warn};

use error::ParseError;

/// Parse a shape label into a node specification.
///
/// # Arguments
///
/// * `source` - The shape's text label
///
/// # Errors
///
/// Returns a [`ParseError`] when the label is empty, starts with a
/// number, or contains words that are neither names nor decimal
/// literals. All offending words are reported. A repeated argument name
/// parses successfully but logs a warning, since arrows can only reach
/// the first occurrence.
///
/// # Examples
///
/// ```
/// use patchboard_parser::{ArgValue, parse_label};
///
/// let spec = parse_label("sine 440").expect("valid label");
/// assert_eq!(spec.kind(), "sine");
/// assert_eq!(*spec.args()[0].inner().value(), ArgValue::Literal(440.0));
/// ```
pub fn parse_label(source: &str) -> Result<NodeSpec, ParseError> {
    trace!(label = source; "Parsing shape label");

    let tokens = lexer::lex(source).map_err(ParseError::new)?;
    let spec = parser::build_spec(&tokens, source).map_err(ParseError::from)?;

    // Advisory lints never fail the parse.
    for diagnostic in parser::lint_spec(&spec) {
        warn!(label = source; "{diagnostic}");
    }

    Ok(spec)
}

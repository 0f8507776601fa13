//! Labeled source spans for diagnostics.
//!
//! A [`Label`] attaches a message to a span of the label text. Primary
//! labels mark the cause of a diagnostic; secondary labels mark related
//! locations.

use crate::span::Span;

/// A message attached to a span of label source text.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    /// Creates a primary label marking the cause of a diagnostic.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    /// Creates a secondary label marking a related location.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: false,
        }
    }

    /// The labeled span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this is the primary label.
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

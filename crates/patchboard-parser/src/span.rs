//! Source spans for label diagnostics.
//!
//! Spans are byte ranges into the original label text. They survive all
//! the way to the CLI, where diagnostics render the offending slice of the
//! shape label.

use std::ops::Range;

/// A byte range into the label source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Start byte offset (inclusive).
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The spanned slice of `source`.
    pub fn slice<'src>(&self, source: &'src str) -> &'src str {
        &source[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A value paired with the span it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Creates a spanned value.
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// The wrapped value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consumes the wrapper and returns the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The source span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Maps the wrapped value, keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned::new(f(self.value), self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice() {
        let source = "sine 440";
        let span = Span::new(5..8);
        assert_eq!(span.slice(source), "440");
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_spanned_map_keeps_span() {
        let spanned = Spanned::new("440", Span::new(5..8));
        let mapped = spanned.map(|s| s.len());
        assert_eq!(*mapped.inner(), 3);
        assert_eq!(mapped.span(), Span::new(5..8));
    }
}

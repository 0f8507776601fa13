//! Lexer for shape label text.
//!
//! A label is a single line of whitespace-separated words. The lexer
//! splits the label into words, classifies each as a name or a decimal
//! literal, and attaches byte spans. Words that are neither produce
//! diagnostics; all offending words are reported, not just the first.

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// A classified label word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'src> {
    /// A name: node type or inlet/argument name.
    Ident(&'src str),
    /// A decimal literal with its raw source text.
    Number(f64, &'src str),
}

/// A token paired with its span in the label text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PositionedToken<'src> {
    pub(crate) token: Token<'src>,
    pub(crate) span: Span,
}

/// Lex a label into positioned tokens.
///
/// Returns every diagnostic encountered rather than stopping at the
/// first bad word.
pub(crate) fn lex(source: &str) -> Result<Vec<PositionedToken<'_>>, Vec<Diagnostic>> {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    for (word, span) in words(source) {
        match classify(word, span) {
            Ok(token) => tokens.push(token),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    if diagnostics.is_empty() {
        Ok(tokens)
    } else {
        Err(diagnostics)
    }
}

/// Iterate whitespace-separated words with their byte spans.
fn words(source: &str) -> impl Iterator<Item = (&str, Span)> {
    let mut rest = source;
    let mut offset = 0;

    std::iter::from_fn(move || {
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return None;
        }

        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let word = &trimmed[..end];
        let span = Span::new(offset..offset + end);

        rest = &trimmed[end..];
        offset += end;

        Some((word, span))
    })
}

fn classify<'src>(word: &'src str, span: Span) -> Result<PositionedToken<'src>, Diagnostic> {
    if is_name(word) {
        return Ok(PositionedToken {
            token: Token::Ident(word),
            span,
        });
    }

    if is_decimal(word) {
        let value = word
            .parse::<f64>()
            .expect("decimal-shaped word must parse as f64");
        return Ok(PositionedToken {
            token: Token::Number(value, word),
            span,
        });
    }

    // Words that start like a number get the more specific diagnostic.
    let numberish = word
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '-' || ch == '.');

    let diagnostic = if numberish {
        Diagnostic::error(format!("malformed number `{word}`"))
            .with_code(ErrorCode::E002)
            .with_label(span, "not a decimal literal")
            .with_help("arguments are decimal literals or inlet names")
    } else {
        Diagnostic::error(format!("unexpected character in `{word}`"))
            .with_code(ErrorCode::E001)
            .with_label(span, "names are letters, digits, and underscores")
    };

    Err(diagnostic)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_name(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// `-?(digits[.digits?] | .digits)`
fn is_decimal(word: &str) -> bool {
    let unsigned = word.strip_prefix('-').unwrap_or(word);
    if unsigned.is_empty() {
        return false;
    }

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match unsigned.split_once('.') {
        None => digits(unsigned),
        Some((int, frac)) => {
            if int.is_empty() {
                digits(frac)
            } else {
                digits(int) && (frac.is_empty() || digits(frac))
            }
        }
    }
}

//! Parser for label tokens.
//!
//! This module transforms the token stream from the [`lexer`](super::lexer)
//! into a [`NodeSpec`]. The grammar is one node type name followed by zero
//! or more arguments:
//!
//! ```text
//! label := ident arg*
//! arg   := number | ident
//! ```

use winnow::{
    Parser as _,
    combinator::repeat,
    error::{ContextError, ErrMode},
    stream::TokenSlice,
    token::any,
};

use patchboard_core::identifier::Id;

use crate::{
    error::{Diagnostic, ErrorCode},
    lexer::{PositionedToken, Token},
    span::{Span, Spanned},
    spec::{Arg, ArgValue, NodeSpec},
};

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse the leading node type name.
fn node_kind(input: &mut Input<'_>) -> IResult<Spanned<Id>> {
    any.verify_map(|token: &PositionedToken<'_>| match token.token {
        Token::Ident(name) => Some(Spanned::new(Id::new(name), token.span)),
        Token::Number(..) => None,
    })
    .parse_next(input)
}

/// Parse one argument: a literal or a name.
fn argument(input: &mut Input<'_>) -> IResult<Spanned<Arg>> {
    any.map(|token: &PositionedToken<'_>| {
        let arg = match token.token {
            Token::Number(value, raw) => Arg::new(ArgValue::Literal(value), raw),
            Token::Ident(name) => Arg::new(ArgValue::Name(Id::new(name)), name),
        };
        Spanned::new(arg, token.span)
    })
    .parse_next(input)
}

/// Build a [`NodeSpec`] from lexed tokens.
///
/// `source` is the original label text, used to slice diagnostics.
pub(crate) fn build_spec(
    tokens: &[PositionedToken<'_>],
    source: &str,
) -> Result<NodeSpec, Diagnostic> {
    let Some(first) = tokens.first() else {
        return Err(Diagnostic::error("empty label")
            .with_code(ErrorCode::E100)
            .with_help("node shapes need a label like `sine 440` or `out`"));
    };

    let mut input = Input::new(tokens);

    let kind = node_kind(&mut input).map_err(|_| {
        Diagnostic::error(format!(
            "expected a node type name, found `{}`",
            first.span.slice(source)
        ))
        .with_code(ErrorCode::E101)
        .with_label(first.span, "labels start with a node type")
        .with_help("write the node type first, then its arguments")
    })?;

    // Every remaining token is a valid argument, so this cannot fail.
    let args: Vec<Spanned<Arg>> = repeat(0.., argument)
        .parse_next(&mut input)
        .expect("argument parsing is total over lexed tokens");

    Ok(NodeSpec::new(kind, args))
}

/// Advisory checks on a parsed spec.
///
/// One lint so far: a repeated argument name shadows the earlier one,
/// because arrows select inlets by matching the argument token and always
/// hit the first occurrence.
pub(crate) fn lint_spec(spec: &NodeSpec) -> Vec<Diagnostic> {
    let mut seen: Vec<(&str, Span)> = Vec::new();
    let mut diagnostics = Vec::new();

    for arg in spec.args() {
        if !matches!(arg.inner().value(), ArgValue::Name(_)) {
            continue;
        }

        let raw = arg.inner().raw();
        match seen.iter().find(|(token, _)| *token == raw) {
            Some((_, first)) => diagnostics.push(
                Diagnostic::warning(format!("argument `{raw}` is repeated"))
                    .with_label(arg.span(), "arrows can never reach this slot by name")
                    .with_secondary_label(*first, "first written here")
                    .with_help("rename one of the repeated arguments"),
            ),
            None => seen.push((raw, arg.span())),
        }
    }

    diagnostics
}

//! Lexical classifier for VHDL source text.
//!
//! The classifier converts source text into a flat sequence of [`Token`]s
//! for the structural recognizer and the formatting engine. It is a single
//! left-to-right pass built from winnow parsers over a [`LocatingSlice`].
//!
//! Keyword and type-name classification is case-insensitive against the
//! [`registry`](vhdlfmt_core::registry) tables; the written case is kept on
//! the token for the alias check and the preserve case mode. Intra-line
//! whitespace is consumed between tokens and never materialized (canonical
//! spacing is recomputed at emission); newlines become tokens because line
//! structure is layout-relevant.
//!
//! The public entry point is [`classify`]. It fails only on unterminated
//! string literals, delimited comments, and extended identifiers; any other
//! character run degrades to an identifier or punctuation classification.

use log::trace;
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, none_of, one_of, take_until, take_while},
};

use vhdlfmt_core::{
    diagnostic::{Diagnostic, ErrorCode},
    registry,
    span::Span,
    token::{Token, TokenKind},
};

use crate::error::LexError;

/// Rich diagnostic information for unterminated lexical constructs.
///
/// Attached to winnow errors via `.context()` to provide detailed error
/// messages with codes, help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerContext {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type LResult<O> = ModalResult<O, ContextError<LexerContext>>;

/// Parse a line comment: `--` to end of line, newline excluded.
fn line_comment(input: &mut Input<'_>) -> LResult<TokenKind> {
    ("--", take_while(0.., |c: char| c != '\n'))
        .value(TokenKind::Comment)
        .parse_next(input)
}

/// Parse a delimited comment `/* ... */`, which may span lines.
///
/// Uses `cut_err` to commit after the opening delimiter: a `/*` with no
/// closing `*/` is a fatal lexical error, not something to backtrack over.
fn delimited_comment(input: &mut Input<'_>) -> LResult<TokenKind> {
    let start = input.current_token_start();

    "/*".parse_next(input)?;

    cut_err(terminated(take_until(0.., "*/"), "*/"))
        .context(LexerContext {
            code: ErrorCode::E002,
            message: "unterminated delimited comment",
            help: Some("add closing `*/`"),
            start,
        })
        .void()
        .parse_next(input)?;

    Ok(TokenKind::Comment)
}

/// Parse a character literal such as `'0'`.
///
/// Only fires when a single character sits between two ticks, so the
/// attribute tick in `clk'event` backtracks to the operator parser.
fn character_literal(input: &mut Input<'_>) -> LResult<TokenKind> {
    ('\'', any, '\'').void().parse_next(input)?;
    Ok(TokenKind::CharacterLiteral)
}

/// Parse a string literal with doubled-quote escapes: `"he said ""hi"""`.
///
/// VHDL string literals cannot span lines; a newline before the closing
/// quote is an unterminated literal.
fn string_literal(input: &mut Input<'_>) -> LResult<TokenKind> {
    let start = input.current_token_start();

    '"'.parse_next(input)?;

    let content = winnow::combinator::repeat::<_, _, (), _, _>(
        0..,
        alt(("\"\"".void(), none_of(['"', '\n', '\r']).void())),
    );

    cut_err(terminated(content, '"'))
        .context(LexerContext {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"`"),
            start,
        })
        .parse_next(input)?;

    Ok(TokenKind::StringLiteral)
}

/// Parse a bit-string literal: a one or two letter base specifier glued to
/// a quoted value, as in `x"FF"` or `ub"01_01"`.
fn bit_string_literal(input: &mut Input<'_>) -> LResult<TokenKind> {
    let start = input.current_token_start();

    take_while(1..=2, |c: char| c.is_ascii_alphabetic())
        .void()
        .parse_next(input)?;
    '"'.parse_next(input)?;

    let content =
        winnow::combinator::repeat::<_, _, (), _, _>(0.., none_of(['"', '\n', '\r']).void());

    cut_err(terminated(content, '"'))
        .context(LexerContext {
            code: ErrorCode::E001,
            message: "unterminated bit-string literal",
            help: Some("add closing `\"`"),
            start,
        })
        .parse_next(input)?;

    Ok(TokenKind::NumericLiteral)
}

/// Parse an extended identifier: `\bus!\`.
fn extended_identifier(input: &mut Input<'_>) -> LResult<TokenKind> {
    let start = input.current_token_start();

    '\\'.parse_next(input)?;

    cut_err(terminated(
        take_while(1.., |c: char| c != '\\' && c != '\n' && c != '\r'),
        '\\',
    ))
    .context(LexerContext {
        code: ErrorCode::E003,
        message: "unterminated extended identifier",
        help: Some("add closing `\\`"),
        start,
    })
    .void()
    .parse_next(input)?;

    Ok(TokenKind::Identifier)
}

/// Parse an abstract or based literal: `42`, `3.14`, `1e6`, `16#FF#`.
///
/// A `#` that does not complete a based literal is left in place for the
/// symbol parsers rather than failing the call.
fn numeric_literal(input: &mut Input<'_>) -> LResult<TokenKind> {
    take_while(1.., |c: char| c.is_ascii_digit() || c == '_')
        .void()
        .parse_next(input)?;

    opt((
        '#',
        take_while(1.., |c: char| {
            c.is_ascii_hexdigit() || c == '_' || c == '.'
        }),
        '#',
    ))
    .void()
    .parse_next(input)?;

    opt(('.', take_while(1.., |c: char| c.is_ascii_digit() || c == '_')))
        .void()
        .parse_next(input)?;

    opt((
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        take_while(1.., |c: char| c.is_ascii_digit()),
    ))
    .void()
    .parse_next(input)?;

    Ok(TokenKind::NumericLiteral)
}

/// Parse a basic identifier and classify it against the registries.
fn identifier_like(input: &mut Input<'_>) -> LResult<TokenKind> {
    let word = (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)?;

    if registry::is_keyword(word) {
        Ok(TokenKind::Keyword)
    } else if registry::is_type_name(word) {
        Ok(TokenKind::TypeName)
    } else {
        Ok(TokenKind::Identifier)
    }
}

/// Parse compound symbols (order matters - longest first).
fn compound_symbol(input: &mut Input<'_>) -> LResult<TokenKind> {
    alt((
        "=>".value(TokenKind::Punctuation),
        ":=".value(TokenKind::Operator),
        "<=".value(TokenKind::Operator),
        ">=".value(TokenKind::Operator),
        "/=".value(TokenKind::Operator),
        "<>".value(TokenKind::Operator),
        "**".value(TokenKind::Operator),
        "<<".value(TokenKind::Operator),
        ">>".value(TokenKind::Operator),
    ))
    .parse_next(input)
}

/// Parse single-character symbols.
fn single_symbol(input: &mut Input<'_>) -> LResult<TokenKind> {
    alt((
        one_of(['(', ')', ',', ';', ':', '.']).value(TokenKind::Punctuation),
        one_of([
            '+', '-', '*', '/', '=', '<', '>', '&', '|', '\'', '?', '@', '^', '[', ']',
        ])
        .value(TokenKind::Operator),
    ))
    .parse_next(input)
}

/// Parse a newline.
fn newline(input: &mut Input<'_>) -> LResult<TokenKind> {
    '\n'.value(TokenKind::Newline).parse_next(input)
}

/// Classify any remaining character run as punctuation.
///
/// The classifier never fails on unrecognized characters; it degrades so
/// the formatter stays usable on nonstandard input.
fn fallback(input: &mut Input<'_>) -> LResult<TokenKind> {
    any.value(TokenKind::Punctuation).parse_next(input)
}

/// Parse a single token.
fn token(input: &mut Input<'_>) -> LResult<TokenKind> {
    alt((
        alt((
            line_comment,        // Must come before the `-` operator
            delimited_comment,   // Must come before the `/` operator
            character_literal,   // Must come before the attribute tick
            string_literal,
            bit_string_literal,  // Must come before plain identifiers
            numeric_literal,
        )),
        alt((
            identifier_like,
            extended_identifier,
            compound_symbol,     // Must come before single-character symbols
            newline,
            single_symbol,
            fallback,
        )),
    ))
    .parse_next(input)
}

/// Classify source text into a sequence of tokens.
///
/// # Returns
///
/// - `Ok(tokens)` - the complete classified token sequence
/// - `Err(LexError)` - an unterminated string literal, delimited comment,
///   or extended identifier was found; the diagnostic labels the span from
///   the opening delimiter to the position the classifier gave up at
///
/// # Example
///
/// ```
/// use vhdlfmt_core::token::TokenKind;
///
/// let tokens = vhdlfmt_parser::classify("EnTiTy adder IS").unwrap();
///
/// assert_eq!(tokens[0].kind(), TokenKind::Keyword);
/// assert_eq!(tokens[0].text(), "EnTiTy");
/// assert_eq!(tokens[1].kind(), TokenKind::Identifier);
/// ```
pub fn classify(source: &str) -> Result<Vec<Token>, LexError> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut line_start = 0usize;

    loop {
        // Skip horizontal whitespace; carriage returns are dropped here so
        // CRLF input yields plain newline tokens.
        let _: ModalResult<&str, ContextError<LexerContext>> =
            take_while(0.., [' ', '\t', '\r']).parse_next(&mut input);
        if input.is_empty() {
            break;
        }

        let start = input.current_token_start();
        match token(&mut input) {
            Ok(kind) => {
                let end = input.current_token_start();
                let text = &source[start..end];
                let column = (start - line_start) as u32 + 1;
                tokens.push(Token::new(kind, text, Span::new(start..end), line, column));

                // Delimited comments may span lines; keep the counters true.
                for (offset, byte) in text.bytes().enumerate() {
                    if byte == b'\n' {
                        line += 1;
                        line_start = start + offset + 1;
                    }
                }
            }
            Err(err) => {
                let error_pos = input.current_token_start();
                return Err(convert_err_mode(err, error_pos));
            }
        }
    }

    trace!(token_count = tokens.len(); "Source classified");
    Ok(tokens)
}

/// Convert an ErrMode and error position to a LexError.
///
/// Extracts [`LexerContext`] from the error context for rich error info
/// with code, message, and help. Falls back to a generic diagnostic if no
/// context is found.
fn convert_err_mode(err: ErrMode<ContextError<LexerContext>>, error_pos: usize) -> LexError {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(LexerContext {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let span = Span::new(*start..error_pos.max(start + 1));

        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(help) = help {
            diag = diag.with_help(*help);
        }
        return LexError::new(diag);
    }

    let span = Span::new(error_pos..error_pos.saturating_add(1));
    LexError::new(Diagnostic::error("unexpected character").with_label(span, "written here"))
}

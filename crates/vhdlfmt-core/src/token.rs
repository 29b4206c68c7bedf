//! Classified lexical tokens.
//!
//! A [`Token`] is the unit the whole formatting pipeline operates on. Tokens
//! are immutable once produced by the lexical classifier; case
//! transformation happens at re-emission and never rewrites the raw text, so
//! the original spelling stays available for the alias check.

use crate::span::Span;

/// The lexical category of a token.
///
/// Keyword and type-name classification is case-insensitive against the
/// [`registry`](crate::registry) tables; everything the classifier cannot
/// otherwise recognize degrades to [`TokenKind::Identifier`] or
/// [`TokenKind::Punctuation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved word of the language (`entity`, `begin`, ...).
    Keyword,
    /// A built-in type name (`std_logic`, `integer`, ...).
    TypeName,
    /// A user identifier, including extended identifiers.
    Identifier,
    /// Structural punctuation: parentheses, comma, colon, semicolon, dot,
    /// and the association arrow `=>`.
    Punctuation,
    /// An operator (`<=`, `:=`, `+`, the attribute tick, ...).
    Operator,
    /// An abstract, based, or bit-string literal.
    NumericLiteral,
    /// A string literal, delimiters included.
    StringLiteral,
    /// A character literal such as `'0'`.
    CharacterLiteral,
    /// A line comment (`--` to end of line) or delimited comment.
    Comment,
    /// A line break. Intra-line whitespace is not materialized.
    Newline,
}

/// A single classified token with its raw text and source position.
///
/// Identity is the token's position in the token sequence; `line` and
/// `column` are 1-based and refer to the first character of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    span: Span,
    line: u32,
    column: u32,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            line,
            column,
        }
    }

    /// Get the lexical category.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Get the raw text as written in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the byte span in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the 1-based source line.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Get the 1-based source column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Check whether this token is the given keyword, ignoring case.
    pub fn is_keyword(&self, spelling: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(spelling)
    }

    /// Check whether this token is the given punctuation or operator text.
    pub fn is_symbol(&self, spelling: &str) -> bool {
        matches!(self.kind, TokenKind::Punctuation | TokenKind::Operator) && self.text == spelling
    }

    /// Check whether this token carries layout-relevant content.
    ///
    /// Newlines and comments are not significant: structural decisions key
    /// off the surrounding code tokens only.
    pub fn is_significant(&self) -> bool {
        !matches!(self.kind, TokenKind::Newline | TokenKind::Comment)
    }
}

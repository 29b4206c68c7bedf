//! Token-driven scope tracking.
//!
//! The [`ScopeTracker`] is the single stack machine behind both structural
//! recognition and indentation: it watches parenthesis nesting, design-unit
//! openers, and compound statements, and reports what each token opens or
//! closes. The recognizer turns its events into regions; the layout engine
//! reads its depth for each emitted line.
//!
//! The tracker is deliberately shallow. It never builds an AST and it
//! tolerates malformed pairings: an `end` with nothing open is reported as
//! [`ScopeStep::UnbalancedEnd`] and otherwise ignored, so fragments such as
//! a bare keyword still flow through the formatter.

use vhdlfmt_core::token::{Token, TokenKind};

/// The kind of an open scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Any parenthesized grouping, including generic/port clauses and maps.
    Paren,
    /// An entity interface declaration.
    Entity,
    /// An architecture body.
    Architecture,
    /// A component interface declaration.
    Component,
    /// A package declaration or body.
    Package,
    /// A configuration declaration.
    Configuration,
    /// A process statement.
    Process,
    /// A function or procedure body.
    Subprogram,
    /// An `if ... then` statement.
    If,
    /// A `case` statement.
    Case,
    /// A `loop` statement, including `for` and `while` forms.
    Loop,
    /// A `generate` statement.
    Generate,
    /// A record type definition.
    Record,
    /// A physical type `units` definition.
    Units,
    /// A block statement.
    Block,
    /// A protected type definition or body.
    Protected,
}

/// An open scope and the token index that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// What kind of scope is open.
    pub kind: ScopeKind,
    /// Index of the opening token.
    pub opened_at: usize,
}

/// What a single token did to the scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeStep {
    /// No change.
    None,
    /// The token opened a scope.
    Opened(ScopeKind),
    /// The token closed the given scope.
    Closed(Scope),
    /// A `)` arrived with no open parenthesis; nesting would go negative.
    UnbalancedParen,
    /// An `end` arrived with nothing open; clamped, not fatal.
    UnbalancedEnd,
}

/// Explicit-stack scope machine fed one token at a time.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    stack: Vec<Scope>,
    statement_start: bool,
    prev: Option<(TokenKind, String)>,
}

impl ScopeTracker {
    /// Create a tracker positioned at the start of the input.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            statement_start: true,
            prev: None,
        }
    }

    /// Current nesting depth (open scopes of every kind).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The scopes still open, outermost first.
    pub fn stack(&self) -> &[Scope] {
        &self.stack
    }

    /// Feed the token at `idx` and report what it did.
    ///
    /// Comments and newlines never change the stack. Lookahead (for
    /// subprogram bodies and `if ... generate`) scans forward over
    /// `tokens`, so the full token sequence must be supplied even when the
    /// caller skips some tokens itself.
    pub fn step(&mut self, tokens: &[Token], idx: usize) -> ScopeStep {
        let token = &tokens[idx];
        if !token.is_significant() {
            return ScopeStep::None;
        }

        let at_start = self.statement_start;
        let step = self.apply(tokens, idx, at_start);

        self.statement_start = starts_statement(token);
        self.prev = Some((token.kind(), token.text().to_ascii_lowercase()));

        step
    }

    fn apply(&mut self, tokens: &[Token], idx: usize, at_start: bool) -> ScopeStep {
        let token = &tokens[idx];

        if token.is_symbol("(") {
            return self.open(ScopeKind::Paren, idx);
        }
        if token.is_symbol(")") {
            return match self.stack.last() {
                Some(scope) if scope.kind == ScopeKind::Paren => {
                    let scope = *scope;
                    self.stack.pop();
                    ScopeStep::Closed(scope)
                }
                _ => ScopeStep::UnbalancedParen,
            };
        }
        if token.kind() != TokenKind::Keyword {
            return ScopeStep::None;
        }

        let word = token.text().to_ascii_lowercase();
        match word.as_str() {
            // `end` never closes a parenthesis; inside an unclosed clause
            // it is clamped like any other underflow.
            "end" => match self.stack.last() {
                Some(scope) if scope.kind != ScopeKind::Paren => {
                    let scope = *scope;
                    self.stack.pop();
                    ScopeStep::Closed(scope)
                }
                _ => ScopeStep::UnbalancedEnd,
            },
            "entity" if at_start => self.open(ScopeKind::Entity, idx),
            "architecture" if at_start => self.open(ScopeKind::Architecture, idx),
            "component" if at_start => self.open(ScopeKind::Component, idx),
            "package" if at_start => self.open(ScopeKind::Package, idx),
            "configuration" if at_start => self.open(ScopeKind::Configuration, idx),
            // Processes, if and case statements may carry a label; an
            // `entity` after `:` is a direct instantiation and must not.
            "process"
                if at_start || self.prev_symbol(":") || self.prev_keyword("postponed") =>
            {
                self.open(ScopeKind::Process, idx)
            }
            "function" | "procedure"
                if (at_start || self.prev_keyword("pure") || self.prev_keyword("impure"))
                    && subprogram_has_body(tokens, idx) =>
            {
                self.open(ScopeKind::Subprogram, idx)
            }
            "if" if (at_start || self.prev_symbol(":")) && if_reaches_then(tokens, idx) => {
                self.open(ScopeKind::If, idx)
            }
            "case" if at_start || self.prev_symbol(":") => self.open(ScopeKind::Case, idx),
            "loop" if !self.prev_keyword("end") => self.open(ScopeKind::Loop, idx),
            "generate" if !self.prev_keyword("end") => self.open(ScopeKind::Generate, idx),
            "record" if !self.prev_keyword("end") => self.open(ScopeKind::Record, idx),
            "units" if !self.prev_keyword("end") => self.open(ScopeKind::Units, idx),
            "block" if !self.prev_keyword("end") => self.open(ScopeKind::Block, idx),
            "protected" if !self.prev_keyword("end") => self.open(ScopeKind::Protected, idx),
            _ => ScopeStep::None,
        }
    }

    fn open(&mut self, kind: ScopeKind, idx: usize) -> ScopeStep {
        self.stack.push(Scope {
            kind,
            opened_at: idx,
        });
        ScopeStep::Opened(kind)
    }

    fn prev_keyword(&self, spelling: &str) -> bool {
        matches!(&self.prev, Some((TokenKind::Keyword, text)) if text == spelling)
    }

    fn prev_symbol(&self, spelling: &str) -> bool {
        matches!(
            &self.prev,
            Some((TokenKind::Punctuation | TokenKind::Operator, text)) if text == spelling
        )
    }
}

/// Does the next statement begin after this token?
fn starts_statement(token: &Token) -> bool {
    if token.is_symbol(";") || token.is_symbol("(") {
        return true;
    }
    ["is", "begin", "then", "else", "loop", "generate"]
        .iter()
        .any(|kw| token.is_keyword(kw))
}

/// Scan forward from a `function`/`procedure` keyword: does the header end
/// in `is` (a body follows) rather than `;` (a mere declaration)?
fn subprogram_has_body(tokens: &[Token], idx: usize) -> bool {
    let mut depth = 0usize;
    for token in &tokens[idx + 1..] {
        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth = depth.saturating_sub(1);
        } else if depth == 0 {
            if token.is_symbol(";") {
                return false;
            }
            if token.is_keyword("is") {
                return true;
            }
        }
    }
    false
}

/// Scan forward from an `if` keyword: does the condition end in `then`?
///
/// `if ... generate` statements open their scope at the `generate` keyword
/// instead, and a condition that never completes opens nothing.
fn if_reaches_then(tokens: &[Token], idx: usize) -> bool {
    let mut depth = 0usize;
    for token in &tokens[idx + 1..] {
        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth = depth.saturating_sub(1);
        } else if depth == 0 {
            if token.is_keyword("then") {
                return true;
            }
            if token.is_keyword("generate") || token.is_symbol(";") {
                return false;
            }
        }
    }
    false
}

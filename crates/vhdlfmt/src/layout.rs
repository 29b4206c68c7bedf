//! Line structure and indentation.
//!
//! The layout engine owns two decisions. First, where lines break: the
//! source's own newlines are the baseline, adjusted at the five policy
//! points (`then`, `else`, statement-terminating `;`, and the opening
//! parenthesis of generic/port clauses and maps). Second, how deep each
//! line is indented: an integer depth read off the scope tracker, with
//! closing tokens printed one level shallower than their contents.
//!
//! The semicolon policy applies only at parenthesis depth zero; the
//! separators inside a generic or port list keep the source's own line
//! structure. For the clause openers, `no_new_line` is passive: it never
//! joins breaks the author wrote, it only refrains from forcing one.

use std::collections::HashMap;

use vhdlfmt_core::{
    config::{FormatterConfig, NewlineMode},
    token::{Token, TokenKind},
};
use vhdlfmt_parser::{Region, RegionKind, ScopeTracker};

/// One output line: token indices plus the indentation depth it prints at.
/// An empty token list is a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Line {
    pub tokens: Vec<usize>,
    pub depth: usize,
}

/// Split the surviving tokens into output lines.
///
/// Original newlines are preserved except where a policy point forces or
/// joins a break. Lines whose entire content was filtered away disappear;
/// runs of blank lines collapse to one; leading and trailing blanks are
/// dropped.
pub(crate) fn break_lines(
    tokens: &[Token],
    keep: &[bool],
    regions: &[Region],
    config: &FormatterConfig,
) -> Vec<Line> {
    let clause_parens = clause_open_parens(tokens, regions, config);

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut paren_depth = 0usize;
    let mut line_had_filtered = false;
    let mut join_next_break = false;
    let mut swallow_next_break = false;

    for (idx, token) in tokens.iter().enumerate() {
        if !keep[idx] {
            if token.kind() != TokenKind::Newline {
                line_had_filtered = true;
            }
            continue;
        }

        if token.kind() == TokenKind::Newline {
            if join_next_break {
                // joined onto the previous line; consecutive breaks collapse
                continue;
            }
            if swallow_next_break {
                // the forced break already ended this line
                swallow_next_break = false;
                continue;
            }
            if current.is_empty() && line_had_filtered {
                // the line's only content was filtered away
                line_had_filtered = false;
                continue;
            }
            lines.push(Line {
                tokens: std::mem::take(&mut current),
                depth: 0,
            });
            line_had_filtered = false;
            continue;
        }

        current.push(idx);
        swallow_next_break = false;
        join_next_break = false;

        if token.is_symbol("(") {
            paren_depth += 1;
        } else if token.is_symbol(")") {
            paren_depth = paren_depth.saturating_sub(1);
        }

        let policy = policy_at(token, idx, paren_depth, &clause_parens, config);
        match policy {
            // A trailing comment stays attached to its marker; the line
            // comment runs to the end of the line, so the source's own
            // break supplies the forced one.
            Some(NewlineMode::NewLine) if !followed_by_trailing_comment(tokens, keep, idx) => {
                lines.push(Line {
                    tokens: std::mem::take(&mut current),
                    depth: 0,
                });
                line_had_filtered = false;
                swallow_next_break = true;
            }
            Some(NewlineMode::NewLine) => {}
            Some(NewlineMode::NoNewLine) => {
                // clause openers never join; then/else/; actively do
                if !clause_parens.contains_key(&idx) {
                    join_next_break = true;
                }
            }
            None => {}
        }
    }

    if !current.is_empty() {
        lines.push(Line {
            tokens: current,
            depth: 0,
        });
    }

    tidy_blank_lines(lines)
}

/// Assign the indentation depth every line prints at.
///
/// A line whose first token closes something (`)`, `end`) or re-anchors a
/// scope (`begin`, `else`, `elsif`) prints one level shallower than the
/// open nesting. Depth never goes negative; a close that would underflow
/// is clamped to zero for that line.
pub(crate) fn assign_depths(lines: &mut [Line], tokens: &[Token]) {
    let mut tracker = ScopeTracker::new();

    for line in lines.iter_mut() {
        let Some(&first) = line.tokens.first() else {
            line.depth = 0;
            continue;
        };

        line.depth = if dedents_own_line(&tokens[first]) {
            tracker.depth().saturating_sub(1)
        } else {
            tracker.depth()
        };

        for &idx in &line.tokens {
            let _ = tracker.step(tokens, idx);
        }
    }
}

fn dedents_own_line(token: &Token) -> bool {
    token.is_symbol(")")
        || token.is_keyword("end")
        || token.is_keyword("begin")
        || token.is_keyword("else")
        || token.is_keyword("elsif")
}

/// Is the next surviving token on this source line a comment?
fn followed_by_trailing_comment(tokens: &[Token], keep: &[bool], idx: usize) -> bool {
    for (offset, token) in tokens[idx + 1..].iter().enumerate() {
        if !keep[idx + 1 + offset] {
            continue;
        }
        return token.kind() == TokenKind::Comment;
    }
    false
}

/// The newline policy triggered by this token, if any.
fn policy_at(
    token: &Token,
    idx: usize,
    paren_depth: usize,
    clause_parens: &HashMap<usize, NewlineMode>,
    config: &FormatterConfig,
) -> Option<NewlineMode> {
    if let Some(mode) = clause_parens.get(&idx) {
        return Some(*mode);
    }
    if token.is_symbol(";") && paren_depth == 0 {
        return Some(config.new_line_after_semicolon);
    }
    if token.is_keyword("then") {
        return Some(config.new_line_after_then);
    }
    if token.is_keyword("else") {
        return Some(config.new_line_after_else);
    }
    None
}

/// The opening parenthesis of every generic/port clause and map, with the
/// newline option that governs it.
fn clause_open_parens(
    tokens: &[Token],
    regions: &[Region],
    config: &FormatterConfig,
) -> HashMap<usize, NewlineMode> {
    let mut parens = HashMap::new();
    for region in regions {
        let mode = match region.kind() {
            RegionKind::GenericClause | RegionKind::GenericMap => config.new_line_after_generic,
            RegionKind::PortClause | RegionKind::PortMap => config.new_line_after_port,
            _ => continue,
        };
        let open = (region.start()..region.end().min(tokens.len()))
            .find(|&idx| tokens[idx].is_symbol("("));
        if let Some(open) = open {
            parens.insert(open, mode);
        }
    }
    parens
}

fn tidy_blank_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut tidied: Vec<Line> = Vec::new();
    for line in lines {
        if line.tokens.is_empty() && tidied.last().is_none_or(|last| last.tokens.is_empty()) {
            continue;
        }
        tidied.push(line);
    }
    while tidied.last().is_some_and(|last| last.tokens.is_empty()) {
        tidied.pop();
    }
    tidied
}

//! Re-emission: one linear pass from lines back to text.
//!
//! Emission is where every earlier decision lands: the indentation prefix
//! from the layout engine, the spelling from the case transformer, the
//! padding from the alignment plan, and canonical single-space gaps
//! everywhere else. Token order and content are never altered here.

use vhdlfmt_core::{
    config::FormatterConfig,
    token::{Token, TokenKind},
};

use crate::{
    align::{AlignPlan, AnchorPad},
    case,
    layout::Line,
};

/// Assemble the final text.
pub(crate) fn emit(
    tokens: &[Token],
    lines: &[Line],
    config: &FormatterConfig,
    plan: &AlignPlan,
    trailing_newline: bool,
) -> String {
    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&render_line(
            tokens,
            line,
            config,
            plan.anchor_for(index),
            plan.comment_column_for(index),
        ));
    }
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Render one full line, trailing comment included.
pub(crate) fn render_line(
    tokens: &[Token],
    line: &Line,
    config: &FormatterConfig,
    anchor: Option<&AnchorPad>,
    comment_column: Option<usize>,
) -> String {
    let (mut out, mut width, trailing) = render_code(tokens, line, config, anchor);

    if let Some(comment) = trailing {
        let target = comment_column.unwrap_or(width + 1).max(width + 1);
        while width < target {
            out.push(' ');
            width += 1;
        }
        out.push_str(tokens[comment].text());
    }

    out
}

/// Render the code part of a line: indentation prefix, case-transformed
/// token text, canonical gaps, and alignment padding. Returns the rendered
/// text, its width in characters, and the trailing comment token, if any.
///
/// The width is what the alignment engine measures against, so it must
/// account for everything that lands left of a potential trailing comment.
pub(crate) fn render_code(
    tokens: &[Token],
    line: &Line,
    config: &FormatterConfig,
    anchor: Option<&AnchorPad>,
) -> (String, usize, Option<usize>) {
    if line.tokens.is_empty() {
        return (String::new(), 0, None);
    }

    let (code, trailing) = match line.tokens.split_last() {
        Some((&last, rest)) if tokens[last].kind() == TokenKind::Comment && !rest.is_empty() => {
            (rest, Some(last))
        }
        _ => (line.tokens.as_slice(), None),
    };

    let mut out = config.indentation.repeat(line.depth);
    let mut width = out.chars().count();
    let mut prev: Option<&Token> = None;
    let mut prev_before: Option<&Token> = None;

    for &idx in code {
        let token = &tokens[idx];
        if prev.is_some() {
            if let Some(pad) = anchor {
                if pad.token == idx {
                    while width < pad.column {
                        out.push(' ');
                        width += 1;
                    }
                }
            }
        }
        if let Some(p) = prev {
            if needs_gap(p, token, prev_before) {
                out.push(' ');
                width += 1;
            }
        }

        let text = case::rendered(token, config);
        width += text.chars().count();
        out.push_str(&text);

        prev_before = prev;
        prev = Some(token);
    }

    (out, width, trailing)
}

/// Measure the rendered width of a run of tokens with canonical gaps and
/// no indentation. Case transformation never changes ASCII width, so the
/// raw text length is the rendered length.
pub(crate) fn measure(tokens: &[Token], indices: &[usize]) -> usize {
    let mut width = 0;
    let mut prev: Option<&Token> = None;
    let mut prev_before: Option<&Token> = None;
    for &idx in indices {
        let token = &tokens[idx];
        if let Some(p) = prev {
            if needs_gap(p, token, prev_before) {
                width += 1;
            }
        }
        width += token.text().chars().count();
        prev_before = prev;
        prev = Some(token);
    }
    width
}

/// Decide whether a single space separates two adjacent tokens.
///
/// `prev_before` (the token before `prev`) disambiguates unary signs.
fn needs_gap(prev: &Token, cur: &Token, prev_before: Option<&Token>) -> bool {
    let p = prev.text();
    let c = cur.text();

    // Separators and closers attach to what precedes them.
    if matches!(c, ")" | "," | ";" | ".") && cur.kind() == TokenKind::Punctuation {
        return false;
    }
    // Nothing follows an opener or a selection dot at a distance.
    if matches!(p, "(" | ".") && prev.kind() == TokenKind::Punctuation {
        return false;
    }
    // The attribute tick binds tightly on both sides.
    if p == "'" && prev.kind() == TokenKind::Operator {
        return false;
    }
    if c == "'" && cur.kind() == TokenKind::Operator {
        return false;
    }
    // Calls and indexed names keep their parenthesis attached; keywords
    // (`port (`, `map (`) and operators keep a space.
    if c == "(" && cur.kind() == TokenKind::Punctuation {
        return match prev.kind() {
            TokenKind::Keyword => true,
            TokenKind::Identifier
            | TokenKind::TypeName
            | TokenKind::NumericLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharacterLiteral => false,
            _ => p != ")",
        };
    }
    // A sign binds to its operand when it cannot be a binary operator.
    if matches!(p, "+" | "-") && prev.kind() == TokenKind::Operator {
        let unary = match prev_before {
            None => true,
            Some(before) => match before.kind() {
                TokenKind::Operator | TokenKind::Keyword => true,
                TokenKind::Punctuation => before.text() != ")",
                _ => false,
            },
        };
        if unary {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhdlfmt_core::span::Span;

    fn tokens_from(pairs: &[(TokenKind, &str)]) -> Vec<Token> {
        pairs
            .iter()
            .map(|(kind, text)| Token::new(*kind, *text, Span::new(0..text.len()), 1, 1))
            .collect()
    }

    fn rendered(pairs: &[(TokenKind, &str)]) -> String {
        let tokens = tokens_from(pairs);
        let line = Line {
            tokens: (0..tokens.len()).collect(),
            depth: 0,
        };
        render_line(&tokens, &line, &FormatterConfig::default(), None, None)
    }

    use TokenKind::*;

    #[test]
    fn test_punctuation_attachment() {
        assert_eq!(
            rendered(&[
                (Identifier, "clk"),
                (Punctuation, ":"),
                (Keyword, "in"),
                (TypeName, "std_ulogic"),
                (Punctuation, ";"),
            ]),
            "clk : in std_ulogic;"
        );
    }

    #[test]
    fn test_close_paren_and_semicolon_attach() {
        assert_eq!(
            rendered(&[
                (NumericLiteral, "8"),
                (Punctuation, ")"),
                (Punctuation, ";"),
            ]),
            "8);"
        );
    }

    #[test]
    fn test_keyword_keeps_space_before_paren() {
        assert_eq!(
            rendered(&[(Keyword, "port"), (Punctuation, "(")]),
            "port ("
        );
    }

    #[test]
    fn test_call_attaches_paren() {
        assert_eq!(
            rendered(&[
                (Identifier, "rising_edge"),
                (Punctuation, "("),
                (Identifier, "clk"),
                (Punctuation, ")"),
            ]),
            "rising_edge(clk)"
        );
    }

    #[test]
    fn test_attribute_tick_binds() {
        assert_eq!(
            rendered(&[(Identifier, "clk"), (Operator, "'"), (Identifier, "event")]),
            "clk'event"
        );
    }

    #[test]
    fn test_selection_dot_binds() {
        assert_eq!(
            rendered(&[
                (Identifier, "work"),
                (Punctuation, "."),
                (Identifier, "pkg"),
            ]),
            "work.pkg"
        );
    }

    #[test]
    fn test_unary_sign_binds_after_assignment() {
        assert_eq!(
            rendered(&[
                (Identifier, "a"),
                (Operator, ":="),
                (Operator, "-"),
                (NumericLiteral, "1"),
                (Punctuation, ";"),
            ]),
            "a := -1;"
        );
    }

    #[test]
    fn test_binary_minus_keeps_spaces() {
        assert_eq!(
            rendered(&[
                (Identifier, "a"),
                (Operator, "-"),
                (NumericLiteral, "1"),
            ]),
            "a - 1"
        );
    }

    #[test]
    fn test_trailing_comment_gets_single_space() {
        assert_eq!(
            rendered(&[
                (Identifier, "a"),
                (Punctuation, ";"),
                (Comment, "-- note"),
            ]),
            "a; -- note"
        );
    }

    #[test]
    fn test_indentation_prefix() {
        let tokens = tokens_from(&[(Identifier, "a"), (Punctuation, ";")]);
        let line = Line {
            tokens: vec![0, 1],
            depth: 2,
        };
        let config = FormatterConfig {
            indentation: "  ".to_string(),
            ..FormatterConfig::default()
        };
        assert_eq!(render_line(&tokens, &line, &config, None, None), "    a;");
    }

    #[test]
    fn test_measure_matches_render() {
        let tokens = tokens_from(&[
            (Identifier, "clk"),
            (Punctuation, ":"),
            (Keyword, "in"),
            (TypeName, "std_ulogic"),
        ]);
        let indices: Vec<usize> = (0..tokens.len()).collect();
        let line = Line {
            tokens: indices.clone(),
            depth: 0,
        };
        let text = render_line(&tokens, &line, &FormatterConfig::default(), None, None);
        assert_eq!(measure(&tokens, &indices), text.chars().count());
    }
}

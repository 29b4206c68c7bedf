//! Column alignment for clause declarations, map associations, and
//! trailing comments.
//!
//! The engine computes a column-assignment plan over the laid-out lines;
//! the emitter applies it as purely additive whitespace. Groups are maximal
//! contiguous runs: a blank line, a comment-only line, or the closing
//! parenthesis of the clause terminates a group, and a group of one line
//! pads nothing because its own width is the column.

use std::collections::HashMap;

use vhdlfmt_core::{
    config::FormatterConfig,
    token::{Token, TokenKind},
};
use vhdlfmt_parser::{Region, RegionKind};

use crate::{emit, layout::Line};

/// The padding applied to one line: at `token`, pad the rendered line out
/// to `column` before the usual gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnchorPad {
    pub token: usize,
    pub column: usize,
}

/// The complete column-assignment plan for one formatting call.
#[derive(Debug, Default)]
pub(crate) struct AlignPlan {
    anchor: HashMap<usize, AnchorPad>,
    comment_column: HashMap<usize, usize>,
}

impl AlignPlan {
    pub(crate) fn anchor_for(&self, line: usize) -> Option<&AnchorPad> {
        self.anchor.get(&line)
    }

    pub(crate) fn comment_column_for(&self, line: usize) -> Option<usize> {
        self.comment_column.get(&line).copied()
    }
}

/// Compute the alignment plan for the laid-out lines.
pub(crate) fn plan(
    tokens: &[Token],
    regions: &[Region],
    lines: &[Line],
    config: &FormatterConfig,
) -> AlignPlan {
    let mut plan = AlignPlan::default();

    if config.align_port_generic {
        for region in regions {
            let anchor_text = match region.kind() {
                RegionKind::GenericClause | RegionKind::PortClause => ":",
                RegionKind::GenericMap | RegionKind::PortMap => "=>",
                _ => continue,
            };
            align_region(tokens, lines, config, region, anchor_text, &mut plan);
        }
    }

    if config.align_comment {
        align_trailing_comments(tokens, lines, config, &mut plan);
    }

    plan
}

/// Align the anchor column inside one clause or map region.
fn align_region(
    tokens: &[Token],
    lines: &[Line],
    config: &FormatterConfig,
    region: &Region,
    anchor_text: &str,
    plan: &mut AlignPlan,
) {
    let Some(open) = (region.start()..region.end().min(tokens.len()))
        .find(|&idx| tokens[idx].is_symbol("("))
    else {
        return;
    };
    let close = region.end() - 1;

    let indent_unit = config.indentation.chars().count();
    let mut group: Vec<(usize, AnchorPad)> = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let Some(&first) = line.tokens.first() else {
            // blank line
            flush_group(&mut group, plan);
            continue;
        };
        if first <= open {
            continue;
        }
        if first > close {
            flush_group(&mut group, plan);
            break;
        }
        if tokens[first].is_symbol(")") || comment_only(tokens, line) {
            flush_group(&mut group, plan);
            continue;
        }

        let Some(position) = anchor_position(tokens, line, anchor_text, close) else {
            continue;
        };
        let left_width = emit::measure(tokens, &line.tokens[..position]);
        let column = indent_unit * line.depth + left_width;
        group.push((
            line_index,
            AnchorPad {
                token: line.tokens[position],
                column,
            },
        ));
    }

    flush_group(&mut group, plan);
}

fn flush_group(group: &mut Vec<(usize, AnchorPad)>, plan: &mut AlignPlan) {
    if let Some(column) = group.iter().map(|(_, pad)| pad.column).max() {
        for (line_index, pad) in group.drain(..) {
            plan.anchor.insert(
                line_index,
                AnchorPad {
                    token: pad.token,
                    column,
                },
            );
        }
    }
}

/// Find the anchor token on a line, at parenthesis depth zero relative to
/// the line and strictly inside the clause parentheses.
fn anchor_position(
    tokens: &[Token],
    line: &Line,
    anchor_text: &str,
    close: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (position, &idx) in line.tokens.iter().enumerate() {
        let token = &tokens[idx];
        if token.is_symbol("(") {
            depth += 1;
        } else if token.is_symbol(")") {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && idx < close && token.is_symbol(anchor_text) && position > 0 {
            return Some(position);
        }
    }
    None
}

fn comment_only(tokens: &[Token], line: &Line) -> bool {
    !line.tokens.is_empty()
        && line
            .tokens
            .iter()
            .all(|&idx| tokens[idx].kind() == TokenKind::Comment)
}

/// Align trailing comments across contiguous blocks of code lines to one
/// column just past the widest code on any line in the block.
fn align_trailing_comments(
    tokens: &[Token],
    lines: &[Line],
    config: &FormatterConfig,
    plan: &mut AlignPlan,
) {
    let mut block: Vec<(usize, bool, usize)> = Vec::new(); // (line, has comment, width)

    let mut flush = |block: &mut Vec<(usize, bool, usize)>, plan: &mut AlignPlan| {
        if block.iter().any(|&(_, has_comment, _)| has_comment) {
            let widest = block.iter().map(|&(_, _, width)| width).max().unwrap_or(0);
            for (line_index, has_comment, _) in block.drain(..) {
                if has_comment {
                    plan.comment_column.insert(line_index, widest + 1);
                }
            }
        } else {
            block.clear();
        }
    };

    for (line_index, line) in lines.iter().enumerate() {
        if line.tokens.is_empty() || comment_only(tokens, line) {
            flush(&mut block, plan);
            continue;
        }
        let anchor = plan.anchor.get(&line_index).copied();
        let (_, width, trailing) = emit::render_code(tokens, line, config, anchor.as_ref());
        block.push((line_index, trailing.is_some(), width));
    }

    flush(&mut block, plan);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use vhdlfmt_parser::{classify, recognize};

    fn planned(source: &str, config: &FormatterConfig) -> (Vec<Token>, Vec<Line>, AlignPlan) {
        let tokens = classify(source).unwrap();
        let regions = recognize(&tokens).unwrap();
        let keep = vec![true; tokens.len()];
        let mut lines = layout::break_lines(&tokens, &keep, &regions, config);
        layout::assign_depths(&mut lines, &tokens);
        let plan = plan(&tokens, &regions, &lines, config);
        (tokens, lines, plan)
    }

    #[test]
    fn test_port_declarations_share_a_column() {
        let source = "\
entity e is\n\
port (\n\
clk : in std_ulogic;\n\
reset_n : in std_ulogic\n\
);\n\
end;\n";
        let (_, _, plan) = planned(source, &FormatterConfig::default());

        let clk = plan.anchor_for(2).expect("clk line is aligned");
        let reset = plan.anchor_for(3).expect("reset line is aligned");
        assert_eq!(clk.column, reset.column);
        // indent (2 levels of two spaces) plus the widest name, `reset_n`
        assert_eq!(reset.column, 4 + 7);
    }

    #[test]
    fn test_alignment_disabled_plans_nothing() {
        let source = "\
entity e is\n\
port (\n\
clk : in std_ulogic;\n\
reset_n : in std_ulogic\n\
);\n\
end;\n";
        let config = FormatterConfig {
            align_port_generic: false,
            ..FormatterConfig::default()
        };
        let (_, lines, plan) = planned(source, &config);
        for index in 0..lines.len() {
            assert!(plan.anchor_for(index).is_none());
        }
    }

    #[test]
    fn test_blank_line_splits_groups() {
        let source = "\
entity e is\n\
port (\n\
a : in bit;\n\
\n\
long_name : in bit\n\
);\n\
end;\n";
        let (_, lines, plan) = planned(source, &FormatterConfig::default());

        let a_line = lines
            .iter()
            .position(|l| !l.tokens.is_empty() && l.tokens.len() >= 4 && l.depth == 2)
            .unwrap();
        let a = plan.anchor_for(a_line).expect("first group is aligned");
        // `a` sits alone in its group, so its column is its own width.
        assert_eq!(a.column, 4 + 1);
    }

    #[test]
    fn test_map_associations_align_on_arrow() {
        let source = "\
inst : dummy\n\
port map (\n\
clk => clk,\n\
reset_n => reset_n\n\
);\n";
        let (tokens, _, plan) = planned(source, &FormatterConfig::default());

        let clk = plan.anchor_for(2).expect("clk association is aligned");
        let reset = plan.anchor_for(3).expect("reset association is aligned");
        assert_eq!(clk.column, reset.column);
        assert!(tokens[clk.token].is_symbol("=>"));
    }

    #[test]
    fn test_trailing_comments_align_to_widest_code() {
        let source = "\
a <= b; -- short\n\
longer_name <= c; -- long\n";
        let config = FormatterConfig {
            align_comment: true,
            ..FormatterConfig::default()
        };
        let (_, _, plan) = planned(source, &config);

        let first = plan.comment_column_for(0).expect("first comment aligned");
        let second = plan.comment_column_for(1).expect("second comment aligned");
        assert_eq!(first, second);
        assert_eq!(first, "longer_name <= c;".len() + 1);
    }

    #[test]
    fn test_comment_alignment_disabled_by_default() {
        let source = "a <= b; -- short\n";
        let (_, _, plan) = planned(source, &FormatterConfig::default());
        assert!(plan.comment_column_for(0).is_none());
    }
}

//! Structural recognizer: tokens to layout-relevant regions.
//!
//! A single-pass, explicit-stack scan over the token sequence. It pairs
//! parentheses, watches the fixed syntactic anchors the layout engine cares
//! about (`entity`, `architecture`, `process`, `generic`/`port` clauses and
//! maps, `report`, comments), and chunks everything else into
//! semicolon-delimited plain statements. No AST is built; constructs the
//! recognizer does not model degrade to plain statements instead of
//! failing, which keeps the formatter robust on nonstandard input.
//!
//! The only fatal conditions are a closing parenthesis with nothing open
//! and a clause still open at end of input. An `end` with nothing open is
//! clamped, so fragments like a lone keyword still recognize.

use std::collections::HashMap;

use log::trace;

use vhdlfmt_core::{
    diagnostic::{Diagnostic, ErrorCode},
    span::Span,
    token::{Token, TokenKind},
};

use crate::{
    error::StructuralError,
    region::{Region, RegionKind},
    scope::{ScopeKind, ScopeStep, ScopeTracker},
};

/// An open parenthesis and, when it opens a generic/port clause or map,
/// the region that will close with it.
#[derive(Debug, Clone, Copy)]
struct OpenParen {
    token: usize,
    clause: Option<(RegionKind, usize)>,
}

/// Walk the token sequence and produce the flat region outline.
///
/// Regions are returned ordered by start index, parents before children,
/// with nesting depth and parent links assigned.
///
/// # Errors
///
/// Returns [`StructuralError`] when a `)` has no matching open parenthesis
/// (code `E101`) or a parenthesized clause is still open at end of input
/// (code `E102`).
pub fn recognize(tokens: &[Token]) -> Result<Vec<Region>, StructuralError> {
    let mut tracker = ScopeTracker::new();
    let mut regions: Vec<Region> = Vec::new();
    let mut parens: Vec<OpenParen> = Vec::new();

    let mut stmt_start: Option<usize> = None;
    let mut stmt_has_map = false;
    let mut pending_unit: Option<(RegionKind, usize)> = None;
    // Where each open design unit's region starts: the statement start, so
    // a labeled process region covers its label too.
    let mut unit_starts: HashMap<usize, usize> = HashMap::new();

    for (idx, token) in tokens.iter().enumerate() {
        match token.kind() {
            TokenKind::Comment => {
                regions.push(Region::new(RegionKind::Comment, idx, idx + 1));
                continue;
            }
            TokenKind::Newline => continue,
            _ => {}
        }

        // Closers and separators never begin a statement; a trailing `;`
        // after a clause's `)` belongs to the construct, not a new span.
        if stmt_start.is_none()
            && !token.is_symbol(")")
            && !token.is_symbol(";")
            && !token.is_symbol(",")
        {
            stmt_start = Some(idx);
            stmt_has_map = false;
        }

        if token.is_symbol("(") {
            let clause = clause_kind_at(tokens, idx);
            if let Some((_, keyword_idx)) = clause {
                // A clause that opens its own statement is covered by the
                // clause region; an instantiation's statement stays open
                // across its maps.
                if stmt_start == Some(keyword_idx) {
                    stmt_start = None;
                }
            }
            parens.push(OpenParen {
                token: idx,
                clause,
            });
        }

        match tracker.step(tokens, idx) {
            ScopeStep::UnbalancedParen => {
                return Err(StructuralError::new(
                    Diagnostic::error("unbalanced closing parenthesis")
                        .with_code(ErrorCode::E101)
                        .with_label(token.span(), "no matching `(` for this"),
                ));
            }
            ScopeStep::Closed(scope) if scope.kind == ScopeKind::Paren => {
                if let Some(open) = parens.pop() {
                    if let Some((kind, keyword_idx)) = open.clause {
                        // The last declaration in a clause may lack its own
                        // semicolon; the closing parenthesis ends it.
                        if let Some(start) = stmt_start {
                            if start > open.token {
                                regions.push(statement_region(tokens, start, idx, stmt_has_map));
                                stmt_start = None;
                            }
                        }
                        regions.push(Region::new(kind, keyword_idx, idx + 1));
                    }
                }
            }
            ScopeStep::Closed(scope) => {
                if let Some(kind) = unit_region_kind(scope.kind) {
                    let start = unit_starts
                        .remove(&scope.opened_at)
                        .unwrap_or(scope.opened_at);
                    pending_unit = Some((kind, start));
                }
            }
            ScopeStep::Opened(kind) if unit_region_kind(kind).is_some() => {
                unit_starts.insert(idx, stmt_start.unwrap_or(idx));
            }
            _ => {}
        }

        if token.is_keyword("map") {
            stmt_has_map = true;
        }

        if token.is_symbol(";") {
            if let Some(start) = stmt_start.take() {
                regions.push(statement_region(tokens, start, idx + 1, stmt_has_map));
            }
            if let Some((kind, start)) = pending_unit.take() {
                regions.push(Region::new(kind, start, idx + 1));
            }
        } else if is_statement_boundary(token) {
            if let Some(start) = stmt_start.take() {
                regions.push(statement_region(tokens, start, idx + 1, stmt_has_map));
            }
        }
    }

    if let Some(open) = parens.last() {
        let open_token = &tokens[open.token];
        let end = tokens.last().map(|t| t.span().end()).unwrap_or(0);
        return Err(StructuralError::new(
            Diagnostic::error("unterminated clause at end of input")
                .with_code(ErrorCode::E102)
                .with_label(open_token.span(), "clause opened here")
                .with_secondary_label(Span::new(end..end), "input ends here")
                .with_help("add closing `)`"),
        ));
    }

    // Whatever is still open closes, degraded, at end of input so that
    // fragments format successfully.
    if let Some(start) = stmt_start.take() {
        regions.push(statement_region(tokens, start, tokens.len(), stmt_has_map));
    }
    if let Some((kind, start)) = pending_unit.take() {
        regions.push(Region::new(kind, start, tokens.len()));
    }
    for scope in tracker.stack() {
        if let Some(kind) = unit_region_kind(scope.kind) {
            let start = unit_starts
                .get(&scope.opened_at)
                .copied()
                .unwrap_or(scope.opened_at);
            regions.push(Region::new(kind, start, tokens.len()));
        }
    }

    assign_nesting(&mut regions);
    trace!(region_count = regions.len(); "Structure recognized");
    Ok(regions)
}

/// Decide what clause, if any, the `(` at `idx` opens by looking back at
/// the preceding significant tokens.
fn clause_kind_at(tokens: &[Token], idx: usize) -> Option<(RegionKind, usize)> {
    let (prev_idx, prev) = previous_significant(tokens, idx)?;
    if prev.is_keyword("generic") {
        return Some((RegionKind::GenericClause, prev_idx));
    }
    if prev.is_keyword("port") {
        return Some((RegionKind::PortClause, prev_idx));
    }
    if prev.is_keyword("map") {
        let (before_idx, before) = previous_significant(tokens, prev_idx)?;
        if before.is_keyword("generic") {
            return Some((RegionKind::GenericMap, before_idx));
        }
        if before.is_keyword("port") {
            return Some((RegionKind::PortMap, before_idx));
        }
    }
    None
}

fn previous_significant(tokens: &[Token], idx: usize) -> Option<(usize, &Token)> {
    tokens[..idx]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| t.is_significant())
}

/// Keywords that end the statement they appear in, besides `;`.
fn is_statement_boundary(token: &Token) -> bool {
    ["is", "then", "begin", "else", "loop", "generate"]
        .iter()
        .any(|kw| token.is_keyword(kw))
}

fn statement_region(tokens: &[Token], start: usize, end: usize, has_map: bool) -> Region {
    let kind = if tokens[start].is_keyword("report") {
        RegionKind::ReportStatement
    } else if has_map {
        RegionKind::Instantiation
    } else {
        RegionKind::PlainStatement
    };
    Region::new(kind, start, end)
}

/// The region a closed design-unit scope produces, if any.
///
/// Compound statements (if/case/loop/...) shape indentation but are not
/// part of the region taxonomy; component declarations share the entity
/// interface kind.
fn unit_region_kind(kind: ScopeKind) -> Option<RegionKind> {
    match kind {
        ScopeKind::Entity | ScopeKind::Component => Some(RegionKind::EntityDecl),
        ScopeKind::Architecture => Some(RegionKind::ArchitectureBody),
        ScopeKind::Process => Some(RegionKind::ProcessBlock),
        _ => None,
    }
}

/// Sort the flat region list and assign nesting depth and parent links.
///
/// Regions are properly nested by construction, so ordering by start index
/// (ties broken widest-first) puts every parent before its children and a
/// single sweep with a stack recovers the tree.
fn assign_nesting(regions: &mut [Region]) {
    regions.sort_by(|a, b| {
        a.start()
            .cmp(&b.start())
            .then_with(|| b.end().cmp(&a.end()))
    });

    let mut stack: Vec<usize> = Vec::new();
    for idx in 0..regions.len() {
        while let Some(&top) = stack.last() {
            if regions[top].end() <= regions[idx].start() {
                stack.pop();
            } else {
                break;
            }
        }
        let parent = stack.last().copied();
        regions[idx].set_nesting(stack.len(), parent);
        stack.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::classify;

    fn recognized(source: &str) -> (Vec<Token>, Vec<Region>) {
        let tokens = classify(source).expect("classification should succeed");
        let regions = recognize(&tokens).expect("recognition should succeed");
        (tokens, regions)
    }

    fn kinds(regions: &[Region]) -> Vec<RegionKind> {
        regions.iter().map(|r| r.kind()).collect()
    }

    #[test]
    fn test_entity_with_clauses() {
        let source = "\
entity dummy is\n\
generic (\n\
WIDTH : integer := 8);\n\
port (\n\
clk : in std_ulogic;\n\
reset_n : in std_ulogic\n\
);\n\
end;\n";
        let (tokens, regions) = recognized(source);

        let entity = regions
            .iter()
            .find(|r| r.kind() == RegionKind::EntityDecl)
            .expect("entity region");
        assert_eq!(entity.start(), 0);
        assert_eq!(entity.depth(), 0);

        let generic = regions
            .iter()
            .find(|r| r.kind() == RegionKind::GenericClause)
            .expect("generic clause");
        assert!(tokens[generic.start()].is_keyword("generic"));
        assert!(tokens[generic.end() - 1].is_symbol(")"));
        assert_eq!(generic.parent(), Some(0));

        let port = regions
            .iter()
            .find(|r| r.kind() == RegionKind::PortClause)
            .expect("port clause");
        assert!(tokens[port.start()].is_keyword("port"));
        assert_eq!(port.depth(), 1);
    }

    #[test]
    fn test_instantiation_with_maps() {
        let source = "\
inst : dummy2\n\
generic map (\n\
WIDTH => WIDTH\n\
) port map (\n\
clk => clk\n\
);\n";
        let (_, regions) = recognized(source);

        let inst = regions
            .iter()
            .find(|r| r.kind() == RegionKind::Instantiation)
            .expect("instantiation region");
        assert_eq!(inst.start(), 0);

        let maps: Vec<_> = regions
            .iter()
            .filter(|r| matches!(r.kind(), RegionKind::GenericMap | RegionKind::PortMap))
            .collect();
        assert_eq!(maps.len(), 2);
        for map in maps {
            assert_eq!(map.depth(), 1);
            assert_eq!(regions[map.parent().unwrap()].kind(), RegionKind::Instantiation);
        }
    }

    #[test]
    fn test_comments_become_regions() {
        let (_, regions) = recognized("-- standalone\nsig <= '1'; -- trailing\n");
        assert_eq!(
            regions
                .iter()
                .filter(|r| r.kind() == RegionKind::Comment)
                .count(),
            2
        );
    }

    #[test]
    fn test_report_statement() {
        let (_, regions) = recognized("report \"boom\" severity note;\nsig <= '1';\n");
        assert_eq!(
            kinds(&regions),
            vec![RegionKind::ReportStatement, RegionKind::PlainStatement]
        );
    }

    #[test]
    fn test_assert_degrades_to_plain_statement() {
        let (_, regions) = recognized("assert ok report \"bad\" severity error;\n");
        assert_eq!(kinds(&regions), vec![RegionKind::PlainStatement]);
    }

    #[test]
    fn test_architecture_and_process() {
        let source = "\
architecture rtl of dummy is\n\
begin\n\
p0 : process (clk)\n\
begin\n\
end process;\n\
end architecture;\n";
        let (_, regions) = recognized(source);

        let arch = regions
            .iter()
            .find(|r| r.kind() == RegionKind::ArchitectureBody)
            .expect("architecture region");
        assert_eq!(arch.depth(), 0);

        let process = regions
            .iter()
            .find(|r| r.kind() == RegionKind::ProcessBlock)
            .expect("process region");
        assert_eq!(regions[process.parent().unwrap()].kind(), RegionKind::ArchitectureBody);
    }

    #[test]
    fn test_unbalanced_close_paren_fails() {
        let tokens = classify("a );\n").unwrap();
        let err = recognize(&tokens).unwrap_err();
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_unterminated_clause_fails() {
        let tokens = classify("entity e is port (\nclk : in std_ulogic\n").unwrap();
        let err = recognize(&tokens).unwrap_err();
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_lone_end_is_tolerated() {
        let tokens = classify("end").unwrap();
        let regions = recognize(&tokens).expect("lone `end` must not fail recognition");
        assert_eq!(kinds(&regions), vec![RegionKind::PlainStatement]);
    }

    #[test]
    fn test_lone_keyword_is_tolerated() {
        for source in ["entity", "begin", "port", "generic"] {
            let tokens = classify(source).unwrap();
            assert!(recognize(&tokens).is_ok(), "failed on {source:?}");
        }
    }

    #[test]
    fn test_regions_are_ordered_and_nested() {
        let source = "\
entity e is\n\
port (\n\
a : in bit;\n\
b : out bit\n\
);\n\
end;\n";
        let (_, regions) = recognized(source);

        for pair in regions.windows(2) {
            assert!(pair[0].start() <= pair[1].start());
        }
        for (idx, region) in regions.iter().enumerate() {
            if let Some(parent) = region.parent() {
                assert!(parent < idx);
                assert!(regions[parent].start() <= region.start());
                assert!(region.end() <= regions[parent].end());
                assert_eq!(region.depth(), regions[parent].depth() + 1);
            }
        }
    }
}

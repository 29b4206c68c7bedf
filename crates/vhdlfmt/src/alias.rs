//! Case-alias detection.
//!
//! VHDL is case-insensitive, so `STD_LOGIC`, `Std_Logic`, and `std_logic`
//! name the same thing; spellings that deviate from the canonical registry
//! spelling only in case are a common authoring inconsistency. When
//! `check_alias` is enabled each deviation becomes a non-fatal warning.
//! The emitted text is never affected; only the diagnostics grow.

use vhdlfmt_core::{
    diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode},
    registry,
    token::{Token, TokenKind},
};

/// Emit a warning for every registry token whose written spelling differs
/// from the canonical one only in case.
pub(crate) fn check(tokens: &[Token], collector: &mut DiagnosticCollector) {
    for token in tokens {
        let canonical = match token.kind() {
            TokenKind::Keyword => registry::keyword_canonical(token.text()),
            TokenKind::TypeName => registry::type_name_canonical(token.text()),
            _ => None,
        };
        let Some(canonical) = canonical else {
            continue;
        };
        if token.text() != canonical {
            collector.emit(
                Diagnostic::warning(format!(
                    "`{}` differs from `{}` only in case",
                    token.text(),
                    canonical
                ))
                .with_code(ErrorCode::W301)
                .with_label(token.span(), "written here"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhdlfmt_parser::classify;

    fn warnings(source: &str) -> Vec<String> {
        let tokens = classify(source).unwrap();
        let mut collector = DiagnosticCollector::new();
        check(&tokens, &mut collector);
        collector
            .into_diagnostics()
            .iter()
            .map(|d| d.message().to_string())
            .collect()
    }

    #[test]
    fn test_canonical_spellings_are_silent() {
        assert!(warnings("entity e is end;").is_empty());
    }

    #[test]
    fn test_case_deviations_are_flagged() {
        let found = warnings("Entity e IS\nsignal s : STD_LOGIC;\nend;");
        assert_eq!(found.len(), 3);
        assert!(found[0].contains("`Entity`"));
        assert!(found[1].contains("`IS`"));
        assert!(found[2].contains("`STD_LOGIC`"));
    }

    #[test]
    fn test_identifiers_are_not_flagged() {
        // `Entity_Reg` is a user identifier, not a registry word.
        assert!(warnings("signal Entity_Reg : bit;").is_empty());
    }

    #[test]
    fn test_warnings_carry_location() {
        let tokens = classify("ENTITY e is end;").unwrap();
        let mut collector = DiagnosticCollector::new();
        check(&tokens, &mut collector);
        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::W301));
        assert_eq!(diagnostics[0].labels()[0].span().start(), 0);
        assert_eq!(diagnostics[0].labels()[0].span().end(), 6);
    }
}

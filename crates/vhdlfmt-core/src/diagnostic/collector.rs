//! Collector for accumulating diagnostics during a formatting call.
//!
//! The [`DiagnosticCollector`] lets the pipeline phases report warnings and
//! errors in source order; the facade drains it into the result record.

use crate::diagnostic::Diagnostic;

/// A collector for accumulating diagnostics during a formatting call.
///
/// # Example
///
/// ```
/// # use vhdlfmt_core::diagnostic::{Diagnostic, DiagnosticCollector};
/// # use vhdlfmt_core::span::Span;
///
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("`Entity` differs from `entity` only in case")
///         .with_label(Span::new(0..6), "written here"),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.into_diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Check whether any emitted diagnostic was an error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return the diagnostics in emission order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostic::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_is_empty() {
        let collector = DiagnosticCollector::new();
        assert!(!collector.has_errors());
        assert!(collector.into_diagnostics().is_empty());
    }

    #[test]
    fn test_collector_emit_error_marks_errors() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.has_errors());
    }

    #[test]
    fn test_collector_emit_warning_keeps_ok() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("test warning"));

        assert!(!collector.has_errors());
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("first")
                .with_code(ErrorCode::E001)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("second"));

        let diagnostics = collector.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "first");
        assert_eq!(diagnostics[1].message(), "second");
    }
}

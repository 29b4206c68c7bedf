//! The result record returned by every formatting call.

use vhdlfmt_core::diagnostic::Diagnostic;

/// The outcome of one formatting call.
///
/// Created once per invocation and immutable after return; nothing is
/// cached between calls. `successful` is `false` exactly when the lexical
/// classifier or the structural recognizer reported a hard error (or the
/// configuration failed validation); in that case `code_formatted` is the
/// unmodified input and must not be used as a drop-in replacement without
/// checking `successful` first.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatResult {
    /// Whether formatting completed.
    pub successful: bool,
    /// The formatted text, or the unmodified input on failure.
    pub code_formatted: String,
    /// Errors and warnings in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FormatResult {
    pub(crate) fn success(code_formatted: String, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            successful: true,
            code_formatted,
            diagnostics,
        }
    }

    pub(crate) fn failure(source: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            successful: false,
            code_formatted: source.to_string(),
            diagnostics,
        }
    }

    /// The error diagnostics, if any.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity().is_error())
    }

    /// The warning diagnostics, if any.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity().is_warning())
    }
}

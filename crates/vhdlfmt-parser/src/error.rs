//! Error types for the classification and recognition phases.
//!
//! [`LexError`] and [`StructuralError`] each wrap a single labeled
//! [`Diagnostic`]; both are fatal to the formatting call that produced
//! them. The formatting facade converts them into a failed result rather
//! than propagating them to callers.

use thiserror::Error;

use vhdlfmt_core::diagnostic::Diagnostic;

/// A fatal lexical error: an unterminated string literal, delimited
/// comment, or extended identifier.
#[derive(Debug, Error)]
#[error("{diagnostic}")]
pub struct LexError {
    diagnostic: Diagnostic,
}

impl LexError {
    /// Create a new lexical error from a diagnostic.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    /// Get the wrapped diagnostic.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consume the error, returning the wrapped diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl From<Diagnostic> for LexError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}

/// A fatal structural error: unbalanced parenthesis nesting or a clause
/// left open at end of input.
#[derive(Debug, Error)]
#[error("{diagnostic}")]
pub struct StructuralError {
    diagnostic: Diagnostic,
}

impl StructuralError {
    /// Create a new structural error from a diagnostic.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    /// Get the wrapped diagnostic.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consume the error, returning the wrapped diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl From<Diagnostic> for StructuralError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhdlfmt_core::diagnostic::ErrorCode;

    #[test]
    fn test_lex_error_display_matches_diagnostic() {
        let err = LexError::new(
            Diagnostic::error("unterminated string literal").with_code(ErrorCode::E001),
        );

        assert_eq!(err.to_string(), "error[E001]: unterminated string literal");
        assert_eq!(err.diagnostic().code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_structural_error_into_diagnostic() {
        let err = StructuralError::from(
            Diagnostic::error("unbalanced closing parenthesis").with_code(ErrorCode::E101),
        );

        let diag = err.into_diagnostic();
        assert_eq!(diag.code(), Some(ErrorCode::E101));
    }
}

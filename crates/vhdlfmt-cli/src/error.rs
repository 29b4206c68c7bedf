//! Error types for CLI operations.
//!
//! [`CliError`] wraps the conditions a CLI run can fail on: file I/O,
//! configuration discovery and parsing, and formatting failures. The
//! `Format` variant carries the structured diagnostics plus the source
//! text so the error adapter can render rich reports.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use vhdlfmt_core::diagnostic::Diagnostic;

/// The error type for CLI runs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),

    #[error("Missing configuration file: {0}")]
    MissingConfig(PathBuf),

    #[error("formatting failed")]
    Format {
        diagnostics: Vec<Diagnostic>,
        src: String,
    },
}

impl CliError {
    /// Create a new `Format` error from a failed result's diagnostics and
    /// the source text they refer to.
    pub fn new_format_error(diagnostics: Vec<Diagnostic>, src: impl Into<String>) -> Self {
        Self::Format {
            diagnostics,
            src: src.into(),
        }
    }
}

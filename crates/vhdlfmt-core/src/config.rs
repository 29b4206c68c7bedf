//! Configuration types for the formatter.
//!
//! [`FormatterConfig`] is a closed record of formatting options: every field
//! is mandatory to the engine and validated once at the facade boundary.
//! All types implement [`serde::Deserialize`] so the record can be loaded
//! from external sources (the CLI loads it from TOML).

use serde::Deserialize;
use thiserror::Error;

/// Case normalization applied to a class of registry tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Leave the written spelling untouched.
    Preserve,
    /// Rewrite to the canonical lowercase spelling.
    #[default]
    Lowercase,
    /// Rewrite to the uppercase spelling.
    Uppercase,
}

/// Line-break policy at one of the five newline policy points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlineMode {
    /// Force a line break after the marker.
    #[default]
    NewLine,
    /// Do not force a break; for `then`/`else`/`;` an existing break is
    /// joined into a single space.
    NoNewLine,
}

impl NewlineMode {
    /// Returns `true` if this mode forces a break.
    pub fn is_new_line(&self) -> bool {
        matches!(self, NewlineMode::NewLine)
    }
}

/// Configuration error raised by [`FormatterConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The indentation unit contains characters other than spaces and tabs.
    #[error("indentation unit must contain only spaces and tabs, got {0:?}")]
    InvalidIndentation(String),
}

/// The closed set of recognized formatting options.
///
/// Defaults match the formatter's conventional style: lowercase keywords
/// and type names, two-space indentation, aligned generic/port lists, and a
/// break after `then`, `else`, and statement-terminating semicolons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    /// Case of reserved-word tokens.
    pub keyword_case: CaseMode,
    /// Case of built-in type-name tokens.
    pub name_case: CaseMode,
    /// Literal whitespace string repeated once per nesting depth.
    pub indentation: String,
    /// Column-align generic/port declarations and map associations.
    pub align_port_generic: bool,
    /// Column-align trailing comments in a statement block.
    pub align_comment: bool,
    /// Strip comments from the output.
    pub remove_comments: bool,
    /// Strip report statements from the output.
    pub remove_reports: bool,
    /// Emit diagnostics for case-only spelling deviations.
    pub check_alias: bool,
    /// Break after `then`.
    pub new_line_after_then: NewlineMode,
    /// Break after a statement-terminating `;`.
    pub new_line_after_semicolon: NewlineMode,
    /// Break after `else`.
    pub new_line_after_else: NewlineMode,
    /// Break after the opening parenthesis of a port clause or map.
    pub new_line_after_port: NewlineMode,
    /// Break after the opening parenthesis of a generic clause or map.
    pub new_line_after_generic: NewlineMode,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            keyword_case: CaseMode::Lowercase,
            name_case: CaseMode::Lowercase,
            indentation: "  ".to_string(),
            align_port_generic: true,
            align_comment: false,
            remove_comments: false,
            remove_reports: false,
            check_alias: true,
            new_line_after_then: NewlineMode::NewLine,
            new_line_after_semicolon: NewlineMode::NewLine,
            new_line_after_else: NewlineMode::NewLine,
            new_line_after_port: NewlineMode::NoNewLine,
            new_line_after_generic: NewlineMode::NoNewLine,
        }
    }
}

impl FormatterConfig {
    /// Validate the record once at the facade boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIndentation`] if the indentation unit
    /// contains anything but spaces and tabs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indentation.chars().any(|c| c != ' ' && c != '\t') {
            return Err(ConfigError::InvalidIndentation(self.indentation.clone()));
        }
        Ok(())
    }
}

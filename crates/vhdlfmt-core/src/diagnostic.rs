//! Error and diagnostic system for the formatter.
//!
//! This module provides a diagnostic system with:
//! - Error codes for documentation and searchability
//! - Labeled source spans for rich error context
//! - Severity levels
//! - A collector for accumulating diagnostics across pipeline phases
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, which represents a
//! single error or warning message with optional error code, labeled source
//! locations, and help text. The formatting facade returns the ordered list
//! of diagnostics produced by a call alongside the formatted text.
//!
//! # Example
//!
//! ```
//! # use vhdlfmt_core::diagnostic::{Diagnostic, ErrorCode};
//! # use vhdlfmt_core::span::Span;
//!
//! let span = Span::new(4..12);
//!
//! let diag = Diagnostic::error("unterminated string literal")
//!     .with_code(ErrorCode::E001)
//!     .with_label(span, "opened here")
//!     .with_help("add closing `\"`");
//! ```

mod collector;
#[allow(clippy::module_inception)]
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;

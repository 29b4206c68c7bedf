//! vhdlfmt - a deterministic source-to-source formatter for VHDL.
//!
//! Formatting consumes raw source text and a configuration record and
//! produces re-laid-out text that is semantically identical but
//! stylistically normalized: keyword and type-name case, indentation,
//! vertical alignment of generic/port lists and map associations, comment
//! and report retention, and newline placement. Formatting already
//! formatted text with the same configuration is a no-op.

mod align;
mod alias;
mod case;
mod emit;
mod filter;
mod layout;
mod result;

pub use result::FormatResult;
pub use vhdlfmt_core::{config, diagnostic, registry};

use std::panic::{self, AssertUnwindSafe};

use log::{debug, info, warn};

use vhdlfmt_core::{
    config::FormatterConfig,
    diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode},
};

/// The formatting facade.
///
/// A single entry point around the classify, recognize, transform, align,
/// layout, and emit pipeline. The formatter holds no state: every call
/// builds its token and region collections fresh and discards them after
/// re-emission, and concurrent calls share only the read-only registries.
///
/// # Examples
///
/// ```
/// use vhdlfmt::{Formatter, config::FormatterConfig};
///
/// let source = "ENTITY dummy IS\nEND;\n";
///
/// let formatter = Formatter::new();
/// let result = formatter.format_from_code(source, &FormatterConfig::default());
///
/// assert!(result.successful);
/// assert_eq!(result.code_formatted, "entity dummy is\nend;\n");
/// ```
#[derive(Debug, Default)]
pub struct Formatter;

impl Formatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        Self
    }

    /// Format source text under the given configuration.
    ///
    /// Always returns a result and never panics past this boundary:
    /// lexical and structural errors, configuration errors, and contained
    /// internal faults all surface as `successful = false` with the
    /// unmodified input as `code_formatted` and the failure detail in
    /// `diagnostics`.
    pub fn format_from_code(&self, source: &str, config: &FormatterConfig) -> FormatResult {
        if let Err(err) = config.validate() {
            return FormatResult::failure(
                source,
                vec![
                    Diagnostic::error(err.to_string()).with_code(ErrorCode::E201),
                ],
            );
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_pipeline(source, config)));
        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!("Internal fault contained at the formatting boundary");
                FormatResult::failure(
                    source,
                    vec![
                        Diagnostic::error("internal formatter fault").with_code(ErrorCode::E901),
                    ],
                )
            }
        }
    }
}

/// Format source text under the given configuration.
///
/// Convenience wrapper over [`Formatter::format_from_code`].
pub fn format_from_code(source: &str, config: &FormatterConfig) -> FormatResult {
    Formatter::new().format_from_code(source, config)
}

fn run_pipeline(source: &str, config: &FormatterConfig) -> FormatResult {
    info!(bytes = source.len(); "Formatting source");
    let mut collector = DiagnosticCollector::new();

    // Step 1: Classify
    let tokens = match vhdlfmt_parser::classify(source) {
        Ok(tokens) => tokens,
        Err(err) => {
            collector.emit(err.into_diagnostic());
            return FormatResult::failure(source, collector.into_diagnostics());
        }
    };
    debug!(token_count = tokens.len(); "Source classified");

    // Step 2: Recognize
    let regions = match vhdlfmt_parser::recognize(&tokens) {
        Ok(regions) => regions,
        Err(err) => {
            collector.emit(err.into_diagnostic());
            return FormatResult::failure(source, collector.into_diagnostics());
        }
    };
    debug!(region_count = regions.len(); "Structure recognized");

    // Step 3: Alias check (never alters the emitted text)
    if config.check_alias {
        alias::check(&tokens, &mut collector);
    }

    // Step 4: Filter, then lay out lines and depths over the survivors
    let keep = filter::keep_mask(&tokens, &regions, config);
    let mut lines = layout::break_lines(&tokens, &keep, &regions, config);
    layout::assign_depths(&mut lines, &tokens);
    debug!(line_count = lines.len(); "Lines laid out");

    // Step 5: Alignment plan
    let plan = align::plan(&tokens, &regions, &lines, config);

    // Step 6: Emit
    let code = emit::emit(&tokens, &lines, config, &plan, source.ends_with('\n'));

    info!("Formatting complete");
    FormatResult::success(code, collector.into_diagnostics())
}

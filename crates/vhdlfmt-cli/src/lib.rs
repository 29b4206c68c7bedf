//! CLI logic for the vhdlfmt formatter.
//!
//! This module contains the core CLI logic for the vhdlfmt formatter.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use vhdlfmt::Formatter;

/// Run the vhdlfmt CLI application
///
/// This function reads the input file, normalizes line endings, formats
/// the text through the vhdlfmt pipeline, and writes the result to
/// stdout, the output file, or back in place.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Formatting failures (lexical/structural errors in the input)
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Formatting file");

    // Load configuration
    let formatter_config = config::load_config(args.config.as_ref())?;

    // Read input file and normalize line endings around the core
    let source = fs::read_to_string(&args.input)?;
    let source = normalize_line_endings(source);

    // Format using the Formatter facade
    let formatter = Formatter::new();
    let result = formatter.format_from_code(&source, &formatter_config);

    for warning in result.warnings() {
        warn!("{warning}");
    }

    if !result.successful {
        return Err(CliError::new_format_error(result.diagnostics, source));
    }

    // Write the formatted text
    if let Some(output) = &args.output {
        fs::write(output, &result.code_formatted)?;
        info!(output_path = output; "Formatted file written");
    } else if args.in_place {
        fs::write(&args.input, &result.code_formatted)?;
        info!(output_path = args.input; "File rewritten in place");
    } else {
        io::stdout().write_all(result.code_formatted.as_bytes())?;
    }

    Ok(())
}

/// Normalize CRLF line endings to LF before formatting.
fn normalize_line_endings(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(
            normalize_line_endings("a;\r\nb;\r\n".to_string()),
            "a;\nb;\n"
        );
        assert_eq!(normalize_line_endings("a;\nb;\n".to_string()), "a;\nb;\n");
    }
}

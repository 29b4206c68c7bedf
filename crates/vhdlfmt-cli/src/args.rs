//! Command-line argument definitions for the vhdlfmt CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the vhdlfmt formatter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input VHDL file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; the formatted text goes to stdout when
    /// neither this nor `--in-place` is given
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<String>,

    /// Rewrite the input file in place
    #[arg(long)]
    pub in_place: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

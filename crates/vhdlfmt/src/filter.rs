//! Comment and report filtering.
//!
//! Filtering runs on the region list before line structure and alignment
//! groups are computed, so groups re-form correctly around the gaps left by
//! removed regions. The filter only ever clears tokens from the emission
//! stream; it never reorders or rewrites the survivors.

use vhdlfmt_core::{
    config::FormatterConfig,
    token::{Token, TokenKind},
};
use vhdlfmt_parser::{Region, RegionKind};

/// Compute which tokens survive into the emission stream.
///
/// Newlines inside a removed span are kept; the layout engine drops a line
/// whose entire content was filtered away, which also covers comments that
/// were the sole content of their line.
pub(crate) fn keep_mask(
    tokens: &[Token],
    regions: &[Region],
    config: &FormatterConfig,
) -> Vec<bool> {
    let mut keep = vec![true; tokens.len()];
    if !config.remove_comments && !config.remove_reports {
        return keep;
    }

    for region in regions {
        let remove = match region.kind() {
            RegionKind::Comment => config.remove_comments,
            RegionKind::ReportStatement => config.remove_reports,
            _ => false,
        };
        if !remove {
            continue;
        }
        for idx in region.start()..region.end().min(tokens.len()) {
            if tokens[idx].kind() != TokenKind::Newline {
                keep[idx] = false;
            }
        }
    }

    keep
}

//! Case transformation for registry tokens.
//!
//! A pure, stateless function of one token and the configuration: keyword
//! tokens follow `keyword_case`, type-name tokens follow `name_case`, and
//! everything else keeps its written spelling. Identifiers are never
//! case-transformed; the classifier already decided what is and is not a
//! registry token.

use std::borrow::Cow;

use vhdlfmt_core::{
    config::{CaseMode, FormatterConfig},
    token::{Token, TokenKind},
};

/// The spelling a token is emitted with.
pub(crate) fn rendered<'a>(token: &'a Token, config: &FormatterConfig) -> Cow<'a, str> {
    let mode = match token.kind() {
        TokenKind::Keyword => config.keyword_case,
        TokenKind::TypeName => config.name_case,
        _ => return Cow::Borrowed(token.text()),
    };

    match mode {
        CaseMode::Preserve => Cow::Borrowed(token.text()),
        CaseMode::Lowercase => Cow::Owned(token.text().to_ascii_lowercase()),
        CaseMode::Uppercase => Cow::Owned(token.text().to_ascii_uppercase()),
    }
}

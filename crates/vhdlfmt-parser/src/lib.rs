//! # vhdlfmt Parser
//!
//! Lexical classification and structural recognition for the vhdlfmt
//! formatter. This crate turns raw VHDL source text into the two
//! intermediate forms the formatting engine consumes:
//!
//! 1. **Classify** - a flat token sequence with source positions
//!    ([`classify`])
//! 2. **Recognize** - a flat, depth-annotated sequence of layout-relevant
//!    regions over those tokens ([`recognize`])
//!
//! Recognition is deliberately not grammar-complete: it is a shallow,
//! error-tolerant region scanner. Constructs it does not model degrade to
//! plain statements instead of failing, which keeps the formatter usable on
//! partially nonstandard input.
//!
//! ## Usage
//!
//! ```
//! let source = "entity accumulator is\nend;\n";
//!
//! let tokens = vhdlfmt_parser::classify(source).expect("lexically well formed");
//! let regions = vhdlfmt_parser::recognize(&tokens).expect("balanced nesting");
//!
//! assert!(!regions.is_empty());
//! ```

pub mod error;

mod lexer;
mod recognizer;
mod region;
mod scope;

pub use lexer::classify;
pub use recognizer::recognize;
pub use region::{Region, RegionKind};
pub use scope::{Scope, ScopeKind, ScopeStep, ScopeTracker};

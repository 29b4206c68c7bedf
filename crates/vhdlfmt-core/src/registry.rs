//! Reserved-word and built-in type-name registries.
//!
//! Both tables are process-wide, read-only, and built once on first use.
//! Membership tests are case-insensitive; the stored spelling is the
//! canonical (lowercase) one, which the alias check compares against and
//! the case transformer uses as the lowercase rendition.

use std::collections::HashSet;
use std::sync::LazyLock;

/// The reserved words of VHDL, in canonical lowercase spelling.
pub static KEYWORDS: &[&str] = &[
    "abs",
    "access",
    "after",
    "alias",
    "all",
    "and",
    "architecture",
    "array",
    "assert",
    "attribute",
    "begin",
    "block",
    "body",
    "buffer",
    "bus",
    "case",
    "component",
    "configuration",
    "constant",
    "disconnect",
    "downto",
    "else",
    "elsif",
    "end",
    "entity",
    "exit",
    "file",
    "for",
    "function",
    "generate",
    "generic",
    "group",
    "guarded",
    "if",
    "impure",
    "in",
    "inertial",
    "inout",
    "is",
    "label",
    "library",
    "linkage",
    "literal",
    "loop",
    "map",
    "mod",
    "nand",
    "new",
    "next",
    "nor",
    "not",
    "null",
    "of",
    "on",
    "open",
    "or",
    "others",
    "out",
    "package",
    "port",
    "postponed",
    "procedure",
    "process",
    "protected",
    "pure",
    "range",
    "record",
    "register",
    "reject",
    "rem",
    "report",
    "return",
    "rol",
    "ror",
    "select",
    "severity",
    "shared",
    "signal",
    "sla",
    "sll",
    "sra",
    "srl",
    "subtype",
    "then",
    "to",
    "transport",
    "type",
    "unaffected",
    "units",
    "until",
    "use",
    "variable",
    "wait",
    "when",
    "while",
    "with",
    "xnor",
    "xor",
];

/// The built-in type names, in canonical lowercase spelling.
pub static TYPE_NAMES: &[&str] = &[
    "bit",
    "bit_vector",
    "boolean",
    "boolean_vector",
    "character",
    "integer",
    "integer_vector",
    "natural",
    "positive",
    "real",
    "real_vector",
    "signed",
    "std_logic",
    "std_logic_vector",
    "std_ulogic",
    "std_ulogic_vector",
    "string",
    "time",
    "time_vector",
    "unsigned",
];

static KEYWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

static TYPE_NAME_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TYPE_NAMES.iter().copied().collect());

/// Look up a spelling in the keyword registry, ignoring case.
///
/// Returns the canonical lowercase spelling on a hit.
pub fn keyword_canonical(spelling: &str) -> Option<&'static str> {
    let lowered = spelling.to_ascii_lowercase();
    KEYWORD_SET.get(lowered.as_str()).copied()
}

/// Look up a spelling in the type-name registry, ignoring case.
///
/// Returns the canonical lowercase spelling on a hit.
pub fn type_name_canonical(spelling: &str) -> Option<&'static str> {
    let lowered = spelling.to_ascii_lowercase();
    TYPE_NAME_SET.get(lowered.as_str()).copied()
}

/// Check whether a spelling is a reserved word, ignoring case.
pub fn is_keyword(spelling: &str) -> bool {
    keyword_canonical(spelling).is_some()
}

/// Check whether a spelling is a built-in type name, ignoring case.
pub fn is_type_name(spelling: &str) -> bool {
    type_name_canonical(spelling).is_some()
}

/// Look up the canonical spelling of a word in either registry.
///
/// A spelling present in both registries resolves as a keyword; the
/// registries are disjoint, so this is a tie-break that should never fire.
pub fn canonical(spelling: &str) -> Option<&'static str> {
    keyword_canonical(spelling).or_else(|| type_name_canonical(spelling))
}

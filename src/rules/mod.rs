//! Rule compilation and substitution for chatswap.
//!
//! This module handles:
//! - Translating wildcard patterns into regexes
//! - Parsing `"pattern"==="replacement"` rule lines
//! - Applying both rule sets to a message, with atomic reload

pub mod compiler;
pub mod engine;
pub mod wildcard;

pub use compiler::{
	LineError, ParseReport, Rule, RuleSet, SkippedLine, parse, parse_case_insensitive, parse_line,
	parse_with_report,
};
pub use engine::{Engine, ReloadSummary, RuleSnapshot, apply, load_snapshot};
pub use wildcard::{compile_wildcard, wildcard_to_regex};

use crate::rules::wildcard::compile_wildcard;
use log::{debug, warn};
use regex::Regex;
use std::borrow::Cow;

/// Token separating the pattern and replacement halves of a rule line.
pub const SEPARATOR: &str = "===";

/// A compiled substitution rule.
#[derive(Debug, Clone)]
pub struct Rule {
	/// The wildcard source as written in the rule file.
	pub wildcard: String,

	/// Compiled pattern.
	pub pattern: Regex,

	/// Replacement text, expanded with `regex` replacement syntax.
	pub replacement: String,

	/// Whether matching respects case.
	pub case_sensitive: bool,

	/// 1-based line number in the source text.
	pub line: usize,
}

impl Rule {
	/// Replace every non-overlapping match of this rule in `input`.
	pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
		self.pattern.replace_all(input, self.replacement.as_str())
	}
}

/// Rules of one case-sensitivity mode, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	pub fn new(rules: Vec<Rule>) -> Self {
		RuleSet { rules }
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
		self.rules.iter()
	}

	/// Run every rule over `message` in order, each seeing the previous output.
	pub fn apply(&self, message: &str) -> String {
		let mut current = message.to_string();
		for rule in &self.rules {
			if rule.pattern.is_match(&current) {
				current = rule.apply(&current).into_owned();
			}
		}
		current
	}

	/// Copy of this set with every pattern rebuilt to fold case.
	pub fn to_case_insensitive(&self) -> RuleSet {
		let rules = self
			.rules
			.iter()
			.filter_map(|rule| match compile_wildcard(&rule.wildcard, false) {
				Ok(pattern) => Some(Rule {
					pattern,
					case_sensitive: false,
					..rule.clone()
				}),
				Err(e) => {
					warn!("Dropping rule on line {}: {}", rule.line, e);
					None
				}
			})
			.collect();
		RuleSet::new(rules)
	}
}

impl<'a> IntoIterator for &'a RuleSet {
	type Item = &'a Rule;
	type IntoIter = std::slice::Iter<'a, Rule>;

	fn into_iter(self) -> Self::IntoIter {
		self.rules.iter()
	}
}

/// Why a line produced no rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
	#[error("missing `===` separator")]
	MissingSeparator,

	#[error("pattern is not enclosed in double quotes")]
	UnquotedPattern,

	#[error("replacement is not enclosed in double quotes")]
	UnquotedReplacement,

	#[error("pattern failed to compile: {0}")]
	InvalidPattern(String),
}

/// A line that was skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
	/// 1-based line number.
	pub line: usize,

	/// The raw line text.
	pub content: String,

	pub reason: LineError,
}

/// Result of parsing rule text: the rules plus every skipped non-blank line.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
	pub rules: RuleSet,
	pub skipped: Vec<SkippedLine>,
}

/// Split a rule line into its wildcard and replacement text.
pub fn parse_line(line: &str) -> std::result::Result<(&str, &str), LineError> {
	let (pattern, replacement) = line
		.split_once(SEPARATOR)
		.ok_or(LineError::MissingSeparator)?;

	let pattern = extract_quoted(pattern.trim()).ok_or(LineError::UnquotedPattern)?;
	let replacement = extract_quoted(replacement.trim()).ok_or(LineError::UnquotedReplacement)?;

	Ok((pattern, replacement))
}

/// Strip one pair of enclosing double quotes. No unescaping is performed.
fn extract_quoted(s: &str) -> Option<&str> {
	if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
		Some(&s[1..s.len() - 1])
	} else {
		None
	}
}

/// Parse rule lines, keeping track of every line that was skipped.
pub fn parse_with_report<I, S>(lines: I, case_sensitive: bool) -> ParseReport
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut rules = Vec::new();
	let mut skipped = Vec::new();

	for (index, line) in lines.into_iter().enumerate() {
		let line = line.as_ref();
		let number = index + 1;

		// Blank lines are spacing, not malformed rules
		if line.trim().is_empty() {
			continue;
		}

		let compiled = parse_line(line).and_then(|(wildcard, replacement)| {
			compile_wildcard(wildcard, case_sensitive)
				.map(|pattern| Rule {
					wildcard: wildcard.to_string(),
					pattern,
					replacement: replacement.to_string(),
					case_sensitive,
					line: number,
				})
				.map_err(|e| {
					warn!("Rule on line {number} has an uncompilable pattern: {e}");
					LineError::InvalidPattern(e.to_string())
				})
		});

		match compiled {
			Ok(rule) => rules.push(rule),
			Err(reason) => {
				debug!("Skipping line {number} ({reason}): {line}");
				skipped.push(SkippedLine {
					line: number,
					content: line.to_string(),
					reason,
				});
			}
		}
	}

	ParseReport {
		rules: RuleSet::new(rules),
		skipped,
	}
}

/// Parse rule lines into a case-sensitive rule set.
pub fn parse<I, S>(lines: I) -> RuleSet
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	parse_with_report(lines, true).rules
}

/// Parse rule lines, then rebuild every pattern to fold case.
pub fn parse_case_insensitive<I, S>(lines: I) -> RuleSet
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	parse(lines).to_case_insensitive()
}

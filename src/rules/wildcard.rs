use crate::error::{ChatswapError, Result};
use regex::{Regex, RegexBuilder};

/// Translate a wildcard pattern into regex source.
///
/// - `*` becomes `.*` (any run of characters, greedy, unanchored)
/// - `?` becomes `.` (exactly one character)
/// - `\X` is the literal `X`
/// - every other character is matched literally
///
/// A trailing lone `\` has nothing to escape and contributes nothing.
pub fn wildcard_to_regex(wildcard: &str) -> String {
	let mut out = String::with_capacity(wildcard.len() * 2);
	let mut escaping = false;
	let mut buf = [0u8; 4];

	for c in wildcard.chars() {
		if escaping {
			out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
			escaping = false;
		} else if c == '\\' {
			escaping = true;
		} else if c == '*' {
			out.push_str(".*");
		} else if c == '?' {
			out.push('.');
		} else {
			out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
		}
	}

	out
}

/// Compile a wildcard pattern into a regex, optionally folding case.
///
/// Folding is Unicode-aware: besides ASCII letters, `k` also matches the
/// Kelvin sign (U+212A) and `s` the long s (U+017F).
pub fn compile_wildcard(wildcard: &str, case_sensitive: bool) -> Result<Regex> {
	let pattern = wildcard_to_regex(wildcard);
	RegexBuilder::new(&pattern)
		.case_insensitive(!case_sensitive)
		.build()
		.map_err(|source| ChatswapError::InvalidPattern { pattern, source })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_literal_characters_are_escaped() {
		assert_eq!(wildcard_to_regex("a.b+c"), r"a\.b\+c");
		assert_eq!(wildcard_to_regex("(x)[y]{z}|^$"), r"\(x\)\[y\]\{z\}\|\^\$");
	}

	#[test]
	fn test_star_and_question_mark() {
		assert_eq!(wildcard_to_regex("a*b"), "a.*b");
		assert_eq!(wildcard_to_regex("a?c"), "a.c");
		assert_eq!(wildcard_to_regex("*"), ".*");
	}

	#[test]
	fn test_escaped_metacharacters() {
		assert_eq!(wildcard_to_regex(r"a\*b"), r"a\*b");
		assert_eq!(wildcard_to_regex(r"a\?b"), r"a\?b");
		assert_eq!(wildcard_to_regex(r"a\\b"), r"a\\b");
		// Escaping an ordinary character is just that character
		assert_eq!(wildcard_to_regex(r"\x"), "x");
	}

	#[test]
	fn test_trailing_backslash_is_dropped() {
		assert_eq!(wildcard_to_regex("abc\\"), "abc");
		assert_eq!(wildcard_to_regex("\\"), "");
	}

	#[test]
	fn test_non_ascii_passes_through() {
		let regex = compile_wildcard("Ciallo～", true).unwrap();
		assert!(regex.is_match("Ciallo～(∠・ω< )⌒☆"));
	}

	#[test]
	fn test_compile_case_folding() {
		let sensitive = compile_wildcard("usa", true).unwrap();
		let insensitive = compile_wildcard("usa", false).unwrap();

		assert!(!sensitive.is_match("USA"));
		assert!(insensitive.is_match("USA"));
		assert!(insensitive.is_match("uSa"));
	}

	#[test]
	fn test_case_folding_is_unicode_aware() {
		let insensitive = compile_wildcard("ask", false).unwrap();
		assert!(insensitive.is_match("ASK"));
		assert!(insensitive.is_match("a\u{017F}k"));
		assert!(insensitive.is_match("as\u{212A}"));

		let sensitive = compile_wildcard("ask", true).unwrap();
		assert!(!sensitive.is_match("a\u{017F}k"));
		assert!(!sensitive.is_match("as\u{212A}"));
	}

	#[test]
	fn test_compile_never_fails_on_metacharacter_soup() {
		for wildcard in ["[", "(", "\\", "*?*?", "{2}", "a\\", "+++"] {
			assert!(compile_wildcard(wildcard, true).is_ok(), "{wildcard}");
		}
	}
}

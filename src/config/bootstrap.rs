use crate::config::types::RulePaths;
use crate::error::{ChatswapError, Result};
use log::info;
use std::path::Path;

/// Demo content of a freshly created case-sensitive rule file.
pub const DEFAULT_SENSITIVE_RULES: &[&str] = &[r#""114514"==="1919810""#];

/// Demo content of a freshly created case-insensitive rule file.
pub const DEFAULT_INSENSITIVE_RULES: &[&str] = &[
	r#"" usa"===" USA""#,
	r#""Ciallo"==="Ciallo～(∠・ω< )⌒☆""#,
];

/// Write `lines` to `path` unless it already exists (or `force` is set).
///
/// Parent directories are created as needed. Returns whether the file was written.
pub fn write_default_file(path: &Path, lines: &[&str], force: bool) -> Result<bool> {
	if path.exists() && !force {
		return Ok(false);
	}

	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		std::fs::create_dir_all(parent).map_err(|source| ChatswapError::ConfigWrite {
			path: parent.to_path_buf(),
			source,
		})?;
	}

	let mut content = lines.join("\n");
	content.push('\n');
	std::fs::write(path, content).map_err(|source| ChatswapError::ConfigWrite {
		path: path.to_path_buf(),
		source,
	})?;

	info!("Created default rule file: {}", path.display());
	Ok(true)
}

/// Create both rule files with demo content where they are missing.
///
/// Returns the paths that were written.
pub fn ensure_default_rules(paths: &RulePaths, force: bool) -> Result<Vec<&Path>> {
	let mut written = Vec::new();

	if write_default_file(&paths.sensitive, DEFAULT_SENSITIVE_RULES, force)? {
		written.push(paths.sensitive.as_path());
	}
	if write_default_file(&paths.insensitive, DEFAULT_INSENSITIVE_RULES, force)? {
		written.push(paths.insensitive.as_path());
	}

	Ok(written)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::compiler::{parse, parse_case_insensitive};
	use std::fs;

	fn temp_paths(dir: &Path) -> RulePaths {
		RulePaths {
			sensitive: dir.join("config").join("rules.txt"),
			insensitive: dir.join("config").join("rules-ci.txt"),
		}
	}

	#[test]
	fn test_defaults_compile_to_demo_rules() {
		let sensitive = parse(DEFAULT_SENSITIVE_RULES);
		let insensitive = parse_case_insensitive(DEFAULT_INSENSITIVE_RULES);

		assert_eq!(sensitive.len(), 1);
		assert_eq!(insensitive.len(), 2);
		assert_eq!(sensitive.apply("114514"), "1919810");
		assert_eq!(insensitive.apply("made in usa"), "made in USA");
		assert_eq!(insensitive.apply("CIALLO"), "Ciallo～(∠・ω< )⌒☆");
	}

	#[test]
	fn test_ensure_default_rules_creates_missing_files() {
		let dir = tempfile::tempdir().unwrap();
		let paths = temp_paths(dir.path());

		let written = ensure_default_rules(&paths, false).unwrap();
		assert_eq!(written.len(), 2);

		let content = fs::read_to_string(&paths.sensitive).unwrap();
		assert_eq!(content, "\"114514\"===\"1919810\"\n");
		let content = fs::read_to_string(&paths.insensitive).unwrap();
		assert!(content.contains("Ciallo～(∠・ω< )⌒☆"));
	}

	#[test]
	fn test_ensure_default_rules_keeps_existing_files() {
		let dir = tempfile::tempdir().unwrap();
		let paths = temp_paths(dir.path());
		fs::create_dir_all(paths.sensitive.parent().unwrap()).unwrap();
		fs::write(&paths.sensitive, "\"mine\"===\"ours\"\n").unwrap();

		let written = ensure_default_rules(&paths, false).unwrap();
		assert_eq!(written, vec![paths.insensitive.as_path()]);
		assert_eq!(
			fs::read_to_string(&paths.sensitive).unwrap(),
			"\"mine\"===\"ours\"\n"
		);
	}

	#[test]
	fn test_ensure_default_rules_force_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let paths = temp_paths(dir.path());
		fs::create_dir_all(paths.sensitive.parent().unwrap()).unwrap();
		fs::write(&paths.sensitive, "\"mine\"===\"ours\"\n").unwrap();

		let written = ensure_default_rules(&paths, true).unwrap();
		assert_eq!(written.len(), 2);
		assert!(
			fs::read_to_string(&paths.sensitive)
				.unwrap()
				.contains("114514")
		);
	}
}

use crate::config::types::Settings;
use crate::error::{ChatswapError, Result};
use crate::rules::compiler::{ParseReport, parse_with_report};
use log::info;
use std::path::Path;

/// Parse a settings file from the given path.
pub fn parse_settings_file(path: &Path) -> Result<Settings> {
	let content = std::fs::read_to_string(path).map_err(|source| ChatswapError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_settings_str(&content, path)
}

/// Parse settings from a string (useful for testing).
pub fn parse_settings_str(content: &str, path: &Path) -> Result<Settings> {
	toml::from_str(content).map_err(|source| ChatswapError::SettingsParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Read and compile a rule file.
///
/// Malformed lines are skipped and listed in the report rather than failing
/// the load. Only an unreadable file is an error.
pub fn load_rule_file(path: &Path, case_sensitive: bool) -> Result<ParseReport> {
	let content = std::fs::read_to_string(path).map_err(|source| ChatswapError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	let report = parse_with_report(content.lines(), case_sensitive);
	info!(
		"Loaded {} rules from {} ({} lines skipped)",
		report.rules.len(),
		path.display(),
		report.skipped.len()
	);

	Ok(report)
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default file name of the case-sensitive rule file.
pub const DEFAULT_SENSITIVE_FILE: &str = "rules.txt";

/// Default file name of the case-insensitive rule file.
pub const DEFAULT_INSENSITIVE_FILE: &str = "rules-case-insensitive.txt";

/// Name of the optional settings file inside the config directory.
pub const SETTINGS_FILE: &str = "chatswap.toml";

/// Settings from an optional `chatswap.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
	/// Case-sensitive rule file, relative to the config directory.
	#[serde(default = "default_sensitive_file")]
	pub sensitive_file: PathBuf,

	/// Case-insensitive rule file, relative to the config directory.
	/// Its patterns fold case regardless of how they are written.
	#[serde(default = "default_insensitive_file")]
	pub case_insensitive_file: PathBuf,

	/// Write the demo rule files when they are missing.
	#[serde(default = "default_true")]
	pub create_defaults: bool,
}

fn default_sensitive_file() -> PathBuf {
	PathBuf::from(DEFAULT_SENSITIVE_FILE)
}

fn default_insensitive_file() -> PathBuf {
	PathBuf::from(DEFAULT_INSENSITIVE_FILE)
}

fn default_true() -> bool {
	true
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			sensitive_file: default_sensitive_file(),
			case_insensitive_file: default_insensitive_file(),
			create_defaults: true,
		}
	}
}

impl Settings {
	/// Resolve the rule file paths against the config directory.
	pub fn rule_paths(&self, config_dir: &Path) -> RulePaths {
		RulePaths {
			sensitive: config_dir.join(&self.sensitive_file),
			insensitive: config_dir.join(&self.case_insensitive_file),
		}
	}
}

/// Locations of the two rule files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePaths {
	/// Rules matched with case respected.
	pub sensitive: PathBuf,

	/// Rules matched with case folded.
	pub insensitive: PathBuf,
}

/// Settings together with the directory they were resolved from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	pub settings: Settings,

	/// The config directory in effect.
	pub config_dir: PathBuf,

	/// The settings file, if one was found.
	pub source: Option<PathBuf>,
}

impl LoadedSettings {
	pub fn rule_paths(&self) -> RulePaths {
		self.settings.rule_paths(&self.config_dir)
	}
}

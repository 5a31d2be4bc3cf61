use crate::config::parser::parse_settings_file;
use crate::config::types::{LoadedSettings, SETTINGS_FILE, Settings};
use crate::error::{ChatswapError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Name of the project-local config directory.
pub const LOCAL_CONFIG_DIR: &str = "config";

/// Pick the config directory.
///
/// The lookup order is:
/// 1. `explicit`, when given (from `--config-dir` or `CHATSWAP_CONFIG_DIR`)
/// 2. `<cwd>/config`, when it exists
/// 3. the per-user config directory, `<config_dir>/chatswap`
pub fn resolve_config_dir(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
	if let Some(dir) = explicit {
		return Ok(dir.to_path_buf());
	}

	let local = cwd.join(LOCAL_CONFIG_DIR);
	if local.is_dir() {
		return Ok(local);
	}

	user_config_dir()
}

/// Get the per-user config directory.
pub fn user_config_dir() -> Result<PathBuf> {
	let base = dirs::config_dir().ok_or(ChatswapError::ConfigDirNotFound)?;
	Ok(base.join("chatswap"))
}

/// Load `chatswap.toml` from the config directory, falling back to defaults.
pub fn load_settings(config_dir: &Path) -> Result<LoadedSettings> {
	let settings_path = config_dir.join(SETTINGS_FILE);

	if settings_path.exists() {
		let settings = parse_settings_file(&settings_path)?;
		debug!("Loaded settings from {}", settings_path.display());
		Ok(LoadedSettings {
			settings,
			config_dir: config_dir.to_path_buf(),
			source: Some(settings_path),
		})
	} else {
		debug!("No settings file in {}, using defaults", config_dir.display());
		Ok(LoadedSettings {
			settings: Settings::default(),
			config_dir: config_dir.to_path_buf(),
			source: None,
		})
	}
}

/// Convenience function to resolve the config directory and load its settings.
pub fn discover_settings(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedSettings> {
	let config_dir = resolve_config_dir(explicit, cwd)?;
	load_settings(&config_dir)
}

//! Configuration loading for chatswap.
//!
//! This module handles:
//! - Config directory discovery
//! - The optional `chatswap.toml` settings file
//! - Reading rule files and bootstrapping demo rules

pub mod bootstrap;
pub mod discovery;
pub mod parser;
pub mod types;

pub use bootstrap::{
	DEFAULT_INSENSITIVE_RULES, DEFAULT_SENSITIVE_RULES, ensure_default_rules, write_default_file,
};
pub use discovery::{discover_settings, load_settings, resolve_config_dir, user_config_dir};
pub use parser::{load_rule_file, parse_settings_file, parse_settings_str};
pub use types::{LoadedSettings, RulePaths, Settings};

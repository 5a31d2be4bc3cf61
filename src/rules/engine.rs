use crate::config::parser::load_rule_file;
use crate::config::types::RulePaths;
use crate::error::Result;
use crate::rules::compiler::RuleSet;
use log::{error, info};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// The pair of rule sets applied to every message.
#[derive(Debug, Clone, Default)]
pub struct RuleSnapshot {
	/// Rules matched with case respected.
	pub sensitive: RuleSet,

	/// Rules matched with case folded.
	pub insensitive: RuleSet,
}

impl RuleSnapshot {
	pub fn new(sensitive: RuleSet, insensitive: RuleSet) -> Self {
		RuleSnapshot {
			sensitive,
			insensitive,
		}
	}

	pub fn apply(&self, message: &str) -> String {
		apply(message, &self.sensitive, &self.insensitive)
	}

	pub fn rule_count(&self) -> usize {
		self.sensitive.len() + self.insensitive.len()
	}
}

/// Substitute a message through both rule sets.
///
/// Case-sensitive rules run first, then case-insensitive ones. Every rule sees
/// the output of the rule before it, so one rule can produce text that a later
/// rule rewrites again within the same call.
pub fn apply(message: &str, sensitive: &RuleSet, insensitive: &RuleSet) -> String {
	let current = sensitive.apply(message);
	insensitive.apply(&current)
}

/// Outcome of a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
	pub sensitive_rules: usize,
	pub insensitive_rules: usize,

	/// False when the case-sensitive file could not be read and the previous
	/// rules were kept.
	pub sensitive_loaded: bool,

	/// Same as `sensitive_loaded`, for the case-insensitive file.
	pub insensitive_loaded: bool,
}

/// Read and compile both rule files.
pub fn load_snapshot(paths: &RulePaths) -> Result<RuleSnapshot> {
	let sensitive = load_rule_file(&paths.sensitive, true)?.rules;
	let insensitive = load_rule_file(&paths.insensitive, false)?.rules;
	Ok(RuleSnapshot::new(sensitive, insensitive))
}

/// Holds the active rules and swaps them wholesale on reload.
///
/// `apply` takes a reference to the current snapshot and works on it without
/// holding the lock, so a concurrent reload never exposes a half-built state.
/// Reloads run one at a time.
#[derive(Debug, Default)]
pub struct Engine {
	active: RwLock<Arc<RuleSnapshot>>,
	reloading: Mutex<()>,
}

impl Engine {
	pub fn new(snapshot: RuleSnapshot) -> Self {
		Engine {
			active: RwLock::new(Arc::new(snapshot)),
			reloading: Mutex::new(()),
		}
	}

	/// The snapshot currently in effect.
	pub fn snapshot(&self) -> Arc<RuleSnapshot> {
		// The guarded value is a plain Arc, so a poisoned lock still holds a
		// complete snapshot.
		let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(&guard)
	}

	/// Publish a new snapshot, returning the one it replaced.
	pub fn swap(&self, snapshot: RuleSnapshot) -> Arc<RuleSnapshot> {
		let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
		std::mem::replace(&mut *guard, Arc::new(snapshot))
	}

	pub fn apply(&self, message: &str) -> String {
		self.snapshot().apply(message)
	}

	/// Re-read both rule files and publish them together.
	///
	/// A file that cannot be read leaves its rule set as it was. Concurrent
	/// callers are serialized, so the fallback set is always the one published
	/// by the latest finished reload.
	pub fn reload(&self, paths: &RulePaths) -> ReloadSummary {
		let _reloading = self.reloading.lock().unwrap_or_else(PoisonError::into_inner);
		let previous = self.snapshot();

		let (sensitive, sensitive_loaded) = match load_rule_file(&paths.sensitive, true) {
			Ok(report) => (report.rules, true),
			Err(e) => {
				error!("Keeping previous case-sensitive rules: {e}");
				(previous.sensitive.clone(), false)
			}
		};
		let (insensitive, insensitive_loaded) = match load_rule_file(&paths.insensitive, false) {
			Ok(report) => (report.rules, true),
			Err(e) => {
				error!("Keeping previous case-insensitive rules: {e}");
				(previous.insensitive.clone(), false)
			}
		};

		let summary = ReloadSummary {
			sensitive_rules: sensitive.len(),
			insensitive_rules: insensitive.len(),
			sensitive_loaded,
			insensitive_loaded,
		};

		self.swap(RuleSnapshot::new(sensitive, insensitive));
		info!(
			"Reloaded {} case-sensitive and {} case-insensitive rules",
			summary.sensitive_rules, summary.insensitive_rules
		);

		summary
	}
}

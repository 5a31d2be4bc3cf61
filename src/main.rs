use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chatswap_cli::config::{
	LoadedSettings, discover_settings, ensure_default_rules, load_rule_file,
};
use chatswap_cli::rules::Engine;

#[derive(Parser)]
#[command(name = "chatswap")]
#[command(
	author,
	version,
	about = "Rewrite chat messages with wildcard substitution rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Directory holding the rule files and chatswap.toml
	#[arg(long, global = true, value_name = "DIR", env = "CHATSWAP_CONFIG_DIR")]
	config_dir: Option<PathBuf>,

	/// Increase log verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Rewrite a single message and print the result
	Apply {
		/// Message words, joined with single spaces
		#[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
		message: Vec<String>,
	},
	/// Rewrite each line read from stdin as a separate message
	Stream {
		/// A line equal to this reloads the rule files instead of being rewritten
		#[arg(long, default_value = "/reload", value_name = "TOKEN")]
		reload_token: String,
	},
	/// Write the default rule files
	Init {
		/// Overwrite existing rule files
		#[arg(long)]
		force: bool,
	},
	/// Rule file inspection commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// Display every compiled rule with its source location
	List,
	/// Report lines that do not form a valid rule
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logger(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logger(cli.verbose);

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = discover_settings(cli.config_dir.as_deref(), &cwd)
		.context("Failed to load settings")?;
	info!("Using config directory {}", loaded.config_dir.display());

	match cli.command {
		Commands::Init { force } => handle_init(&loaded, force),
		Commands::Apply { message } => {
			bootstrap(&loaded);
			handle_apply(&loaded, &message.join(" "))
		}
		Commands::Stream { reload_token } => {
			bootstrap(&loaded);
			handle_stream(&loaded, &reload_token)
		}
		Commands::Rules { action } => {
			bootstrap(&loaded);
			match action {
				RulesAction::List => handle_rules_list(&loaded),
				RulesAction::Validate => handle_rules_validate(&loaded),
			}
		}
	}
}

/// Write missing demo rule files. Failure here is not fatal.
fn bootstrap(loaded: &LoadedSettings) {
	if !loaded.settings.create_defaults {
		return;
	}
	if let Err(e) = ensure_default_rules(&loaded.rule_paths(), false) {
		warn!("Could not create default rule files: {e}");
	}
}

/// Build the engine, starting empty for any rule file that cannot be read.
fn build_engine(loaded: &LoadedSettings) -> Engine {
	let engine = Engine::default();
	engine.reload(&loaded.rule_paths());
	engine
}

fn handle_init(loaded: &LoadedSettings, force: bool) -> Result<ExitCode> {
	let paths = loaded.rule_paths();
	let written = ensure_default_rules(&paths, force).context("Failed to write rule files")?;

	if written.is_empty() {
		println!("Rule files already exist. Use --force to overwrite.");
	}
	for path in written {
		println!("Created {}", path.display());
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_apply(loaded: &LoadedSettings, message: &str) -> Result<ExitCode> {
	let engine = build_engine(loaded);
	println!("{}", engine.apply(message));
	Ok(ExitCode::SUCCESS)
}

fn handle_stream(loaded: &LoadedSettings, reload_token: &str) -> Result<ExitCode> {
	let paths = loaded.rule_paths();
	let engine = build_engine(loaded);

	let stdin = std::io::stdin();
	let stdout = std::io::stdout();
	let mut out = stdout.lock();

	let mut input = stdin.lock();
	let mut buf = Vec::new();

	loop {
		buf.clear();
		let read = input
			.read_until(b'\n', &mut buf)
			.context("Failed to read from stdin")?;
		if read == 0 {
			break;
		}

		// Each line is its own message; undecodable bytes must not end the stream
		let line = String::from_utf8_lossy(&buf);
		let line = line.trim_end_matches('\n').trim_end_matches('\r');

		if line == reload_token {
			let summary = engine.reload(&paths);
			eprintln!(
				"Reloaded {} case-sensitive and {} case-insensitive rules",
				summary.sensitive_rules, summary.insensitive_rules
			);
			continue;
		}

		writeln!(out, "{}", engine.apply(line)).context("Failed to write to stdout")?;
		out.flush().context("Failed to write to stdout")?;
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_list(loaded: &LoadedSettings) -> Result<ExitCode> {
	let paths = loaded.rule_paths();

	if let Some(ref source) = loaded.source {
		println!("# Settings: {}", source.display());
	}

	for (path, case_sensitive) in [(&paths.sensitive, true), (&paths.insensitive, false)] {
		let report = load_rule_file(path, case_sensitive)
			.with_context(|| format!("Failed to load {}", path.display()))?;

		println!("# Source: {}", path.display());
		println!("# case-sensitive: {}", case_sensitive);
		println!("# rules: {}", report.rules.len());
		println!();

		for rule in &report.rules {
			println!("  Rule (line {}):", rule.line);
			println!("    wildcard: {}", rule.wildcard);
			println!("    regex: {}", rule.pattern.as_str());
			println!("    replacement: {}", rule.replacement);
			println!();
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate(loaded: &LoadedSettings) -> Result<ExitCode> {
	let paths = loaded.rule_paths();
	let mut problems = 0;

	for (path, case_sensitive) in [(&paths.sensitive, true), (&paths.insensitive, false)] {
		match load_rule_file(path, case_sensitive) {
			Ok(report) => {
				println!("{} ({} rules)", path.display(), report.rules.len());
				for skipped in &report.skipped {
					println!("  line {}: {}: {}", skipped.line, skipped.reason, skipped.content);
				}
				problems += report.skipped.len();
			}
			Err(e) => {
				eprintln!("Configuration error: {}", e);
				problems += 1;
			}
		}
	}

	if problems == 0 {
		println!("All rule files are valid.");
		Ok(ExitCode::SUCCESS)
	} else {
		Ok(ExitCode::FAILURE)
	}
}

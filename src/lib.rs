//! Chatswap - wildcard substitution engine for chat messages.
//!
//! This library provides the core functionality for chatswap, including:
//! - Compiling `"pattern"==="replacement"` rule lines with `*`, `?` and `\` wildcards
//! - Applying case-sensitive and case-insensitive rule sets to a message
//! - Config directory discovery, default rule bootstrap and hot reload
//!
//! # Example
//!
//! ```
//! use chatswap_cli::rules::{Engine, RuleSnapshot, parse, parse_case_insensitive};
//!
//! let sensitive = parse([r#""cat"==="dog""#, r#""dog"==="fish""#]);
//! let insensitive = parse_case_insensitive([r#""usa"==="USA""#]);
//! let engine = Engine::new(RuleSnapshot::new(sensitive, insensitive));
//!
//! assert_eq!(engine.apply("my cat from the usa"), "my fish from the USA");
//! ```
//!
//! # Replacement syntax
//!
//! Replacement text is expanded the way `regex::Regex::replace_all` expands it:
//! `$0` (or `${0}`) inserts the whole match and `$$` a literal `$`. Wildcards do
//! not capture, so `$1` and other group references expand to nothing. A group
//! name runs as long as `[_0-9A-Za-z]` continues, so write `${0}x`, not `$0x`.

pub mod config;
pub mod error;
pub mod rules;

pub use error::{ChatswapError, Result};

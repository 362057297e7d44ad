//! Local storage — the env file on the operator's machine.
//!
//! This module provides:
//! - A dotenv-compatible line parser (`parser`)
//! - Locale-aware key ordering (`collate`)
//! - Sorted `KEY='VALUE'` serialization with atomic writes (`writer`)

pub mod collate;
pub mod parser;
pub mod writer;

use std::collections::BTreeMap;

/// Secret name → secret value.
///
/// A `BTreeMap` keeps iteration order stable, so reconciliation decisions
/// and remote write calls happen in the same order on every run.
pub type SecretMap = BTreeMap<String, String>;

// Re-export the most commonly used items.
pub use collate::locale_cmp;
pub use parser::{parse_env_line, parse_env_str, read_env_file};
pub use writer::{format_env, write_env_file};

//! `.env` file parsing.
//!
//! Reads what `writer` produces, plus the usual hand-written variants
//! (`export` prefixes, comments, unquoted values).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::SecretMap;
use crate::errors::{EnvSyncError, Result};

/// Parse a single `.env` line into a (key, value) pair.
///
/// Returns `None` for blank lines, comments, and lines without `=`.
/// Handles: `export` prefix, values with `=`, single quotes (literal)
/// and double quotes (with `\n`, `\r`, `\"` and `\\` escapes).
pub fn parse_env_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();

    // Skip empty lines and comments.
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    // Strip optional `export ` prefix.
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);

    // Split on the first '=' to get KEY and VALUE.
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() {
        return None;
    }

    let value = if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        unescape_double_quoted(inner)
    } else if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        inner.to_string()
    } else {
        value.to_string()
    };

    Some((key.to_string(), value))
}

/// Parse the full contents of an env file. Later duplicates win.
pub fn parse_env_str(content: &str) -> SecretMap {
    content.lines().filter_map(parse_env_line).collect()
}

/// Read and parse the env file at `path`.
///
/// A missing file is an empty mapping: the first `pull` creates it.
pub fn read_env_file(path: &Path) -> Result<SecretMap> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_env_str(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "env file not found, starting empty");
            Ok(SecretMap::new())
        }
        Err(e) => Err(EnvSyncError::StorageRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn unescape_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> Option<(String, String)> {
        Some((key.to_string(), value.to_string()))
    }

    #[test]
    fn parse_simple_key_value() {
        assert_eq!(parse_env_line("KEY=value"), pair("KEY", "value"));
    }

    #[test]
    fn parse_export_prefix() {
        assert_eq!(
            parse_env_line("export DATABASE_URL=postgres://localhost/db"),
            pair("DATABASE_URL", "postgres://localhost/db")
        );
    }

    #[test]
    fn parse_value_with_equals() {
        assert_eq!(parse_env_line("KEY=val=ue"), pair("KEY", "val=ue"));
    }

    #[test]
    fn parse_single_quoted_value_is_literal() {
        assert_eq!(
            parse_env_line(r"KEY='hello \n world'"),
            pair("KEY", r"hello \n world")
        );
    }

    #[test]
    fn parse_double_quoted_value_unescapes() {
        assert_eq!(
            parse_env_line(r#"KEY="it's a \"quote\"\nline two""#),
            pair("KEY", "it's a \"quote\"\nline two")
        );
    }

    #[test]
    fn parse_keeps_unknown_escapes() {
        assert_eq!(parse_env_line(r#"KEY="C:\temp""#), pair("KEY", r"C:\temp"));
    }

    #[test]
    fn parse_empty_values() {
        assert_eq!(parse_env_line("KEY="), pair("KEY", ""));
        assert_eq!(parse_env_line("KEY=''"), pair("KEY", ""));
        assert_eq!(parse_env_line(r#"KEY="""#), pair("KEY", ""));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        assert_eq!(parse_env_line("# this is a comment"), None);
        assert_eq!(parse_env_line(""), None);
        assert_eq!(parse_env_line("   "), None);
    }

    #[test]
    fn parse_skips_lines_without_key_or_equals() {
        assert_eq!(parse_env_line("NOEQUALS"), None);
        assert_eq!(parse_env_line("=value"), None);
    }

    #[test]
    fn parse_preserves_spaces_inside_quotes() {
        assert_eq!(parse_env_line("  KEY = ' padded '  "), pair("KEY", " padded "));
    }

    #[test]
    fn parse_str_last_duplicate_wins() {
        let map = parse_env_str("A='1'\n# note\nB=2\nA='3'\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map["A"], "3");
        assert_eq!(map["B"], "2");
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let map = read_env_file(&dir.path().join(".env")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn read_directory_is_storage_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_env_file(dir.path()).unwrap_err();
        assert!(matches!(err, EnvSyncError::StorageRead { .. }));
    }
}

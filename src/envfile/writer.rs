//! Env file serialization.
//!
//! Every record is written as `KEY='VALUE'`, one per line, sorted with
//! [`locale_cmp`]. A value that holds a `'` or a line break cannot live
//! inside single quotes, so it is written double-quoted with escapes
//! instead; `parser` reads both forms back to the same value.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::{locale_cmp, SecretMap};
use crate::errors::{EnvSyncError, Result};

/// Render a secret map as env file content.
pub fn format_env(secrets: &SecretMap) -> String {
    let mut entries: Vec<(&String, &String)> = secrets.iter().collect();
    entries.sort_by(|(a, _), (b, _)| locale_cmp(a, b));

    let mut out = String::new();
    for (key, value) in entries {
        if needs_double_quotes(value) {
            let escaped = value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\r', "\\r");
            let _ = writeln!(out, "{key}=\"{escaped}\"");
        } else {
            let _ = writeln!(out, "{key}='{value}'");
        }
    }
    out
}

fn needs_double_quotes(value: &str) -> bool {
    value.contains('\'') || value.contains('\n') || value.contains('\r')
}

/// Overwrite the env file at `path` with `secrets`.
///
/// Writes to a temp file in the same directory and renames it over the
/// target, so a failed write never leaves a half-written env file.
pub fn write_env_file(path: &Path, secrets: &SecretMap) -> Result<()> {
    let storage_err = |e: std::io::Error| EnvSyncError::StorageWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, format_env(secrets)).map_err(storage_err)?;

    // Owner-only: the file holds plaintext secrets.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        if let Err(e) = fs::set_permissions(&tmp_path, perms) {
            let _ = fs::remove_file(&tmp_path);
            return Err(storage_err(e));
        }
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(storage_err(e));
    }

    tracing::debug!(path = %path.display(), count = secrets.len(), "env file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envfile::read_env_file;
    use tempfile::TempDir;

    fn map(pairs: &[(&str, &str)]) -> SecretMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn format_single_quotes_every_value() {
        let secrets = map(&[("B", "3"), ("A", "hello world")]);
        assert_eq!(format_env(&secrets), "A='hello world'\nB='3'\n");
    }

    #[test]
    fn format_empty_map_is_empty() {
        assert_eq!(format_env(&SecretMap::new()), "");
    }

    #[test]
    fn format_uses_locale_order() {
        let secrets = map(&[("APIKEY", "1"), ("API_KEY", "2")]);
        assert_eq!(format_env(&secrets), "API_KEY='2'\nAPIKEY='1'\n");
    }

    #[test]
    fn format_double_quotes_values_with_single_quote_or_newline() {
        let secrets = map(&[("Q", "it's"), ("N", "a\nb"), ("S", r#"say "hi" \o/"#)]);
        assert_eq!(
            format_env(&secrets),
            "N=\"a\\nb\"\nQ=\"it's\"\nS='say \"hi\" \\o/'\n"
        );
    }

    #[test]
    fn write_then_read_preserves_tricky_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let secrets = map(&[
            ("QUOTE", "it's \"mixed\""),
            ("MULTI", "line1\nline2"),
            ("HASH", "a#b"),
            ("EQ", "x=y"),
            ("BACKSLASH", r"C:\path\n"),
            ("EMPTY", ""),
        ]);

        write_env_file(&path, &secrets).unwrap();
        assert_eq!(read_env_file(&path).unwrap(), secrets);
    }

    #[test]
    fn write_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "OLD='1'\n# comment\n").unwrap();

        write_env_file(&path, &map(&[("NEW", "2")])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "NEW='2'\n");
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        write_env_file(&path, &map(&[("A", "1")])).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from(".env")]);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join(".env");
        let err = write_env_file(&path, &map(&[("A", "1")])).unwrap_err();
        assert!(matches!(err, EnvSyncError::StorageWrite { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn env_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        write_env_file(&path, &map(&[("A", "1")])).unwrap();

        let perms = fs::metadata(&path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}

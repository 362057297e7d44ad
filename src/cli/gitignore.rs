//! Keep the env file out of version control.
//!
//! When `pull` or `sync` creates the env file for the first time, its
//! path is appended to the project's `.gitignore`.

use std::fs;
use std::path::Path;

use crate::cli::output;

/// Ignore `file` (somewhere under `project_dir`) in `<project_dir>/.gitignore`.
///
/// Only acts inside a git checkout. Write errors are ignored: the
/// `.gitignore` entry is a convenience, not a requirement.
pub fn ignore_file(project_dir: &Path, file: &Path) {
    if !project_dir.join(".git").exists() {
        return;
    }

    let Ok(relative) = file.strip_prefix(project_dir) else {
        return;
    };
    let entry = relative.to_string_lossy().replace('\\', "/");

    patch_gitignore(project_dir, &entry);
}

/// Append `entry` to `.gitignore` if not already present.
fn patch_gitignore(project_dir: &Path, entry: &str) {
    let gitignore_path = project_dir.join(".gitignore");

    let existing = fs::read_to_string(&gitignore_path).unwrap_or_default();

    let covered = existing.lines().map(str::trim).any(|line| {
        line == entry || line.strip_prefix('/') == Some(entry)
    });
    if covered {
        return;
    }

    let separator = if existing.ends_with('\n') || existing.is_empty() {
        ""
    } else {
        "\n"
    };

    if fs::write(&gitignore_path, format!("{existing}{separator}{entry}\n")).is_ok() {
        output::info(&format!("Added '{entry}' to .gitignore"));
    }
}

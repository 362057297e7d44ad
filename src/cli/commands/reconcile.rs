//! `envsync sync | pull | push` — reconcile the env file with the remote.
//!
//! Usage:
//!   envsync                  # choose interactively
//!   envsync sync             # pull, push, save the env file
//!   envsync pull --dry-run   # show what pull would change

use crate::cli::{gitignore, load_config, output, prompt_direction, resolve_credentials, Cli};
use crate::config::Config;
use crate::errors::Result;
use crate::reconcile::{Change, Direction, Reconciler, Report, Side};
use crate::remote::{DryRun, InfisicalClient, RemoteStore};

/// Execute a reconciliation; `None` asks which direction to run.
pub fn execute(cli: &Cli, direction: Option<Direction>) -> Result<()> {
    // Configuration problems surface before any file or network access.
    let config = load_config(cli)?;
    let credentials = resolve_credentials(cli, &config)?;

    let direction = match direction {
        Some(direction) => direction,
        None => prompt_direction()?,
    };

    let client = InfisicalClient::login(&config, &credentials)?;

    if cli.dry_run {
        run_with_store(DryRun::new(client), &config, direction, true)?;
    } else {
        run_with_store(client, &config, direction, false)?;
    }

    Ok(())
}

/// Load both mappings from `store` and the env file, run `direction`,
/// then report, audit, and gitignore a newly created env file.
pub fn run_with_store<S: RemoteStore>(
    store: S,
    config: &Config,
    direction: Direction,
    dry_run: bool,
) -> Result<Report> {
    let env_file_existed = config.env_file.exists();

    let mut reconciler = Reconciler::load(store, &config.env_file)?;
    if dry_run {
        reconciler = reconciler.without_persist();
    }

    output::info(&format!(
        "{} {} with '{}' environment",
        capitalized(direction),
        config.env_file.display(),
        config.environment
    ));

    let report = match reconciler.run(direction) {
        Ok(report) => report,
        Err(e) => {
            // Remote writes made before the failure are not rolled back.
            if !dry_run && !reconciler.applied().is_empty() {
                let remote_writes = reconciler
                    .applied()
                    .iter()
                    .filter(|c| c.side == Side::Remote)
                    .count();
                if remote_writes > 0 {
                    output::warning(&format!(
                        "{remote_writes} remote change(s) were applied before the failure; the env file was not saved"
                    ));
                }
                audit(config, direction, reconciler.applied(), &format!("aborted: {e}"));
            }
            return Err(e);
        }
    };

    if !dry_run {
        audit(config, direction, &report.changes, &report.summary());
    }

    if report.persisted && !env_file_existed {
        gitignore::ignore_file(&config.project_dir, &config.env_file);
    }

    print_summary(&report, config, dry_run);
    Ok(report)
}

fn print_summary(report: &Report, config: &Config, dry_run: bool) {
    if report.is_noop() {
        output::success("Already in sync — nothing to do.");
        return;
    }

    if dry_run {
        output::info(&format!(
            "Dry run: {} would be applied. Nothing was written.",
            report.summary()
        ));
        return;
    }

    output::success(&format!(
        "{} complete: {}",
        capitalized(report.direction),
        report.summary()
    ));
    if report.persisted {
        output::tip(&format!("Saved {}", config.env_file.display()));
    }
}

fn capitalized(direction: Direction) -> &'static str {
    match direction {
        Direction::Sync => "Sync",
        Direction::Pull => "Pull",
        Direction::Push => "Push",
    }
}

#[cfg(feature = "audit-log")]
fn audit(config: &Config, direction: Direction, changes: &[Change], outcome: &str) {
    crate::audit::record_run(config, direction, changes, outcome);
}

#[cfg(not(feature = "audit-log"))]
fn audit(_config: &Config, _direction: Direction, _changes: &[Change], _outcome: &str) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::envfile::SecretMap;
    use crate::remote::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Settings::default().into_config(dir.path());
        (dir, config)
    }

    #[test]
    fn pull_creates_env_file_and_gitignores_it() {
        let (dir, config) = project();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let store = MemoryStore::new(SecretMap::from([("A".into(), "1".into())]));

        let report = run_with_store(&store, &config, Direction::Pull, false).unwrap();

        assert!(report.persisted);
        assert_eq!(fs::read_to_string(&config.env_file).unwrap(), "A='1'\n");
        let ignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(ignore.contains(".env"));
    }

    #[test]
    fn dry_run_sync_touches_nothing() {
        let (_dir, config) = project();
        fs::write(&config.env_file, "LOCAL='x'\n").unwrap();
        let store = MemoryStore::new(SecretMap::from([("REMOTE".into(), "y".into())]));
        let dry = DryRun::new(&store);

        let report = run_with_store(&dry, &config, Direction::Sync, true).unwrap();

        assert_eq!(report.changes.len(), 2);
        assert!(!report.persisted);
        assert_eq!(dry.planned().len(), 1);
        assert!(store.writes().is_empty());
        assert_eq!(fs::read_to_string(&config.env_file).unwrap(), "LOCAL='x'\n");
        assert!(!config.state_dir.exists());
    }

    #[cfg(feature = "audit-log")]
    #[test]
    fn applied_changes_are_audited() {
        let (_dir, config) = project();
        fs::write(&config.env_file, "X='9'\n").unwrap();
        let store = MemoryStore::default();

        run_with_store(&store, &config, Direction::Push, false).unwrap();

        let audit = crate::audit::AuditLog::open(&config.state_dir).unwrap();
        let entries = audit.query(10, None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].key_name.as_deref(), Some("X"));
        assert_eq!(entries[1].operation, "push");
    }
}

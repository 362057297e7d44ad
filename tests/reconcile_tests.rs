//! End-to-end reconciliation tests: env file on disk, in-memory remote.

use std::fs;

use envsync::envfile::{read_env_file, SecretMap};
use envsync::errors::EnvSyncError;
use envsync::reconcile::{Direction, Reconciler};
use envsync::remote::{MemoryStore, WriteCall};
use tempfile::TempDir;

fn map(pairs: &[(&str, &str)]) -> SecretMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// A temp project with an env file holding `contents`.
fn project(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, contents).unwrap();
    (dir, env_file)
}

#[test]
fn sync_merges_both_sides_and_persists_sorted() {
    let (_dir, env_file) = project("LOCAL_ONLY='l'\nSHARED='old'\n");
    let store = MemoryStore::new(map(&[("SHARED", "new"), ("REMOTE_ONLY", "r")]));

    let mut rec = Reconciler::load(&store, &env_file).unwrap();
    let report = rec.run(Direction::Sync).unwrap();

    assert_eq!(
        fs::read_to_string(&env_file).unwrap(),
        "LOCAL_ONLY='l'\nREMOTE_ONLY='r'\nSHARED='new'\n"
    );
    assert_eq!(
        store.writes(),
        vec![WriteCall::Create {
            name: "LOCAL_ONLY".into(),
            value: "l".into()
        }]
    );
    assert_eq!(report.local_changes().count(), 2);
    assert_eq!(report.remote_changes().count(), 1);
}

#[test]
fn second_sync_is_a_noop() {
    let (_dir, env_file) = project("A='1'\n");
    let store = MemoryStore::new(map(&[("B", "2")]));

    Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Sync)
        .unwrap();
    let writes_after_first = store.writes().len();

    let report = Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Sync)
        .unwrap();

    assert!(report.is_noop());
    assert_eq!(store.writes().len(), writes_after_first);
    assert_eq!(read_env_file(&env_file).unwrap(), store.secrets());
}

#[test]
fn pull_into_missing_file_creates_it() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    let store = MemoryStore::new(map(&[("b", "2"), ("A", "1")]));

    let report = Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Pull)
        .unwrap();

    assert!(report.persisted);
    assert_eq!(fs::read_to_string(&env_file).unwrap(), "A='1'\nb='2'\n");
    assert!(store.writes().is_empty());
}

#[test]
fn pull_overwrites_file_dropping_comments() {
    let (_dir, env_file) = project("# team secrets\nexport A=1\n\nB=\"two words\"\n");
    let store = MemoryStore::default();

    Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Pull)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&env_file).unwrap(),
        "A='1'\nB='two words'\n"
    );
}

#[test]
fn push_never_touches_the_file() {
    let contents = "# keep me\nZ=26\nA=1\n";
    let (_dir, env_file) = project(contents);
    let store = MemoryStore::new(map(&[("A", "0")]));

    let report = Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Push)
        .unwrap();

    assert!(!report.persisted);
    assert_eq!(fs::read_to_string(&env_file).unwrap(), contents);
    assert_eq!(store.secrets(), map(&[("A", "1"), ("Z", "26")]));
}

#[test]
fn failed_push_during_sync_leaves_file_untouched() {
    let contents = "A='1'\nB='2'\n";
    let (_dir, env_file) = project(contents);
    let store = MemoryStore::new(map(&[("R", "remote")])).failing_on("B");

    let mut rec = Reconciler::load(&store, &env_file).unwrap();
    let err = rec.run(Direction::Sync).unwrap_err();

    assert!(matches!(err, EnvSyncError::RemoteIo(_)));
    assert_eq!(fs::read_to_string(&env_file).unwrap(), contents);
    // The write before the failure stays applied remotely.
    assert_eq!(store.secrets(), map(&[("A", "1"), ("R", "remote")]));
}

#[test]
fn failed_listing_aborts_before_any_change() {
    let contents = "A='1'\n";
    let (_dir, env_file) = project(contents);
    let store = MemoryStore::default().failing_list();

    let result = Reconciler::load(&store, &env_file);

    assert!(matches!(result, Err(EnvSyncError::RemoteIo(_))));
    assert_eq!(fs::read_to_string(&env_file).unwrap(), contents);
    assert!(store.writes().is_empty());
}

#[test]
fn awkward_values_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    let remote = map(&[
        ("QUOTE", "it's"),
        ("MULTI", "line1\nline2"),
        ("EMPTY", ""),
        ("HASH", "a#b c"),
    ]);
    let store = MemoryStore::new(remote.clone());

    Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Pull)
        .unwrap();

    assert_eq!(read_env_file(&env_file).unwrap(), remote);

    // Reloading the same file finds nothing to do.
    let report = Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Sync)
        .unwrap();
    assert!(report.is_noop());
}

#[test]
fn sync_scenario_remote_value_wins() {
    let (_dir, env_file) = project("A='1'\n");
    let store = MemoryStore::new(map(&[("A", "2"), ("B", "3")]));

    let mut rec = Reconciler::load(&store, &env_file).unwrap();
    rec.run(Direction::Sync).unwrap();

    assert_eq!(rec.local(), &map(&[("A", "2"), ("B", "3")]));
    assert_eq!(store.secrets(), map(&[("A", "2"), ("B", "3")]));
    assert_eq!(rec.remote(), &store.secrets());
    assert!(store.writes().is_empty());
    assert_eq!(fs::read_to_string(&env_file).unwrap(), "A='2'\nB='3'\n");
}

#[test]
fn pull_after_push_is_a_noop() {
    let (_dir, env_file) = project("X='9'\n");
    let store = MemoryStore::default();

    Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Push)
        .unwrap();
    assert_eq!(store.secrets(), map(&[("X", "9")]));

    let report = Reconciler::load(&store, &env_file)
        .unwrap()
        .run(Direction::Pull)
        .unwrap();
    assert!(report.is_noop());
}

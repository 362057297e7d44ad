//! Secret reconciliation — pull, push and sync between the env file and
//! a remote store.
//!
//! Merges are additive: a key is created when the destination lacks it,
//! overwritten when the values differ, and left alone otherwise. Nothing
//! is ever deleted on either side.

pub mod change;
pub mod compare;

use std::path::{Path, PathBuf};

pub use change::{Change, ChangeKind, Direction, Report, Side};
pub use compare::{compare, Comparison, Planned};

use crate::cli::output;
use crate::envfile::{self, SecretMap};
use crate::errors::Result;
use crate::remote::RemoteStore;

/// Copy every remote key that is missing or different into `local`.
///
/// Returns the decisions in key order. Keys only present locally are
/// untouched.
pub fn pull(local: &mut SecretMap, remote: &SecretMap) -> Vec<Change> {
    let mut changes = Vec::new();

    for (key, remote_value) in remote {
        let kind = match local.get(key) {
            None => ChangeKind::Created,
            Some(local_value) if local_value != remote_value => ChangeKind::Updated,
            Some(_) => continue,
        };

        let change = Change::new(key, kind, Side::Local);
        output::change(&change);
        local.insert(key.clone(), remote_value.clone());
        changes.push(change);
    }

    changes
}

/// Send every local key that is missing or different to `store`, one
/// write call per key, mirroring each successful write into `remote`.
///
/// Stops at the first failed write; decisions applied before it are
/// already in `applied`.
pub fn push<S: RemoteStore + ?Sized>(
    local: &SecretMap,
    remote: &mut SecretMap,
    store: &S,
    applied: &mut Vec<Change>,
) -> Result<()> {
    for (key, local_value) in local {
        let kind = match remote.get(key) {
            None => ChangeKind::Created,
            Some(remote_value) if remote_value != local_value => ChangeKind::Updated,
            Some(_) => continue,
        };

        let change = Change::new(key, kind, Side::Remote);
        output::change(&change);
        match kind {
            ChangeKind::Created => store.create_secret(key, local_value)?,
            ChangeKind::Updated => store.update_secret(key, local_value)?,
        }
        remote.insert(key.clone(), local_value.clone());
        applied.push(change);
    }

    Ok(())
}

/// One reconciliation session: a store, the env file, and the two
/// mappings loaded for this invocation.
pub struct Reconciler<S> {
    store: S,
    env_file: PathBuf,
    local: SecretMap,
    remote: SecretMap,
    persist: bool,
    applied: Vec<Change>,
}

impl<S: RemoteStore> Reconciler<S> {
    /// Build a session from mappings that are already loaded.
    pub fn new(store: S, env_file: impl Into<PathBuf>, local: SecretMap, remote: SecretMap) -> Self {
        Self {
            store,
            env_file: env_file.into(),
            local,
            remote,
            persist: true,
            applied: Vec::new(),
        }
    }

    /// Read the env file, then list the remote secrets.
    pub fn load(store: S, env_file: &Path) -> Result<Self> {
        let local = envfile::read_env_file(env_file)?;
        let remote = store.list_secrets()?;
        tracing::debug!(
            local = local.len(),
            remote = remote.len(),
            "loaded secret mappings"
        );
        Ok(Self::new(store, env_file, local, remote))
    }

    /// Never write the env file (dry runs).
    #[must_use]
    pub fn without_persist(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Remote → local. See [`pull`].
    pub fn pull(&mut self) -> Vec<Change> {
        tracing::debug!("pull phase");
        let changes = pull(&mut self.local, &self.remote);
        self.applied.extend(changes.iter().cloned());
        changes
    }

    /// Local → remote. See [`push`].
    pub fn push(&mut self) -> Result<Vec<Change>> {
        tracing::debug!("push phase");
        let start = self.applied.len();
        push(&self.local, &mut self.remote, &self.store, &mut self.applied)?;
        Ok(self.applied[start..].to_vec())
    }

    /// Overwrite the env file with the local mapping.
    ///
    /// Returns `false` without touching the disk when persistence is off.
    pub fn persist(&self) -> Result<bool> {
        if !self.persist {
            tracing::debug!("persistence disabled, env file left as is");
            return Ok(false);
        }
        envfile::write_env_file(&self.env_file, &self.local)?;
        Ok(true)
    }

    /// Run one direction end to end.
    ///
    /// The env file is written only after every remote write succeeded,
    /// and never by `Push`.
    pub fn run(&mut self, direction: Direction) -> Result<Report> {
        let start = self.applied.len();

        let persisted = match direction {
            Direction::Sync => {
                self.pull();
                self.push()?;
                self.persist()?
            }
            Direction::Pull => {
                self.pull();
                self.persist()?
            }
            Direction::Push => {
                self.push()?;
                false
            }
        };

        Ok(Report {
            direction,
            changes: self.applied[start..].to_vec(),
            persisted,
        })
    }

    pub fn local(&self) -> &SecretMap {
        &self.local
    }

    pub fn remote(&self) -> &SecretMap {
        &self.remote
    }

    /// Every decision applied so far, including those made before a
    /// failure aborted the run.
    pub fn applied(&self) -> &[Change] {
        &self.applied
    }
}

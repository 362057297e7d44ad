//! In-memory remote store.

use std::cell::RefCell;

use super::{RemoteStore, WriteCall};
use crate::envfile::SecretMap;
use crate::errors::{EnvSyncError, Result};

/// A `RemoteStore` backed by a map, recording every write call.
///
/// `fail_on` makes any write to that key (and `fail_listing` makes
/// `list_secrets`) return `RemoteIo`, so error paths can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: RefCell<SecretMap>,
    writes: RefCell<Vec<WriteCall>>,
    fail_on: Option<String>,
    fail_listing: bool,
}

impl MemoryStore {
    pub fn new(secrets: SecretMap) -> Self {
        Self {
            secrets: RefCell::new(secrets),
            ..Self::default()
        }
    }

    /// Fail any create/update of `key`.
    #[must_use]
    pub fn failing_on(mut self, key: &str) -> Self {
        self.fail_on = Some(key.to_string());
        self
    }

    /// Fail `list_secrets`.
    #[must_use]
    pub fn failing_list(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Current remote contents.
    pub fn secrets(&self) -> SecretMap {
        self.secrets.borrow().clone()
    }

    /// Every successful write, in call order.
    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.borrow().clone()
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.fail_on.as_deref() == Some(name) {
            return Err(EnvSyncError::RemoteIo(format!("write of '{name}' rejected")));
        }
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    fn list_secrets(&self) -> Result<SecretMap> {
        if self.fail_listing {
            return Err(EnvSyncError::RemoteIo("listing unavailable".into()));
        }
        Ok(self.secrets())
    }

    fn create_secret(&self, name: &str, value: &str) -> Result<()> {
        self.check(name)?;
        let mut secrets = self.secrets.borrow_mut();
        if secrets.contains_key(name) {
            return Err(EnvSyncError::RemoteIo(format!(
                "secret '{name}' already exists"
            )));
        }
        secrets.insert(name.to_string(), value.to_string());
        self.writes.borrow_mut().push(WriteCall::Create {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn update_secret(&self, name: &str, value: &str) -> Result<()> {
        self.check(name)?;
        let mut secrets = self.secrets.borrow_mut();
        let Some(slot) = secrets.get_mut(name) else {
            return Err(EnvSyncError::RemoteIo(format!("secret '{name}' not found")));
        };
        *slot = value.to_string();
        self.writes.borrow_mut().push(WriteCall::Update {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

//! Dry-run wrapper: real reads, recorded writes.

use std::cell::RefCell;

use super::{RemoteStore, WriteCall};
use crate::envfile::SecretMap;
use crate::errors::Result;

/// Lists through to the wrapped store; create/update are only recorded.
pub struct DryRun<S> {
    inner: S,
    planned: RefCell<Vec<WriteCall>>,
}

impl<S: RemoteStore> DryRun<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            planned: RefCell::new(Vec::new()),
        }
    }

    /// Writes that a real run would have sent, in order.
    pub fn planned(&self) -> Vec<WriteCall> {
        self.planned.borrow().clone()
    }
}

impl<S: RemoteStore> RemoteStore for DryRun<S> {
    fn list_secrets(&self) -> Result<SecretMap> {
        self.inner.list_secrets()
    }

    fn create_secret(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(secret = name, "dry run: skipping create");
        self.planned.borrow_mut().push(WriteCall::Create {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn update_secret(&self, name: &str, value: &str) -> Result<()> {
        tracing::debug!(secret = name, "dry run: skipping update");
        self.planned.borrow_mut().push(WriteCall::Update {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

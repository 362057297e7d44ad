//! Remote secret stores.
//!
//! Each store implements [`RemoteStore`]: list everything in one
//! project/environment scope, create a secret, update a secret. There is
//! no delete: reconciliation never removes keys.
//!
//! - `InfisicalClient`: the Infisical REST API (`infisical`)
//! - `MemoryStore`: in-process store used by tests (`memory`)
//! - `DryRun`: wraps another store and records writes instead of sending them (`dry_run`)

pub mod dry_run;
pub mod infisical;
pub mod memory;

pub use dry_run::DryRun;
pub use infisical::InfisicalClient;
pub use memory::MemoryStore;

use crate::envfile::SecretMap;
use crate::errors::Result;

/// The capability set reconciliation needs from a secrets manager.
pub trait RemoteStore {
    /// Fetch every secret in the configured scope.
    fn list_secrets(&self) -> Result<SecretMap>;

    /// Create a secret that does not exist remotely yet.
    fn create_secret(&self, name: &str, value: &str) -> Result<()>;

    /// Overwrite the value of an existing secret.
    fn update_secret(&self, name: &str, value: &str) -> Result<()>;
}

impl<S: RemoteStore + ?Sized> RemoteStore for &S {
    fn list_secrets(&self) -> Result<SecretMap> {
        (**self).list_secrets()
    }

    fn create_secret(&self, name: &str, value: &str) -> Result<()> {
        (**self).create_secret(name, value)
    }

    fn update_secret(&self, name: &str, value: &str) -> Result<()> {
        (**self).update_secret(name, value)
    }
}

/// A write call issued against a store, as recorded by `MemoryStore` and `DryRun`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    Create { name: String, value: String },
    Update { name: String, value: String },
}

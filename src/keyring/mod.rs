//! OS keyring storage for the Infisical client secret.
//!
//! Stores and retrieves the machine-identity client secret from the
//! operating system's secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! Entries are keyed by project id, so several projects can each keep
//! their own identity.

use crate::errors::{EnvSyncError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "envsync";

fn entry(project_id: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, &format!("infisical:{project_id}"))
        .map_err(|e| EnvSyncError::KeyringError(format!("failed to create keyring entry: {e}")))
}

/// Store the client secret for `project_id`.
pub fn store_client_secret(project_id: &str, secret: &str) -> Result<()> {
    entry(project_id)?.set_password(secret).map_err(|e| {
        EnvSyncError::KeyringError(format!("failed to store client secret in keyring: {e}"))
    })
}

/// Retrieve the client secret for `project_id`.
///
/// Returns `None` if nothing is stored (rather than an error).
pub fn get_client_secret(project_id: &str) -> Result<Option<String>> {
    match entry(project_id)?.get_password() {
        Ok(secret) => Ok(Some(secret)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(EnvSyncError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

/// Delete the stored client secret for `project_id`.
pub fn delete_client_secret(project_id: &str) -> Result<()> {
    match entry(project_id)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(EnvSyncError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}

//! `envsync auth` — manage stored credentials.
//!
//! Subcommands:
//! - `envsync auth keyring`          — verify and save the client secret to the OS keyring
//! - `envsync auth keyring --delete` — remove it again
//!
//! When the keyring feature is not compiled in, keyring commands return
//! a helpful error message.

use crate::cli::Cli;
use crate::errors::{EnvSyncError, Result};

/// Execute `envsync auth keyring` — save or delete the client secret.
pub fn execute_keyring(cli: &Cli, delete: bool) -> Result<()> {
    #[cfg(feature = "keyring-store")]
    {
        use zeroize::Zeroizing;

        use crate::cli::{load_config, output};
        use crate::config::Credentials;
        use crate::remote::InfisicalClient;

        let config = load_config(cli)?;
        let project_id = config.project_id.clone().ok_or_else(|| {
            EnvSyncError::ConfigMissing("INFISICAL_PROJECT_ID (--project-id)".into())
        })?;

        if delete {
            crate::keyring::delete_client_secret(&project_id)?;
            output::success("Client secret removed from OS keyring.");
            return Ok(());
        }

        // The user is explicitly setting the secret: never read it back
        // from the keyring here.
        let secret = match cli.client_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Zeroizing::new(s.to_string()),
            None => Zeroizing::new(
                dialoguer::Password::new()
                    .with_prompt("Enter client secret")
                    .interact()
                    .map_err(|e| EnvSyncError::CommandFailed(format!("secret prompt: {e}")))?,
            ),
        };

        let credentials =
            Credentials::resolve(cli.client_id.clone(), Some(secret), Some(project_id))?;

        // Verify the identity works before storing it.
        InfisicalClient::login(&config, &credentials)?;

        crate::keyring::store_client_secret(&credentials.project_id, &credentials.client_secret)?;
        output::success("Client secret saved to OS keyring. Future runs will use it automatically.");

        Ok(())
    }

    #[cfg(not(feature = "keyring-store"))]
    {
        let _ = (cli, delete);
        Err(EnvSyncError::KeyringError(
            "keyring support not compiled — rebuild with `cargo build --features keyring-store`"
                .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn keyring_disabled_returns_error() {
        #[cfg(not(feature = "keyring-store"))]
        {
            use clap::Parser;
            let cli = crate::cli::Cli::parse_from(["envsync", "auth", "keyring"]);
            let result = super::execute_keyring(&cli, false);
            let msg = result.unwrap_err().to_string();
            assert!(
                msg.contains("keyring support not compiled"),
                "unexpected error: {msg}"
            );
        }
    }
}

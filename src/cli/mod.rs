//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod gitignore;
pub mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::config::{validate_environment, Config, Credentials, Settings};
use crate::errors::{EnvSyncError, Result};
use crate::reconcile::Direction;

/// envsync CLI: reconcile a local env file with an Infisical project.
#[derive(Parser)]
#[command(
    name = "envsync",
    about = "Reconcile a local .env file with an Infisical project",
    version
)]
pub struct Cli {
    /// What to do (omit to choose Sync / Pull / Push interactively)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Remote environment slug (default: from .envsync.toml, else dev)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Local env file (default: from .envsync.toml, else .env)
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Infisical project id
    #[arg(long, env = "INFISICAL_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// Machine identity client id
    #[arg(long, env = "INFISICAL_CLIENT_ID", global = true, hide_env_values = true)]
    pub client_id: Option<String>,

    /// Machine identity client secret
    #[arg(long, env = "INFISICAL_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Infisical base URL (default: https://app.infisical.com)
    #[arg(long, env = "INFISICAL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Show what would change without writing anywhere
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Pull, then push, then save the env file
    Sync,

    /// Copy remote secrets into the env file
    Pull,

    /// Copy env file secrets to the remote
    Push,

    /// Compare the env file with the remote without changing anything
    Status {
        /// Show secret values in the comparison
        #[arg(long)]
        show_values: bool,
    },

    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// View the audit log of applied changes
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

/// Auth subcommands.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the client secret to the OS keyring for this project
    Keyring {
        /// Remove the stored secret instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` enables debug output for this
/// crate and everything else stays at `warn`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "envsync=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load `.envsync.toml` from the working directory and apply CLI overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;

    if let Some(env) = &cli.env {
        settings.environment = env.clone();
    }
    if let Some(env_file) = &cli.env_file {
        settings.env_file = env_file.clone();
    }
    if let Some(api_url) = &cli.api_url {
        settings.api_url = api_url.clone();
    }
    if let Some(project_id) = &cli.project_id {
        settings.project_id = Some(project_id.clone());
    }

    // Catch typos before they reach the remote as an unknown environment.
    validate_environment(&settings.environment)?;

    Ok(settings.into_config(&cwd))
}

/// Gather the credentials needed to talk to the remote.
///
/// The client secret comes from `--client-secret` / `INFISICAL_CLIENT_SECRET`,
/// then from the OS keyring (if compiled with `keyring-store`). Anything
/// still missing is a `ConfigMissing` error.
pub fn resolve_credentials(cli: &Cli, config: &Config) -> Result<Credentials> {
    let project_id = config.project_id.clone();

    let mut client_secret = cli
        .client_secret
        .clone()
        .filter(|s| !s.is_empty())
        .map(Zeroizing::new);

    #[cfg(feature = "keyring-store")]
    if client_secret.is_none() {
        if let Some(id) = project_id.as_deref() {
            match crate::keyring::get_client_secret(id) {
                Ok(Some(secret)) => client_secret = Some(Zeroizing::new(secret)),
                Ok(None) => {}
                Err(e) => tracing::debug!(error = %e, "keyring unavailable"),
            }
        }
    }

    // Suppress the unused-mut warning when the keyring feature is off.
    #[cfg(not(feature = "keyring-store"))]
    let _ = &mut client_secret;

    Credentials::resolve(cli.client_id.clone(), client_secret, project_id)
}

/// Ask which direction to run.
///
/// Requires an interactive terminal; scripts must pass a subcommand.
pub fn prompt_direction() -> Result<Direction> {
    if !console::user_attended_stderr() {
        return Err(EnvSyncError::CommandFailed(
            "no command given and no terminal to ask — use `envsync sync`, `pull` or `push`"
                .into(),
        ));
    }

    let labels: Vec<&str> = Direction::ALL.iter().map(|d| d.describe()).collect();

    let choice = dialoguer::Select::new()
        .with_prompt("Select option")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(|e| EnvSyncError::CommandFailed(format!("selection prompt: {e}")))?;

    choice
        .map(|index| Direction::ALL[index])
        .ok_or(EnvSyncError::UserCancelled)
}

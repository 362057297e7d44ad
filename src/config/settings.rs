use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{EnvSyncError, Result};

/// Project-level configuration, loaded from `.envsync.toml`.
///
/// Every field has a sensible default so envsync works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Remote environment slug to reconcile against (e.g. "dev").
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Env file (relative to project root) holding the local secrets.
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Base URL of the Infisical instance.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Folder inside the environment where secrets live.
    #[serde(default = "default_secret_path")]
    pub secret_path: String,

    /// Directory (relative to project root) for local state such as the audit log.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Infisical project id. Not a secret, so it may be committed here.
    #[serde(default)]
    pub project_id: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_environment() -> String {
    "dev".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_api_url() -> String {
    "https://app.infisical.com".to_string()
}

fn default_secret_path() -> String {
    "/".to_string()
}

fn default_state_dir() -> String {
    ".envsync".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            env_file: default_env_file(),
            api_url: default_api_url(),
            secret_path: default_secret_path(),
            state_dir: default_state_dir(),
            project_id: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".envsync.toml";

    /// Load settings from `<project_dir>/.envsync.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            EnvSyncError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve relative paths against `project_dir`.
    pub fn into_config(self, project_dir: &Path) -> Config {
        Config {
            env_file: project_dir.join(&self.env_file),
            state_dir: project_dir.join(&self.state_dir),
            project_dir: project_dir.to_path_buf(),
            environment: self.environment,
            api_url: self.api_url,
            secret_path: self.secret_path,
            project_id: self.project_id,
        }
    }
}

/// Settings after CLI overrides, with absolute paths.
///
/// Built once per invocation and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub env_file: PathBuf,
    pub state_dir: PathBuf,
    pub environment: String,
    pub api_url: String,
    pub secret_path: String,
    pub project_id: Option<String>,
}

/// Validate that an environment slug is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens. Must not be empty
/// or start/end with a hyphen. Max length 64 characters.
pub fn validate_environment(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EnvSyncError::ConfigError(
            "environment name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(EnvSyncError::ConfigError(
            "environment name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(EnvSyncError::ConfigError(format!(
            "environment name '{name}' is invalid — only lowercase letters, digits, and hyphens are allowed"
        )));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(EnvSyncError::ConfigError(format!(
            "environment name '{name}' cannot start or end with a hyphen"
        )));
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────

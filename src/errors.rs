use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in envsync.
#[derive(Debug, Error)]
pub enum EnvSyncError {
    // --- Config errors ---
    #[error("Missing required configuration: {0}")]
    ConfigMissing(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    // --- Remote store errors ---
    #[error("Remote store request failed: {0}")]
    RemoteIo(String),

    // --- Local storage errors ---
    #[error("Failed to read env file {path}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    #[error("Failed to write env file {path}: {reason}")]
    StorageWrite { path: PathBuf, reason: String },

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for envsync results.
pub type Result<T> = std::result::Result<T, EnvSyncError>;

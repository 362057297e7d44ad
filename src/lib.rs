pub mod cli;
pub mod config;
pub mod envfile;
pub mod errors;
pub mod reconcile;
pub mod remote;

#[cfg(feature = "audit-log")]
pub mod audit;

#[cfg(feature = "keyring-store")]
pub mod keyring;

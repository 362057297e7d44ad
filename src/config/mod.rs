//! Configuration — project settings file and remote credentials.

pub mod credentials;
pub mod settings;

pub use credentials::Credentials;
pub use settings::{validate_environment, Config, Settings};

//! One module per subcommand.

pub mod audit_cmd;
pub mod auth;
pub mod completions;
pub mod reconcile;
pub mod status;

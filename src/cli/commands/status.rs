//! `envsync status` — compare the env file with the remote.
//!
//! Usage:
//!   envsync status
//!   envsync --env prod status --show-values

use console::style;

use crate::cli::{load_config, output, resolve_credentials, Cli};
use crate::envfile::{read_env_file, SecretMap};
use crate::errors::Result;
use crate::reconcile::{compare, Comparison, Direction};
use crate::remote::{InfisicalClient, RemoteStore};

/// Execute the `status` command.
pub fn execute(cli: &Cli, show_values: bool) -> Result<()> {
    let config = load_config(cli)?;
    let credentials = resolve_credentials(cli, &config)?;

    let local = read_env_file(&config.env_file)?;
    let client = InfisicalClient::login(&config, &credentials)?;
    let remote = client.list_secrets()?;

    println!(
        "\n{} {} vs {}",
        style("Status:").bold(),
        style(config.env_file.display()).cyan(),
        style(&config.environment).cyan()
    );
    println!();

    let cmp = report(&local, &remote, show_values);
    if cmp.in_sync() {
        output::success("Env file and remote are in sync.");
    }

    Ok(())
}

/// Print the comparison table and the per-direction plan.
pub fn report(local: &SecretMap, remote: &SecretMap, show_values: bool) -> Comparison {
    let cmp = compare(local, remote);
    output::print_comparison(&cmp, local, remote, show_values);

    println!();
    println!(
        "  {} local only, {} remote only, {} differ, {} in sync",
        style(cmp.only_local.len()).cyan().bold(),
        style(cmp.only_remote.len()).magenta().bold(),
        style(cmp.changed.len()).yellow().bold(),
        style(cmp.unchanged.len()).dim()
    );

    if !cmp.in_sync() {
        println!();
        for direction in Direction::ALL {
            let plan = cmp.planned(direction);
            println!(
                "  {:<5} would write {} local and {} remote secret(s)",
                style(direction).bold(),
                plan.local_creates + plan.local_updates,
                plan.remote_creates + plan.remote_updates
            );
        }
    }

    cmp
}

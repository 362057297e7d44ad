//! `envsync audit` — display the audit log.
//!
//! Usage:
//!   envsync audit               # show last 50 entries
//!   envsync audit --last 20     # show last 20
//!   envsync audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::cli::Cli;
use crate::errors::{EnvSyncError, Result};

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    use crate::audit::AuditLog;
    use crate::cli::{load_config, output};

    let config = load_config(cli)?;

    if !AuditLog::db_path(&config.state_dir).exists() {
        output::info("No audit entries found.");
        output::tip("Entries are recorded by `envsync sync`, `pull` and `push`.");
        return Ok(());
    }

    let audit = AuditLog::open(&config.state_dir)
        .ok_or_else(|| EnvSyncError::AuditError("failed to open audit database".into()))?;

    let since_dt = since.map(parse_duration).transpose()?;
    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

#[cfg(not(feature = "audit-log"))]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let _ = (cli, last, since);
    Err(EnvSyncError::AuditError(
        "audit log support not compiled — rebuild with the `audit-log` feature".into(),
    ))
}

/// Parse a human-friendly duration string like "7d", "24h", "30m"
/// into the instant that long ago.
pub fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();
    let invalid = || {
        EnvSyncError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        ))
    };

    let mut chars = input.chars();
    let unit = chars.next_back().ok_or_else(invalid)?;
    let num: i64 = chars.as_str().parse().map_err(|_| invalid())?;

    let duration = match unit {
        'd' => chrono::Duration::days(num),
        'h' => chrono::Duration::hours(num),
        'm' => chrono::Duration::minutes(num),
        _ => return Err(invalid()),
    };

    Ok(Utc::now() - duration)
}

/// Print audit entries in a formatted table.
#[cfg(feature = "audit-log")]
fn print_audit_table(entries: &[crate::audit::AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Environment", "Key", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.environment.clone(),
            entry.key_name.clone().unwrap_or_else(|| "-".into()),
            entry.details.clone().unwrap_or_else(|| "-".into()),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

#[cfg(feature = "audit-log")]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "pull" => style(op).green().to_string(),
        "push" => style(op).blue().to_string(),
        "sync" => style(op).cyan().to_string(),
        _ => op.to_string(),
    }
}

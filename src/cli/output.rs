//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::envfile::SecretMap;
use crate::reconcile::{Change, ChangeKind, Comparison};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Trace one reconciliation decision: "+ Creating local secret KEY".
pub fn change(change: &Change) {
    let marker = match change.kind {
        ChangeKind::Created => style("+").green().bold(),
        ChangeKind::Updated => style("~").yellow().bold(),
    };
    println!("  {marker} {change}");
}

/// Print a local-vs-remote comparison as a table.
///
/// Values are masked unless `show_values` is set.
pub fn print_comparison(
    cmp: &Comparison,
    local: &SecretMap,
    remote: &SecretMap,
    show_values: bool,
) {
    if cmp.in_sync() && cmp.unchanged.is_empty() {
        info("No secrets on either side yet.");
        return;
    }

    let shown = |value: Option<&String>| match value {
        None => style("-").dim().to_string(),
        Some(v) if show_values => v.clone(),
        Some(_) => "••••••".to_string(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Local", "Remote", "State"]);

    let rows = cmp
        .only_local
        .iter()
        .map(|k| (k, style("local only").cyan().to_string()))
        .chain(
            cmp.only_remote
                .iter()
                .map(|k| (k, style("remote only").magenta().to_string())),
        )
        .chain(
            cmp.changed
                .iter()
                .map(|k| (k, style("differs").yellow().to_string())),
        )
        .chain(
            cmp.unchanged
                .iter()
                .map(|k| (k, style("in sync").dim().to_string())),
        );

    for (key, state) in rows {
        table.add_row(vec![
            key.clone(),
            shown(local.get(key)),
            shown(remote.get(key)),
            state,
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{compare, Side};

    #[test]
    fn helpers_do_not_panic() {
        success("ok");
        info("info");
        tip("tip");
        warning("warn");
        change(&Change::new("KEY", ChangeKind::Created, Side::Local));
    }

    #[test]
    fn comparison_table_handles_every_state() {
        let local = SecretMap::from([
            ("A".into(), "1".into()),
            ("L".into(), "x".into()),
            ("S".into(), "s".into()),
        ]);
        let remote = SecretMap::from([
            ("A".into(), "2".into()),
            ("R".into(), "y".into()),
            ("S".into(), "s".into()),
        ]);
        let cmp = compare(&local, &remote);
        print_comparison(&cmp, &local, &remote, false);
        print_comparison(&cmp, &local, &remote, true);
    }
}

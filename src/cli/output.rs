//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::crypto::StorageInfo;
use crate::provider::ProviderInfo;

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

/// Format a millisecond Unix timestamp as local-independent UTC.
pub fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Print providers (Id, Name, Key format), marking the selected one.
pub fn print_providers_table(providers: &[ProviderInfo], selected: Option<&str>) {
    if providers.is_empty() {
        info("No providers registered.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Id", "Name", "Key format"]);

    for p in providers {
        let marker = if Some(p.id) == selected { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            p.id.to_string(),
            p.name.to_string(),
            p.key_format.to_string(),
        ]);
    }

    println!("{table}");
}

/// Print namespace status as a two-column table.
pub fn print_status_table(
    prefix: &str,
    provider: Option<&ProviderInfo>,
    key_info: Option<&StorageInfo>,
) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Namespace".to_string(), prefix.to_string()]);
    table.add_row(vec![
        "Provider".to_string(),
        provider
            .map(|p| format!("{} ({})", p.name, p.id))
            .unwrap_or_else(|| "none".to_string()),
    ]);

    match key_info {
        Some(info) => {
            let state = if info.is_expired { "expired" } else { "stored" };
            table.add_row(vec!["API key".to_string(), state.to_string()]);
            table.add_row(vec![
                "Saved at".to_string(),
                format_timestamp(info.timestamp),
            ]);
            table.add_row(vec!["Record version".to_string(), info.version.clone()]);
        }
        None => {
            table.add_row(vec!["API key".to_string(), "not set".to_string()]);
        }
    }

    println!("{table}");
}

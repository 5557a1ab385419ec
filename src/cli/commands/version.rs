//! `byoai version` — display version and build features.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("byoai {current}");

    let features = [
        ("sqlite-store", cfg!(feature = "sqlite-store")),
        ("http", cfg!(feature = "http")),
    ];
    for (name, enabled) in features {
        let mark = if enabled {
            style("on").green()
        } else {
            style("off").dim()
        };
        println!("  {name}: {mark}");
    }

    Ok(())
}

//! `byoai clear` — remove every value in the namespace.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_client, Cli};
use crate::errors::{ByoaiError, Result};

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let client = open_client(cli)?;
    let prefix = client.storage().prefix().to_string();

    // Unless --force is set, ask for confirmation before clearing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove everything stored under '{prefix}'?"))
            .default(false)
            .interact()
            .map_err(|e| ByoaiError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    client.clear_all_data()?;
    output::success(&format!("Cleared namespace '{prefix}'"));

    Ok(())
}

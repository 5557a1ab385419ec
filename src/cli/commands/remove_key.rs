//! `byoai remove-key` — delete the stored API key.

use crate::cli::output;
use crate::cli::{open_client, Cli};
use crate::errors::Result;

/// Execute the `remove-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let client = open_client(cli)?;

    if !client.has_api_key()? {
        output::info("No API key stored.");
        return Ok(());
    }

    client.remove_api_key()?;
    output::success("API key removed");

    Ok(())
}

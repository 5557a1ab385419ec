//! `byoai providers` — list registered providers.

use crate::cli::output;
use crate::cli::{open_client, Cli};
use crate::errors::Result;

/// Execute the `providers` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let client = open_client(cli)?;
    let selected = client.provider_id()?;

    output::print_providers_table(&client.providers().all(), selected.as_deref());

    Ok(())
}

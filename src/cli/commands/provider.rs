//! `byoai provider` — show or change the selected provider.

use crate::cli::output;
use crate::cli::{open_client, Cli};
use crate::errors::Result;

/// Execute the `provider` command.
pub fn execute(cli: &Cli, id: Option<&str>) -> Result<()> {
    let client = open_client(cli)?;

    let Some(id) = id else {
        match client.provider()? {
            Some(p) => println!("{}", p.info().id),
            None => {
                output::info("No provider selected.");
                output::tip("Run `byoai providers` to see what is available.");
            }
        }
        return Ok(());
    };

    client.change_provider(id)?;
    output::success(&format!("Selected provider '{id}'"));

    Ok(())
}

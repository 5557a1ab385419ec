//! `byoai status` — show the selected provider and the key record's metadata.

use crate::cli::output;
use crate::cli::{open_client, Cli};
use crate::errors::Result;

/// Execute the `status` command.
///
/// Reads metadata only; nothing is decrypted.
pub fn execute(cli: &Cli) -> Result<()> {
    let client = open_client(cli)?;

    let provider = client.provider()?;
    let key_info = client.api_key_info()?;

    output::print_status_table(
        client.storage().prefix(),
        provider.as_ref().map(|p| p.info()),
        key_info.as_ref(),
    );

    match &key_info {
        None => output::tip("Run `byoai set-key` to store a key."),
        Some(info) if info.is_expired => {
            output::warning("The stored key has expired and will be discarded on next use.");
        }
        Some(_) => {}
    }

    Ok(())
}

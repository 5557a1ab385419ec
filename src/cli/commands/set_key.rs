//! `byoai set-key` — validate and store an API key for the selected provider.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{mask_key, open_client, Cli};
use crate::errors::{ByoaiError, Result};

/// Execute the `set-key` command.
pub fn execute(cli: &Cli, key: Option<&str>) -> Result<()> {
    let client = open_client(cli)?;
    let provider = client.provider()?.ok_or(ByoaiError::NoProvider)?;
    let info = provider.info();

    // Determine the key from one of three sources.
    let api_key = Zeroizing::new(if let Some(k) = key {
        // Source 1: Inline value on the command line.
        output::warning("Key provided on command line — it may appear in shell history.");
        k.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        if let Some(url) = info.api_key_url {
            output::tip(&format!("Get a key at {url}"));
        }
        dialoguer::Password::new()
            .with_prompt(format!("{} API key", info.name))
            .interact()
            .map_err(|e| ByoaiError::CommandFailed(format!("input prompt: {e}")))?
    });

    let replaced = client.has_api_key()?;
    client.save_api_key(&api_key)?;

    let verb = if replaced { "replaced" } else { "saved" };
    output::success(&format!(
        "{} key {} ({verb})",
        info.name,
        mask_key(&api_key)
    ));

    Ok(())
}

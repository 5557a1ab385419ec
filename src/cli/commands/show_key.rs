//! `byoai show-key` — decrypt and print the stored API key.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{mask_key, open_client, Cli};
use crate::client::API_KEY;
use crate::errors::{ByoaiError, Result};

/// Execute the `show-key` command.
pub fn execute(cli: &Cli, reveal: bool) -> Result<()> {
    let client = open_client(cli)?;

    // An expired or unreadable record is removed here and reads as absent.
    let api_key = client
        .storage()
        .retrieve(API_KEY)?
        .map(Zeroizing::new)
        .ok_or(ByoaiError::NoApiKey)?;

    if reveal {
        println!("{}", api_key.as_str());
    } else {
        println!("{}", mask_key(&api_key));
        output::tip("Use --reveal to print the full key.");
    }

    Ok(())
}

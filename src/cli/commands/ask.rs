//! `byoai ask` — send a prompt, optionally with an image, and print the answer.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::cli::{open_client, Cli};
use crate::errors::{ByoaiError, Result};
use crate::provider::CallOptions;

/// Execute the `ask` command.
pub fn execute(cli: &Cli, prompt: &str, image: Option<&Path>) -> Result<()> {
    let client = open_client(cli)?;

    let options = match image {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                ByoaiError::CommandFailed(format!("reading {}: {e}", path.display()))
            })?;
            let mime = image_mime(path)?;
            CallOptions::image_analysis(
                BASE64.encode(&bytes),
                prompt,
                |raw| Ok(raw.to_string()),
                Some(mime),
            )
        }
        None => CallOptions::raw_text(prompt),
    };

    let answer = client.call(options)?;
    println!("{}", answer.trim_end());

    Ok(())
}

/// Pick an image mime type from the file extension.
fn image_mime(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        other => Err(ByoaiError::CommandFailed(format!(
            "unsupported image type '{other}' — use jpg, png, webp, gif, heic or heif"
        ))),
    }
}

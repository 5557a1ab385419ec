//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::client::{Byoai, ByoaiConfig};
use crate::config::Settings;
use crate::errors::Result;
use crate::provider::ProviderRegistry;
use crate::storage::{KeyValueStore, StorageRegistry};

/// BYOAI CLI: encrypted storage for your own AI provider keys.
#[derive(Parser)]
#[command(
    name = "byoai",
    about = "Bring-your-own-AI key vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory holding .byoai.toml and the store (default: current directory)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Storage namespace prefix (overrides storage_prefix)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Fingerprint the encryption key is derived from (overrides encryption.custom_fingerprint)
    #[arg(long, env = "BYOAI_FINGERPRINT", hide_env_values = true, global = true)]
    pub fingerprint: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Save an API key for the selected provider
    SetKey {
        /// API key (omit for piped stdin or interactive prompt)
        key: Option<String>,
    },

    /// Print the stored API key (masked unless --reveal)
    ShowKey {
        /// Print the full key
        #[arg(long)]
        reveal: bool,
    },

    /// Remove the stored API key
    RemoveKey,

    /// Show provider, key presence, and key age
    Status,

    /// Show or change the selected provider
    Provider {
        /// Provider id to select (e.g. gemini)
        id: Option<String>,
    },

    /// List available providers
    Providers,

    /// Remove every value in the namespace
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Send a prompt (and optionally an image) to the selected provider
    Ask {
        /// Prompt text
        prompt: String,

        /// Image file to send with the prompt
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The project directory: `--dir`, or the current directory.
pub fn project_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load `.byoai.toml` and apply the command-line overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(&project_dir(cli)?)?;

    if let Some(prefix) = &cli.prefix {
        settings.storage_prefix = prefix.clone();
    }
    if let Some(fingerprint) = cli.fingerprint.as_ref().filter(|f| !f.is_empty()) {
        settings.encryption.custom_fingerprint = Some(fingerprint.clone());
    }

    Ok(settings)
}

/// Open the persistent store under `<dir>/<store_dir>`.
pub fn open_backend(cli: &Cli, settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    let path = settings.store_path(&project_dir(cli)?);
    tracing::debug!(path = %path.display(), "opening store");

    #[cfg(feature = "sqlite-store")]
    {
        Ok(Arc::new(crate::storage::SqliteStore::open(&path)?))
    }
    #[cfg(not(feature = "sqlite-store"))]
    {
        Ok(Arc::new(crate::storage::JsonFileStore::new(path)))
    }
}

/// Build a client over the project's store with the built-in providers.
pub fn open_client(cli: &Cli) -> Result<Byoai> {
    let settings = load_settings(cli)?;
    let backend = open_backend(cli, &settings)?;
    let registry = StorageRegistry::new(backend);
    let config: ByoaiConfig = settings.byoai_config();
    Byoai::new(config, &registry, ProviderRegistry::with_builtin())
}

/// Show the first and last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

//! Project configuration (`.byoai.toml`).

pub mod settings;

pub use settings::Settings;

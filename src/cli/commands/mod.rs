//! One module per subcommand, each exposing `execute`.

pub mod ask;
pub mod clear;
pub mod completions;
pub mod provider;
pub mod providers;
pub mod remove_key;
pub mod set_key;
pub mod show_key;
pub mod status;
pub mod version;

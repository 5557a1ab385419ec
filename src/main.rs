use byoai::cli::{commands, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warnings only, or debug with --verbose.
    let default_level = if cli.verbose { "byoai=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::SetKey { ref key } => commands::set_key::execute(&cli, key.as_deref()),
        Commands::ShowKey { reveal } => commands::show_key::execute(&cli, reveal),
        Commands::RemoveKey => commands::remove_key::execute(&cli),
        Commands::Status => commands::status::execute(&cli),
        Commands::Provider { ref id } => commands::provider::execute(&cli, id.as_deref()),
        Commands::Providers => commands::providers::execute(&cli),
        Commands::Clear { force } => commands::clear::execute(&cli, force),
        Commands::Ask {
            ref prompt,
            ref image,
        } => commands::ask::execute(&cli, prompt, image.as_deref()),
        Commands::Version => commands::version::execute(),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        byoai::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use pymdgen::cli::Cli;
use pymdgen::commands::{generate, GenerateConfig};
use pymdgen::config::{load_config, load_config_file, PymdgenConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let file_config = load_file_config(&cli)?;
    let config = GenerateConfig::from_sources(cli, file_config)?;
    generate(&config)?;
    Ok(())
}

// RUST_LOG takes precedence over --debug
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_file_config(cli: &Cli) -> Result<PymdgenConfig> {
    match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display())),
        None => Ok(load_config()),
    }
}

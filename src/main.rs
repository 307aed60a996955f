//! titools CLI - Entry point
//!
//! Usage: titools <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use titools::cli::{Cli, Commands};
use titools::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, RUST_LOG wins over --verbose)
    let default_filter = if cli.verbose { "titools=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Install(args) => {
            titools::cli::install::run(args, &Config::load_or_default(config_path)?)
        }
        Commands::Agents(args) => {
            titools::cli::agents::run(args, &Config::load_or_default(config_path)?)
        }
        Commands::Update(args) => {
            titools::cli::update::run(args, &Config::load_or_default(config_path)?)
        }
        Commands::Uninstall(args) => titools::cli::uninstall::run(args),
        Commands::Config(args) => titools::cli::config::run(args, config_path),
    }
}

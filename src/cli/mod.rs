//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod agents;
pub mod config;
pub mod install;
pub mod uninstall;
pub mod update;
pub mod utils;

/// titools - Titanium SDK Skills CLI
///
/// Manage skills and agents for AI coding assistants.
#[derive(Parser, Debug)]
#[command(name = "titools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "TITOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install Titanium skills and agents to your AI coding assistant
    Install(install::InstallArgs),

    /// Add AGENTS.md/CLAUDE.md/GEMINI.md to your Titanium project
    Agents(agents::AgentsArgs),

    /// Update Titanium skills and docs to the latest version
    Update(update::UpdateArgs),

    /// Remove Titanium skills and agents
    Uninstall(uninstall::UninstallArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}

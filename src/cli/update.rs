//! `titools update` command
//!
//! Reinstalls skills, agents and the template when a newer release is
//! published, and refreshes the skill links of every detected platform.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::install::install_bundle;
use super::utils;
use crate::config::{Config, Layout, PACKAGE_VERSION};
use crate::core::platform::detect_platforms;
use crate::remote::{check_for_update, SourceClient};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Reinstall even when already up to date
    #[arg(short, long)]
    pub force: bool,

    /// Local titools checkout to update from instead of downloading
    #[arg(long, env = "TITOOLS_SOURCE")]
    pub source: Option<PathBuf>,
}

pub fn run(args: UpdateArgs, config: &Config) -> Result<()> {
    utils::header("Titanium SDK Skills Updater");

    let result = update(args, config);
    if result.is_err() {
        utils::fail("Update failed");
        println!();
        println!("You can try manually installing from:");
        println!("{}", config.source.repo_url.cyan());
    }
    result
}

fn update(args: UpdateArgs, config: &Config) -> Result<()> {
    // A local checkout is always installed as-is
    if !args.force && args.source.is_none() {
        eprintln!("Checking for updates...");
        let client = SourceClient::from_config(&config.source)?;

        match check_for_update(&client, PACKAGE_VERSION)? {
            None => {
                utils::info(&format!("Already up to date (v{})", PACKAGE_VERSION));
                println!();
                println!(
                    "{} Skills and agents are already at the latest version",
                    "✓".green()
                );
                println!();
                return Ok(());
            }
            Some(latest) => {
                utils::succeed("Update available!");
                println!();
                println!("{}", format!("Current: {}", PACKAGE_VERSION).dimmed());
                println!("{}", format!("Latest:  {}", latest).dimmed());
                println!();
            }
        }
    }

    let layout = Layout::from_env();
    let detected = detect_platforms(&layout);

    if detected.is_empty() {
        println!("{}", "No AI coding assistants detected.".yellow());
        println!("Update will install skills to ~/.agents/skills/");
        println!();
    } else {
        for platform in &detected {
            utils::succeed(&platform.to_string());
        }
        println!();
    }

    let bundle = utils::resolve_bundle(args.source, config)?;
    install_bundle(bundle.source(), &layout, &detected, None)?;

    println!();
    println!("{}", "✓ Update complete!".green());
    println!();
    println!(
        "{} Run in your Titanium project: {}",
        "▸".bold(),
        "titools agents".cyan()
    );
    println!();

    Ok(())
}

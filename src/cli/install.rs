//! `titools install` command
//!
//! Installs skills, agents and AGENTS-TEMPLATE.md, then links the skills
//! into every selected assistant platform.
//!
//! # Usage
//! ```bash
//! titools install                 # Pick platforms interactively
//! titools install --all           # All detected platforms
//! titools install --path ./skills # Custom skills directory, no linking
//! titools install --source ~/src/titools   # Use a local checkout
//! titools install --platform gemini       # Only link into Gemini CLI
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::debug;

use super::utils::{self, format_list};
use crate::config::{Config, Layout, AGENTS, SKILLS};
use crate::core::bundle::BundleSource;
use crate::core::link::link_skills;
use crate::core::platform::{bin_dir, detect_os, detect_platforms, Os, Platform};

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Install to all detected platforms without prompting
    #[arg(short, long)]
    pub all: bool,

    /// Install skills to a custom path (skips platform linking)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Link only into these platforms (claude, gemini, codex)
    #[arg(short, long, value_delimiter = ',', conflicts_with = "path")]
    pub platform: Vec<Platform>,

    /// Local titools checkout to install from instead of downloading
    #[arg(long, env = "TITOOLS_SOURCE")]
    pub source: Option<PathBuf>,
}

pub fn run(args: InstallArgs, config: &Config) -> Result<()> {
    utils::header("Titanium SDK Skills Installer");

    let layout = Layout::from_env();
    let detected = detect_platforms(&layout);
    debug!(os = %detect_os(), platforms = ?detected, "detected environment");

    if detected.is_empty() && args.path.is_none() {
        println!("{}", "No AI coding assistants detected.".yellow());
        println!("Install one of: Claude Code, Gemini CLI, or Codex CLI");
        println!("Or use: titools install --path /custom/path");
        bail!("No AI coding assistants detected");
    }

    for platform in &detected {
        utils::succeed(&format!("{} detected", platform));
    }
    println!();

    let selected = if args.path.is_some() {
        Vec::new()
    } else if !args.platform.is_empty() {
        requested_platforms(&args.platform, &detected, &layout)?
    } else if args.all || !utils::can_prompt() {
        detected.clone()
    } else {
        match select_platforms(&detected)? {
            Some(selected) => selected,
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    };

    let bundle = utils::resolve_bundle(args.source, config)?;
    install_bundle(bundle.source(), &layout, &selected, args.path.as_deref())?;

    println!();
    println!("{}", "✓ Installation complete!".green());
    println!();
    println!(
        "{} Add AGENTS.md to your project: {}",
        "▸".bold(),
        "titools agents".cyan()
    );
    println!(
        "{} Improves AI: {} → {}",
        "▸".bold(),
        "53%".red(),
        "100%".green()
    );
    println!();

    if detect_os() == Os::Windows {
        println!("{} Windows: Ensure ~/bin is in your PATH", "▸".yellow());
        println!();
    }

    Ok(())
}

/// Platforms named with `--platform`; each one must be detected
fn requested_platforms(
    requested: &[Platform],
    detected: &[Platform],
    layout: &Layout,
) -> Result<Vec<Platform>> {
    let mut selected = Vec::new();
    for platform in requested {
        if !detected.contains(platform) {
            bail!(
                "{} not detected ({} does not exist)",
                platform,
                platform.config_dir(layout).display()
            );
        }
        if !selected.contains(platform) {
            selected.push(*platform);
        }
    }
    Ok(selected)
}

/// Ask which detected platforms to install to; `None` means cancel
fn select_platforms(detected: &[Platform]) -> Result<Option<Vec<Platform>>> {
    let mut items = vec!["All detected platforms".to_string()];
    items.extend(detected.iter().map(|p| format!("{} only", p)));
    items.push("Cancel".to_string());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select platform to install")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => Some(detected.to_vec()),
        i if i <= detected.len() => Some(vec![detected[i - 1]]),
        _ => None,
    })
}

/// Install skills, agents and template, then link skills into `platforms`
///
/// `skills_dest` overrides the central skills directory.
pub(crate) fn install_bundle(
    bundle: &BundleSource,
    layout: &Layout,
    platforms: &[Platform],
    skills_dest: Option<&Path>,
) -> Result<()> {
    let skills_dir = skills_dest
        .map(Path::to_path_buf)
        .unwrap_or_else(|| layout.agents_skills_dir());

    let skills = bundle.install_skills(&skills_dir, SKILLS)?;
    if skills.done.is_empty() {
        utils::fail("No skills installed");
    } else {
        utils::succeed(&format!("Skills: {}", format_list(&skills.done)));
    }
    if !skills.failed.is_empty() {
        utils::warn(&format!("Missing skills: {}", format_list(&skills.failed)));
    }

    let agents = bundle.install_agents(&layout.claude_agents_dir(), AGENTS)?;
    if agents.done.is_empty() {
        utils::info("No agents to install");
    } else {
        utils::succeed(&format!("Agents: {}", format_list(&agents.done)));
    }

    if bundle.install_template(&layout.agents_dir())? {
        utils::succeed("AGENTS-TEMPLATE.md installed");
    } else {
        utils::warn("AGENTS-TEMPLATE.md not found");
    }

    if bundle.install_helper_script(&bin_dir(layout))? {
        utils::succeed("ti-docs-index helper installed");
    }

    let installed: Vec<&str> = skills.done.iter().map(String::as_str).collect();
    for platform in platforms {
        let linked = link_skills(&platform.skills_dir(layout), &skills_dir, &installed);
        if linked.is_complete() {
            utils::succeed(&format!("{} linked", platform));
        } else {
            utils::warn(&format!(
                "{}: {}/{} linked",
                platform,
                linked.done.len(),
                installed.len()
            ));
        }
    }

    Ok(())
}

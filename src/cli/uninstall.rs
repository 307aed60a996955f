//! `titools uninstall` command
//!
//! # Usage
//! ```bash
//! titools uninstall                       # Choose interactively
//! titools uninstall --symlinks --skills   # No prompt
//! ```
//!
//! Project files (AGENTS.md, CLAUDE.md, GEMINI.md) are never touched.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, MultiSelect};

use super::utils::{self, format_list};
use crate::config::{Layout, AGENTS, SKILLS};
use crate::core::bundle::remove_items;
use crate::core::platform::detect_platforms;

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Remove skill links from all platforms
    #[arg(long)]
    pub symlinks: bool,

    /// Remove skills from the central directory (~/.agents/skills/)
    #[arg(long)]
    pub skills: bool,

    /// Remove agents from Claude Code
    #[arg(long)]
    pub agents: bool,
}

/// What to remove
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Targets {
    symlinks: bool,
    skills: bool,
    agents: bool,
}

impl Targets {
    fn is_empty(&self) -> bool {
        !(self.symlinks || self.skills || self.agents)
    }
}

pub fn run(args: UninstallArgs) -> Result<()> {
    utils::header("Titanium SDK Skills Uninstaller");

    let layout = Layout::from_env();
    let detected = detect_platforms(&layout);

    if detected.is_empty() {
        println!("{}", "No AI coding assistants detected.".yellow());
        println!("However, you can still remove skills from the central directory.");
        println!();
    }
    for platform in &detected {
        utils::succeed(&format!("{} detected", platform));
    }
    println!();

    let mut targets = Targets {
        symlinks: args.symlinks,
        skills: args.skills,
        agents: args.agents,
    };
    if targets.is_empty() {
        targets = if utils::can_prompt() {
            choose_targets()?
        } else {
            Targets {
                symlinks: true,
                ..Targets::default()
            }
        };
    }

    if targets.symlinks && detected.is_empty() {
        println!(
            "{}",
            "No platforms detected, skipping symlink removal.".yellow()
        );
        targets.symlinks = false;
    }

    if targets.is_empty() {
        println!("Nothing to uninstall.");
        return Ok(());
    }

    if targets.symlinks {
        for platform in &detected {
            let removed = remove_items(&platform.skills_dir(&layout), SKILLS, "");
            if removed.done.is_empty() {
                utils::info(&format!("{}: No symlinks found", platform));
            } else {
                utils::succeed(&format!("{}: {} removed", platform, removed.done.len()));
            }
            if !removed.failed.is_empty() {
                utils::fail(&format!(
                    "{}: failed to remove {}",
                    platform,
                    format_list(&removed.failed)
                ));
            }
        }
    }

    if targets.skills {
        let removed = remove_items(&layout.agents_skills_dir(), SKILLS, "");
        if removed.done.is_empty() {
            utils::info("No skills found in central directory");
        } else {
            utils::succeed(&format!("Skills: {}", format_list(&removed.done)));
        }
        if !removed.failed.is_empty() {
            utils::fail(&format!("Failed to remove: {}", format_list(&removed.failed)));
        }
    }

    if targets.agents {
        let removed = remove_items(&layout.claude_agents_dir(), AGENTS, ".md");
        if removed.done.is_empty() {
            utils::info("No agents found");
        } else {
            utils::succeed(&format!("Agents: {}", format_list(&removed.done)));
        }
        if !removed.failed.is_empty() {
            utils::fail(&format!("Failed to remove: {}", format_list(&removed.failed)));
        }
    }

    println!();
    println!("{}", "✓ Uninstallation complete!".green());
    println!();
    println!(
        "{}",
        "Note: AGENTS.md/CLAUDE.md/GEMINI.md files in your projects were NOT removed.".dimmed()
    );
    println!("{}", "To remove them manually:".dimmed());
    println!("{}", "  rm -f /path/to/your/project/AGENTS.md".dimmed());
    println!();

    Ok(())
}

fn choose_targets() -> Result<Targets> {
    let items = [
        "Skill symlinks from all platforms",
        "Skills from central directory (~/.agents/skills/)",
        "Agents from Claude Code",
    ];

    loop {
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("What do you want to uninstall?")
            .items(&items)
            .defaults(&[true, false, false])
            .interact()?;

        if chosen.is_empty() {
            utils::warn("Please select at least one option");
            continue;
        }

        return Ok(Targets {
            symlinks: chosen.contains(&0),
            skills: chosen.contains(&1),
            agents: chosen.contains(&2),
        });
    }
}

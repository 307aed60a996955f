//! `titools agents` command
//!
//! Syncs the Titanium knowledge block into the AI instruction files of a
//! project.
//!
//! # Usage
//! ```bash
//! titools agents                  # Current directory
//! titools agents ~/apps/myapp     # Specific project
//! titools agents --force          # Never prompt, default to CLAUDE.md
//! ```
//!
//! Existing CLAUDE.md, GEMINI.md and AGENTS.md files are all updated.
//! When none exists, the user picks one (or the configured default is used).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};

use super::utils;
use crate::config::{Config, Layout};
use crate::core::policy::{files_to_sync, TargetFile};
use crate::core::project::{detect_ai_files, detect_sdk_version, is_titanium_project};
use crate::core::sync::{sync_files, SyncStatus};

#[derive(Args, Debug)]
pub struct AgentsArgs {
    /// Project path (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Never prompt; create the default file when no AI file exists
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: AgentsArgs, config: &Config) -> Result<()> {
    utils::header("Titanium AGENTS.md Installer");

    let project_dir = args
        .path
        .canonicalize()
        .with_context(|| format!("Project path not found: {}", args.path.display()))?;

    let template = Layout::from_env().template_path();
    if !template.is_file() {
        println!("{}", "Error: AGENTS-TEMPLATE.md not found".red());
        println!("Install titools first:");
        println!("  titools install");
        bail!("Template not found at {}", template.display());
    }

    if !is_titanium_project(&project_dir) {
        println!("{}", "Error: Not a Titanium project (no tiapp.xml)".red());
        println!("Run this command from your project root.");
        bail!("Not a Titanium project: {}", project_dir.display());
    }

    let sdk = detect_sdk_version(&project_dir).unwrap_or_else(|| "unknown".to_string());
    utils::succeed(&format!("Titanium project (SDK {})", sdk));
    println!();

    let mut files = files_to_sync(&detect_ai_files(&project_dir));
    if files.is_empty() {
        let file = if args.force || !utils::can_prompt() {
            config.knowledge.default_file
        } else {
            ask_assistant()?
        };
        files.push(file);
    }

    let reports = sync_files(&project_dir, &files, &template, &config.knowledge.version);

    let mut updated = Vec::new();
    for report in &reports {
        match &report.result {
            Ok(status) => {
                let what = match (report.created_file, status) {
                    (true, _) => "created",
                    (false, SyncStatus::Created) => "updated (knowledge block added)",
                    (false, SyncStatus::Updated) => "updated",
                };
                utils::succeed(&format!("{} {}", report.file, what));
                updated.push(report.file.to_string());
            }
            Err(e) => utils::fail(&format!("Failed to update {}: {}", report.file, e)),
        }
    }

    println!();
    if updated.is_empty() {
        bail!("No files were updated");
    }

    println!(
        "{} Done! Updated: {}",
        "✓".green(),
        utils::format_list(&updated)
    );
    println!();

    if updated.len() > 1 {
        println!(
            "{} Updated {} files - Titanium knowledge synced across all.",
            "Note:".cyan(),
            updated.len()
        );
        println!();
    }

    Ok(())
}

/// Ask which assistant is used, returning the file to create
fn ask_assistant() -> Result<TargetFile> {
    let labels: Vec<&str> = TargetFile::ALL.iter().map(|f| f.assistant_label()).collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which AI assistant are you using?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(TargetFile::ALL[choice])
}

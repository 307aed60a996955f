//! Target file selection
//!
//! Decides which of CLAUDE.md, GEMINI.md and AGENTS.md receive the
//! knowledge block. Pure: detection of existing files happens at the edge
//! (see `project::detect_ai_files`).

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A well-known AI assistant instruction file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFile {
    #[serde(rename = "CLAUDE.md")]
    Claude,
    #[serde(rename = "GEMINI.md")]
    Gemini,
    #[serde(rename = "AGENTS.md")]
    Agents,
}

impl TargetFile {
    /// All target files, highest priority first
    pub const ALL: [TargetFile; 3] = [TargetFile::Claude, TargetFile::Gemini, TargetFile::Agents];

    pub fn file_name(&self) -> &'static str {
        match self {
            TargetFile::Claude => "CLAUDE.md",
            TargetFile::Gemini => "GEMINI.md",
            TargetFile::Agents => "AGENTS.md",
        }
    }

    /// Label shown when asking the user which assistant they use
    pub fn assistant_label(&self) -> &'static str {
        match self {
            TargetFile::Claude => "Claude Code (creates CLAUDE.md)",
            TargetFile::Gemini => "Gemini CLI (creates GEMINI.md)",
            TargetFile::Agents => "Cursor/Copilot (creates AGENTS.md)",
        }
    }
}

impl fmt::Display for TargetFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

impl FromStr for TargetFile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLAUDE.MD" | "CLAUDE" => Ok(TargetFile::Claude),
            "GEMINI.MD" | "GEMINI" => Ok(TargetFile::Gemini),
            "AGENTS.MD" | "AGENTS" => Ok(TargetFile::Agents),
            _ => bail!(
                "Unknown AI file: {}. Use CLAUDE.md, GEMINI.md or AGENTS.md.",
                s
            ),
        }
    }
}

/// Which target files already exist in a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiFiles {
    pub claude: bool,
    pub gemini: bool,
    pub agents: bool,
}

impl AiFiles {
    pub fn contains(&self, file: TargetFile) -> bool {
        match file {
            TargetFile::Claude => self.claude,
            TargetFile::Gemini => self.gemini,
            TargetFile::Agents => self.agents,
        }
    }
}

/// Files to sync, in priority order: CLAUDE.md > GEMINI.md > AGENTS.md
///
/// Only existing files are listed. An empty plan means nothing exists yet
/// and the caller has to pick exactly one file (prompt or default).
///
/// # Examples
/// ```
/// use titools::core::policy::{files_to_sync, AiFiles, TargetFile};
///
/// let plan = files_to_sync(&AiFiles { claude: true, gemini: true, agents: false });
/// assert_eq!(plan, vec![TargetFile::Claude, TargetFile::Gemini]);
/// ```
pub fn files_to_sync(existing: &AiFiles) -> Vec<TargetFile> {
    TargetFile::ALL
        .into_iter()
        .filter(|file| existing.contains(*file))
        .collect()
}

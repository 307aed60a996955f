//! Installation layout under the user's home directory
//!
//! ```text
//! ~/.agents/skills/<skill>/        central skill bundles
//! ~/.agents/AGENTS-TEMPLATE.md     knowledge index template
//! ~/.claude/agents/<agent>.md      agent prompt files
//! ~/.titools/config.toml           titools configuration
//! ```
//!
//! `TITOOLS_HOME` replaces the home directory for every path above.

use std::path::{Path, PathBuf};

use super::AGENTS_TEMPLATE_FILE;

/// Home directory: `TITOOLS_HOME`, then the OS home, then `.`
pub fn home_dir() -> PathBuf {
    if let Ok(home) = std::env::var("TITOOLS_HOME") {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }

    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolved install locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home: PathBuf,
}

impl Layout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn from_env() -> Self {
        Self::new(home_dir())
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.agents`
    pub fn agents_dir(&self) -> PathBuf {
        self.home.join(".agents")
    }

    /// `~/.agents/skills`
    pub fn agents_skills_dir(&self) -> PathBuf {
        self.agents_dir().join("skills")
    }

    /// `~/.agents/AGENTS-TEMPLATE.md`
    pub fn template_path(&self) -> PathBuf {
        self.agents_dir().join(AGENTS_TEMPLATE_FILE)
    }

    /// `~/.claude/agents`
    pub fn claude_agents_dir(&self) -> PathBuf {
        self.home.join(".claude").join("agents")
    }

    /// `~/.titools/config.toml`
    pub fn config_path(&self) -> PathBuf {
        self.home.join(".titools").join("config.toml")
    }
}

//! AI coding assistant platforms and host OS
//!
//! A platform counts as installed when its config directory exists in the
//! home directory (`~/.claude`, `~/.gemini`, `~/.codex`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::config::Layout;

/// Supported assistant platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Claude,
    Gemini,
    Codex,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Claude, Platform::Gemini, Platform::Codex];

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Claude => "claude",
            Platform::Gemini => "gemini",
            Platform::Codex => "codex",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Claude => "Claude Code",
            Platform::Gemini => "Gemini CLI",
            Platform::Codex => "Codex CLI",
        }
    }

    pub fn config_dir(&self, layout: &Layout) -> PathBuf {
        layout.home().join(format!(".{}", self.name()))
    }

    pub fn skills_dir(&self, layout: &Layout) -> PathBuf {
        self.config_dir(layout).join("skills")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Platform::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
        {
            Some(platform) => Ok(platform),
            None => bail!("Unknown platform: {}. Use claude, gemini or codex.", s),
        }
    }
}

/// Platforms whose config directory exists
pub fn detect_platforms(layout: &Layout) -> Vec<Platform> {
    Platform::ALL
        .into_iter()
        .filter(|p| p.config_dir(layout).is_dir())
        .collect()
}

/// Host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOs,
    Linux,
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::MacOs => write!(f, "macos"),
            Os::Linux => write!(f, "linux"),
            Os::Windows => write!(f, "windows"),
        }
    }
}

pub fn detect_os() -> Os {
    if cfg!(target_os = "macos") {
        Os::MacOs
    } else if cfg!(windows) {
        Os::Windows
    } else {
        Os::Linux
    }
}

/// Directory for helper scripts: `~/bin` on Windows, `/usr/local/bin` elsewhere
pub fn bin_dir(layout: &Layout) -> PathBuf {
    match detect_os() {
        Os::Windows => layout.home().join("bin"),
        _ => PathBuf::from("/usr/local/bin"),
    }
}
